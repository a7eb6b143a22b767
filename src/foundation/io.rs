use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};

use crate::foundation::error::{HeatError, HeatResult};

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> HeatResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            HeatError::io(format!(
                "create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Open and decode an image file. A missing file is [`HeatError::NotFound`].
pub fn open_image(path: &Path) -> HeatResult<DynamicImage> {
    if !path.is_file() {
        return Err(HeatError::not_found(path));
    }
    image::open(path).map_err(|e| HeatError::from_image(path, e))
}

/// Encode `img` next to `path` and rename it into place, so a failed write never leaves a
/// partial file at `path`. The format follows the extension, defaulting to PNG.
pub fn save_image_atomic(path: &Path, img: &DynamicImage) -> HeatResult<()> {
    ensure_parent_dir(path)?;
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    let tmp = TempFileGuard(Some(sibling_tmp_path(path)));
    let tmp_path = tmp.path();

    img.save_with_format(tmp_path, format)
        .map_err(|e| HeatError::from_image(path, e))?;
    std::fs::rename(tmp_path, path).map_err(|e| HeatError::from_io(path, e))?;
    tmp.disarm();
    Ok(())
}

pub(crate) fn sibling_tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_owned());
    path.with_file_name(format!(".{name}.{}.partial", std::process::id()))
}

/// Removes the wrapped path on drop unless disarmed.
pub(crate) struct TempFileGuard(pub(crate) Option<PathBuf>);

impl TempFileGuard {
    pub(crate) fn path(&self) -> &Path {
        self.0.as_deref().unwrap_or(Path::new(""))
    }

    pub(crate) fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/io.rs"]
mod tests;
