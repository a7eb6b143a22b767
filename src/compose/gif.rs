use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::{self, FilterType};
use image::{Delay, Frame};

use crate::foundation::error::{HeatError, HeatResult};
use crate::foundation::io::{TempFileGuard, ensure_parent_dir, open_image, sibling_tmp_path};

/// Options for [`create_gif`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GifOpts {
    /// Per-frame display time in milliseconds.
    pub duration_ms: u32,
    /// `0` loops forever, `n` plays `n` extra times.
    pub loop_count: u16,
    /// Palette quality, 1..=100.
    pub quality: u8,
    /// Use the slowest, best palette quantization regardless of `quality`.
    pub optimize: bool,
}

impl Default for GifOpts {
    fn default() -> Self {
        Self {
            duration_ms: 20,
            loop_count: 0,
            quality: 50,
            optimize: false,
        }
    }
}

impl GifOpts {
    /// NeuQuant sampling speed for the encoder: 1 (best) ..= 30 (fastest).
    pub fn encoder_speed(&self) -> HeatResult<i32> {
        if !(1..=100).contains(&self.quality) {
            return Err(HeatError::invalid_input(format!(
                "gif quality must be within 1..=100, got {}",
                self.quality
            )));
        }
        if self.optimize {
            return Ok(1);
        }
        let q = i32::from(self.quality) - 1;
        Ok(30 - (q * 29 + 49) / 99)
    }

    fn repeat(&self) -> Repeat {
        match self.loop_count {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        }
    }
}

/// Files matching `pattern`, sorted by path.
///
/// Only the file-name component may contain wildcards (`*`, `?`).
pub fn expand_pattern(pattern: &Path) -> HeatResult<Vec<PathBuf>> {
    let name = pattern
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            HeatError::invalid_input(format!(
                "pattern '{}' has no file name",
                pattern.display()
            ))
        })?;
    let dir = match pattern.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(HeatError::from_io(&dir, e)),
    };

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| HeatError::from_io(&dir, e))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if entry.path().is_file() && wildcard_match(name, file_name) {
            out.push(dir.join(file_name));
        }
    }
    out.sort();
    Ok(out)
}

fn wildcard_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

/// Assemble the images matching `pattern` (sorted by path) into an animated GIF.
#[tracing::instrument]
pub fn create_gif(pattern: &Path, output: &Path, opts: GifOpts) -> HeatResult<()> {
    let files = expand_pattern(pattern)?;
    if files.is_empty() {
        let err = HeatError::invalid_input(format!(
            "no images found matching pattern: {}",
            pattern.display()
        ));
        tracing::error!("{err}");
        return Err(err);
    }
    tracing::info!(count = files.len(), "found images to process");
    encode_gif(&files, output, opts)?;
    tracing::info!(output = %output.display(), "created gif animation");
    Ok(())
}

/// Every `*.{extension}` file in `dir`, as a GIF.
pub fn create_gif_from_directory(
    dir: &Path,
    extension: &str,
    output: &Path,
    opts: GifOpts,
) -> HeatResult<()> {
    let ext = extension.trim_start_matches('.');
    create_gif(&dir.join(format!("*.{ext}")), output, opts)
}

/// Encode `files` in the given order. Frames that differ in size from the first are
/// resized to match it.
pub fn encode_gif(files: &[PathBuf], output: &Path, opts: GifOpts) -> HeatResult<()> {
    let speed = opts.encoder_speed()?;
    let mut buf = Vec::new();
    {
        let mut enc = GifEncoder::new_with_speed(&mut buf, speed);
        enc.set_repeat(opts.repeat())
            .map_err(|e| HeatError::from_image(output, e))?;

        let mut size = None;
        for path in files {
            let mut img = open_image(path)?.to_rgba8();
            let (w, h) = *size.get_or_insert(img.dimensions());
            if img.dimensions() != (w, h) {
                img = imageops::resize(&img, w, h, FilterType::Triangle);
            }
            let delay = Delay::from_numer_denom_ms(opts.duration_ms, 1);
            enc.encode_frame(Frame::from_parts(img, 0, 0, delay))
                .map_err(|e| HeatError::from_image(path, e))?;
        }
    }

    ensure_parent_dir(output)?;
    let tmp = TempFileGuard(Some(sibling_tmp_path(output)));
    std::fs::write(tmp.path(), &buf).map_err(|e| HeatError::from_io(output, e))?;
    std::fs::rename(tmp.path(), output).map_err(|e| HeatError::from_io(output, e))?;
    tmp.disarm();
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/gif.rs"]
mod tests;
