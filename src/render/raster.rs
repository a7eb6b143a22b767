use std::path::Path;

use image::{DynamicImage, Rgba, RgbaImage};

use crate::foundation::core::Field2;
use crate::foundation::error::{HeatError, HeatResult};
use crate::foundation::io::save_image_atomic;
use crate::render::colormap::Colormap;
use crate::render::smooth::Interpolation;

/// Map `intensity` through `colormap`, using `alpha` as per-pixel transparency.
///
/// The image is `cols x rows` pixels, one per grid cell. Field row 0 (lowest y) is the
/// bottom image row.
pub fn render(
    intensity: &Field2,
    alpha: &Field2,
    colormap: Colormap,
    interpolation: Interpolation,
) -> HeatResult<RgbaImage> {
    if intensity.shape() != alpha.shape() {
        return Err(HeatError::invalid_input(format!(
            "intensity shape {:?} does not match alpha shape {:?}",
            intensity.shape(),
            alpha.shape()
        )));
    }
    let (rows, cols) = intensity.shape();
    if rows == 0 || cols == 0 {
        return Err(HeatError::invalid_input(format!(
            "cannot render an empty {rows}x{cols} field"
        )));
    }
    let width = u32::try_from(cols)
        .map_err(|_| HeatError::invalid_input("field too wide to render"))?;
    let height = u32::try_from(rows)
        .map_err(|_| HeatError::invalid_input("field too tall to render"))?;

    let intensity = interpolation.apply(intensity)?;
    let alpha = interpolation.apply(alpha)?;

    // Colour scale spans the field's own range.
    let (lo, hi) = intensity.min_max().unwrap_or((0.0, 0.0));
    let span = hi - lo;

    let mut img = RgbaImage::new(width, height);
    for j in 0..rows {
        let py = (rows - 1 - j) as u32;
        for k in 0..cols {
            let t = if span > 0.0 {
                (intensity.get(j, k) - lo) / span
            } else {
                0.0
            };
            let [r, g, b] = colormap.sample(t);
            let a = (alpha.get(j, k).clamp(0.0, 1.0) * 255.0).round() as u8;
            img.put_pixel(k as u32, py, Rgba([r, g, b, a]));
        }
    }
    Ok(img)
}

/// Write a rendered heatmap, overwriting any existing file.
pub fn save_heatmap(path: &Path, img: &RgbaImage) -> HeatResult<()> {
    save_image_atomic(path, &DynamicImage::ImageRgba8(img.clone()))?;
    tracing::info!(path = %path.display(), "heatmap saved");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
