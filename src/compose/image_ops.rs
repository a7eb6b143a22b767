use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::foundation::error::{HeatError, HeatResult};
use crate::foundation::io::{open_image, save_image_atomic};

/// Largest crop, in pixels, that [`CropBox::new`] accepts.
pub const MAX_CROP_PIXELS: u64 = 1 << 28;

/// Pixel box `left <= x < right`, `top <= y < bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropBox {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl CropBox {
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> HeatResult<Self> {
        if right <= left || bottom <= top {
            return Err(HeatError::invalid_input(format!(
                "crop box ({left},{top},{right},{bottom}) must have right > left and bottom > top"
            )));
        }
        let width = right.checked_sub(left).and_then(|w| u32::try_from(w).ok());
        let height = bottom.checked_sub(top).and_then(|h| u32::try_from(h).ok());
        let (Some(width), Some(height)) = (width, height) else {
            return Err(HeatError::invalid_input(format!(
                "crop box ({left},{top},{right},{bottom}) is wider or taller than u32::MAX"
            )));
        };
        if u64::from(width) * u64::from(height) > MAX_CROP_PIXELS {
            return Err(HeatError::invalid_input(format!(
                "crop box {width}x{height} exceeds the {MAX_CROP_PIXELS} pixel limit"
            )));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    pub fn left(&self) -> i64 {
        self.left
    }

    pub fn top(&self) -> i64 {
        self.top
    }

    pub fn width(&self) -> u32 {
        // Bounded by `new`.
        (self.right - self.left) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32
    }
}

impl std::str::FromStr for CropBox {
    type Err = HeatError;

    /// Parse `"left,top,right,bottom"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| HeatError::invalid_input(format!("crop box '{s}': {e}")))?;
        let [left, top, right, bottom] = parts[..] else {
            return Err(HeatError::invalid_input(format!(
                "crop box '{s}' must be 'left,top,right,bottom'"
            )));
        };
        Self::new(left, top, right, bottom)
    }
}

/// Cut `crop` out of `img`; pixels outside the source stay transparent.
pub fn crop_rgba(img: &RgbaImage, crop: CropBox) -> RgbaImage {
    let mut out = RgbaImage::new(crop.width(), crop.height());
    let (w, h) = (i64::from(img.width()), i64::from(img.height()));
    for y in crop.top.max(0)..crop.bottom.min(h) {
        for x in crop.left.max(0)..crop.right.min(w) {
            let px = *img.get_pixel(x as u32, y as u32);
            out.put_pixel((x - crop.left) as u32, (y - crop.top) as u32, px);
        }
    }
    out
}

/// Largest size fitting in `(max_w, max_h)` that keeps the aspect ratio, never larger
/// than the source image.
pub fn thumbnail_size(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    let scale = (f64::from(max_w) / f64::from(width)).min(f64::from(max_h) / f64::from(height));
    let w = ((f64::from(width) * scale).round() as u32).clamp(1, max_w.max(1));
    let h = ((f64::from(height) * scale).round() as u32).clamp(1, max_h.max(1));
    (w, h)
}

/// Crop the image at `input` and write it to `output`.
pub fn crop_image(input: &Path, output: &Path, crop: CropBox) -> HeatResult<()> {
    let img = open_image(input)?.to_rgba8();
    let cropped = crop_rgba(&img, crop);
    save_image_atomic(output, &DynamicImage::ImageRgba8(cropped))?;
    tracing::info!(input = %input.display(), output = %output.display(), "cropped image");
    Ok(())
}

/// Resize the image at `input` to `size` (Lanczos3).
///
/// With `maintain_aspect` the image shrinks to fit inside `size` and is never enlarged.
pub fn resize_image(
    input: &Path,
    output: &Path,
    size: (u32, u32),
    maintain_aspect: bool,
) -> HeatResult<()> {
    let (w, h) = size;
    if w == 0 || h == 0 {
        return Err(HeatError::invalid_input(format!(
            "resize target {w}x{h} must be non-empty"
        )));
    }
    let img = open_image(input)?.to_rgba8();
    let (tw, th) = if maintain_aspect {
        thumbnail_size(img.width(), img.height(), w, h)
    } else {
        (w, h)
    };
    let resized = imageops::resize(&img, tw, th, FilterType::Lanczos3);
    save_image_atomic(output, &DynamicImage::ImageRgba8(resized))?;
    tracing::info!(input = %input.display(), output = %output.display(), width = tw, height = th, "resized image");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/image_ops.rs"]
mod tests;
