use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::compose::image_ops::{CropBox, crop_rgba};
use crate::foundation::error::HeatResult;
use crate::foundation::io::{open_image, save_image_atomic};

/// Options for [`overlay_images`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayOpts {
    /// Crop the composite to this box.
    pub crop: Option<CropBox>,
    /// Stretch the overlay to the background's size before compositing.
    pub fit: bool,
}

/// Source-over of straight-alpha pixels with rounded channel weights.
fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let da = u16::from(mul_div255(u16::from(dst[3]), 255 - sa));
    // sa + da never exceeds 255.
    let out_a = u32::from(sa + da);
    let mut out = [0u8; 4];
    out[3] = out_a as u8;
    for i in 0..3 {
        let c = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(da);
        out[i] = ((c + out_a / 2) / out_a).min(255) as u8;
    }
    Rgba(out)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Alpha-composite `overlay` onto `background` at the origin.
pub fn composite(background: &RgbaImage, overlay: &RgbaImage, fit: bool) -> RgbaImage {
    let mut out = background.clone();
    let scaled;
    let fg = if fit && overlay.dimensions() != background.dimensions() {
        scaled = imageops::resize(
            overlay,
            background.width(),
            background.height(),
            FilterType::Lanczos3,
        );
        &scaled
    } else {
        overlay
    };

    let w = out.width().min(fg.width());
    let h = out.height().min(fg.height());
    for y in 0..h {
        for x in 0..w {
            let px = out.get_pixel_mut(x, y);
            *px = over(*px, *fg.get_pixel(x, y));
        }
    }
    out
}

/// Paste `overlay` (masked by its own alpha) over `background` and write `output`.
///
/// `output` may be the same path as either input.
#[tracing::instrument]
pub fn overlay_images(
    background: &Path,
    overlay: &Path,
    output: &Path,
    opts: OverlayOpts,
) -> HeatResult<()> {
    let bg = open_image(background)?.to_rgba8();
    let fg = open_image(overlay)?.to_rgba8();

    let mut out = composite(&bg, &fg, opts.fit);
    if let Some(crop) = opts.crop {
        out = crop_rgba(&out, crop);
    }
    save_image_atomic(output, &DynamicImage::ImageRgba8(out))?;
    tracing::info!(output = %output.display(), "overlay written");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/overlay.rs"]
mod tests;
