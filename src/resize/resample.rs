use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::foundation::core::MAX_PIXEL_COUNT;
use crate::foundation::error::{AnimError, AnimResult};

/// Scales an RGBA image to exactly `width x height`.
///
/// Implementations must be deterministic and free of side effects.
pub trait Resampler: Sync {
    /// Produce an image of exactly `width x height` from `src`.
    fn fit(&self, src: &RgbaImage, width: u32, height: u32) -> AnimResult<RgbaImage>;
}

/// Aspect-fill resampler: scale to cover the target box, then crop centered.
///
/// Uses Lanczos3, the highest quality filter `image` offers. Filtering runs on premultiplied
/// color, so transparent pixels around a partial update do not bleed into its edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct LanczosFit;

impl Resampler for LanczosFit {
    fn fit(&self, src: &RgbaImage, width: u32, height: u32) -> AnimResult<RgbaImage> {
        if width == 0 || height == 0 {
            return Err(AnimError::invalid(format!(
                "fit target must be positive, got {width}x{height}"
            )));
        }
        let (sw, sh) = src.dimensions();
        if sw == 0 || sh == 0 {
            return Err(AnimError::resampling(None, "cannot resample an empty image"));
        }
        if (sw, sh) == (width, height) {
            return Ok(src.clone());
        }

        let (fw, fh) = fill_dimensions(sw, sh, width, height);
        if u64::from(fw) * u64::from(fh) > MAX_PIXEL_COUNT {
            return Err(AnimError::resampling(
                None,
                format!("fill size {fw}x{fh} for {sw}x{sh} -> {width}x{height} is too large"),
            ));
        }

        let mut premul = src.clone();
        premultiply_rgba8_in_place(&mut premul);
        let mut scaled = imageops::resize(&premul, fw, fh, FilterType::Lanczos3);
        unpremultiply_rgba8_in_place(&mut scaled);
        if (fw, fh) == (width, height) {
            return Ok(scaled);
        }

        let x = (fw - width) / 2;
        let y = (fh - height) / 2;
        Ok(imageops::crop_imm(&scaled, x, y, width, height).to_image())
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * a + 127) / 255) as u8;
        px[1] = ((u16::from(px[1]) * a + 127) / 255) as u8;
        px[2] = ((u16::from(px[2]) * a + 127) / 255) as u8;
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Smallest size preserving the `src` aspect ratio that covers `dst` in both axes.
pub(crate) fn fill_dimensions(sw: u32, sh: u32, dw: u32, dh: u32) -> (u32, u32) {
    let (sw64, sh64, dw64, dh64) = (
        u64::from(sw),
        u64::from(sh),
        u64::from(dw),
        u64::from(dh),
    );
    // Compare dw/sw against dh/sh without floating point.
    if dw64 * sh64 >= dh64 * sw64 {
        let h = (sh64 * dw64).div_ceil(sw64);
        (dw, clamp_u32(h.max(dh64)))
    } else {
        let w = (sw64 * dh64).div_ceil(sh64);
        (clamp_u32(w.max(dw64)), dh)
    }
}

fn clamp_u32(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/resize/resample.rs"]
mod tests;
