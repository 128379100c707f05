use image::RgbaImage;

use crate::foundation::core::Palette;
use crate::foundation::error::{AnimError, AnimResult};
use crate::source::frame::{Frame, PixelData};

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

const TRANSPARENT: Rgba8 = [0, 0, 0, 0];
const OPAQUE_BLACK: Rgba8 = [0, 0, 0, 255];

/// Straight-alpha source-over of `src` onto `dst`.
///
/// Alpha 255 replaces, alpha 0 keeps `dst`, anything in between blends.
pub fn paste_px(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    match sa {
        0 => dst,
        255 => src,
        _ => {
            let da = u32::from(dst[3]);
            let inv = 255 - sa;
            let out_a = sa + u32::from(mul_div255(da as u16, inv as u16));
            if out_a == 0 {
                return TRANSPARENT;
            }
            let den = out_a * 255;
            let mut out = [0u8; 4];
            for i in 0..3 {
                let num = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * da * inv;
                out[i] = ((num + den / 2) / den).min(255) as u8;
            }
            out[3] = out_a.min(255) as u8;
            out
        }
    }
}

/// [`paste_px`] over whole equally-sized images.
///
/// This is not a plain copy of every pixel with alpha above zero: only alpha 255 replaces
/// the destination outright, and partially transparent source pixels (such as the soft edges
/// a resampled patch picks up) are blended over what is already there.
pub fn paste_masked(dst: &mut RgbaImage, src: &RgbaImage) -> AnimResult<()> {
    if dst.dimensions() != src.dimensions() {
        return Err(AnimError::resampling(
            None,
            format!(
                "paste expects equal sizes, got {:?} onto {:?}",
                src.dimensions(),
                dst.dimensions()
            ),
        ));
    }
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        d.0 = paste_px(d.0, s.0);
    }
    Ok(())
}

/// Place a frame's stored region onto a transparent canvas-size RGBA image.
///
/// Indexed pixels resolve through the frame's own palette, falling back to `inherited`.
/// The transparent index maps to alpha 0 and indices past the end of the table to opaque
/// black. Parts of the region outside the canvas are dropped.
pub fn expand_to_canvas(frame: &Frame, inherited: Option<&Palette>) -> AnimResult<RgbaImage> {
    frame.validate()?;
    frame
        .size
        .check_pixel_limit()
        .and_then(|()| frame.size.rgba_len())
        .map_err(|e| AnimError::decode(None, format!("frame canvas too large: {e}")))?;

    let mut out = RgbaImage::new(frame.size.width, frame.size.height);
    let region = frame.update_region;
    let Some(visible) = region.clip_to(frame.size) else {
        return Ok(out);
    };

    let stride = region.width as usize;
    let lookup: Box<dyn Fn(usize) -> Rgba8 + '_> = match &frame.pixels {
        PixelData::Rgba(data) => Box::new(move |i| {
            let p = &data[i * 4..i * 4 + 4];
            [p[0], p[1], p[2], p[3]]
        }),
        PixelData::Indexed {
            indices,
            palette,
            transparent,
        } => {
            let palette = palette
                .as_ref()
                .or(inherited)
                .ok_or_else(|| AnimError::decode(None, "indexed frame has no palette"))?;
            let transparent = *transparent;
            Box::new(move |i| {
                let idx = indices[i];
                if transparent == Some(idx) {
                    return TRANSPARENT;
                }
                match palette.lookup(idx) {
                    Some([r, g, b]) => [r, g, b, 255],
                    None => OPAQUE_BLACK,
                }
            })
        }
    };

    for y in visible.y..visible.y + visible.height {
        let row = (y - region.y) as usize * stride;
        for x in visible.x..visible.x + visible.width {
            let i = row + (x - region.x) as usize;
            out.put_pixel(x, y, image::Rgba(lookup(i)));
        }
    }
    Ok(out)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/resize/composite.rs"]
mod tests;
