use image::RgbaImage;

use crate::analyze::mode::AnimationMode;
use crate::foundation::core::{Palette, Size};
use crate::foundation::error::{AnimError, AnimResult};
use crate::resize::composite::{expand_to_canvas, paste_masked};
use crate::resize::resample::{LanczosFit, Resampler};
use crate::source::frame::FrameSource;

/// Target box for a resize operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ResizeSettings {
    /// Output width in pixels (> 0).
    pub width: u32,
    /// Output height in pixels (> 0).
    pub height: u32,
}

impl ResizeSettings {
    /// Settings for a `width x height` target.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse settings from JSON, e.g. `{"width": 320, "height": 240}`.
    pub fn from_json(s: &str) -> AnimResult<Self> {
        let settings: Self = serde_json::from_str(s)
            .map_err(|e| AnimError::invalid(format!("resize settings json: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject non-positive, oversized or unaddressable targets.
    pub fn validate(&self) -> AnimResult<Size> {
        let size = Size::new(self.width, self.height).map_err(|_| {
            AnimError::invalid(format!(
                "target size must be positive, got {}x{}",
                self.width, self.height
            ))
        })?;
        size.check_pixel_limit()?;
        size.rgba_len()?;
        Ok(size)
    }
}

/// One output animation frame: a complete straight-alpha RGBA8 canvas at the target size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizedFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl ResizedFrame {
    fn from_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Copy into an `image` buffer.
    pub fn to_image(&self) -> AnimResult<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            AnimError::invalid(format!(
                "frame buffer of {} bytes does not match {}x{}",
                self.data.len(),
                self.width,
                self.height
            ))
        })
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Resize every frame of `source` to `target_width x target_height` with [`LanczosFit`].
///
/// See [`resize_animation_with`].
pub fn resize_animation<S: FrameSource>(
    source: &mut S,
    mode: AnimationMode,
    target_width: u32,
    target_height: u32,
) -> AnimResult<Vec<ResizedFrame>> {
    resize_animation_with(
        source,
        mode,
        &ResizeSettings::new(target_width, target_height),
        &LanczosFit,
    )
}

/// Resize every frame of `source`, compositing partial updates when `mode` is `Partial`.
///
/// Output holds one complete canvas per input frame, in order.
///
/// - `Full`: each frame is resampled on its own; no state is shared between frames.
/// - `Partial`: a single canvas, transparent before frame 0, receives every resampled frame
///   through [`paste_masked`] and is snapshotted after each paste.
///
/// Frames without their own palette use the most recent palette seen in this call, starting
/// from the source's global palette. The target is validated before any frame is pulled.
#[tracing::instrument(
    skip(source, settings, resampler),
    fields(width = settings.width, height = settings.height)
)]
pub fn resize_animation_with<S, R>(
    source: &mut S,
    mode: AnimationMode,
    settings: &ResizeSettings,
    resampler: &R,
) -> AnimResult<Vec<ResizedFrame>>
where
    S: FrameSource,
    R: Resampler + ?Sized,
{
    let target = settings.validate()?;

    let mut last_palette: Option<Palette> = source.global_palette().cloned();
    let mut canvas: Option<RgbaImage> = None;
    let mut out = Vec::new();
    let mut idx = 0usize;

    while let Some(frame) = source.next_frame().map_err(|e| e.at_frame(idx))? {
        if let Some(p) = frame.palette() {
            last_palette = Some(p.clone());
        }

        let rgba = expand_to_canvas(&frame, last_palette.as_ref()).map_err(|e| e.at_frame(idx))?;
        let resized = resampler
            .fit(&rgba, target.width, target.height)
            .map_err(|e| e.at_frame(idx))?;
        if resized.dimensions() != (target.width, target.height) {
            return Err(AnimError::resampling(
                Some(idx),
                format!(
                    "resampler returned {:?}, expected {}x{}",
                    resized.dimensions(),
                    target.width,
                    target.height
                ),
            ));
        }

        let emitted = match mode {
            AnimationMode::Full => resized,
            AnimationMode::Partial => {
                let canvas =
                    canvas.get_or_insert_with(|| RgbaImage::new(target.width, target.height));
                paste_masked(canvas, &resized).map_err(|e| e.at_frame(idx))?;
                canvas.clone()
            }
        };

        tracing::debug!(frame = idx, ?mode, "frame resized");
        out.push(ResizedFrame::from_image(emitted));
        idx += 1;
    }

    tracing::debug!(frames = out.len(), "animation resized");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/resize/engine.rs"]
mod tests;
