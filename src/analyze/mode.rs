use crate::foundation::core::Size;
use crate::foundation::error::AnimResult;
use crate::source::frame::FrameSource;

/// How an animation stores its frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    /// Every frame is a complete canvas.
    #[default]
    Full,
    /// At least one frame only updates a sub-rectangle and must be composited.
    Partial,
}

/// Canvas size plus frame-storage classification of an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationInfo {
    /// Overall canvas size.
    pub size: Size,
    /// Frame-storage classification.
    pub mode: AnimationMode,
}

/// Classify an animation as [`AnimationMode::Full`] or [`AnimationMode::Partial`].
///
/// Stops pulling frames at the first one whose update region dimensions differ from the
/// canvas size of the first frame. Zero or one full-canvas frame is `Full`.
pub fn classify<S: FrameSource>(source: &mut S) -> AnimResult<AnimationMode> {
    probe(source).map(|info| info.mode)
}

/// Read the canvas size and classify in one pass.
///
/// The canvas is taken from the first frame; an empty animation reports the container's
/// declared canvas.
#[tracing::instrument(skip(source))]
pub fn probe<S: FrameSource>(source: &mut S) -> AnimResult<AnimationInfo> {
    let mut canvas: Option<Size> = None;
    let mut idx = 0usize;

    while let Some(frame) = source.next_frame()? {
        let size = *canvas.get_or_insert(frame.size);
        if !frame.update_region.covers(size) {
            tracing::debug!(
                frame = idx,
                region_w = frame.update_region.width,
                region_h = frame.update_region.height,
                "partial update region found"
            );
            return Ok(AnimationInfo {
                size,
                mode: AnimationMode::Partial,
            });
        }
        idx += 1;
    }

    tracing::debug!(frames = idx, "all frames cover the canvas");
    Ok(AnimationInfo {
        size: canvas.unwrap_or_else(|| source.canvas_size()),
        mode: AnimationMode::Full,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/analyze/mode.rs"]
mod tests;
