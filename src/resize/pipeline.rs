use crate::analyze::mode::{AnimationInfo, classify, probe};
use crate::encode::gif::{GifEncodeSettings, encode_gif};
use crate::foundation::error::AnimResult;
use crate::resize::engine::{ResizeSettings, ResizedFrame, resize_animation};
use crate::source::gif::GifFrameSource;

/// Canvas size and frame-storage mode of an in-memory GIF.
pub fn analyze_gif(bytes: &[u8]) -> AnimResult<AnimationInfo> {
    let mut source = GifFrameSource::from_bytes(bytes)?;
    probe(&mut source)
}

/// Classify then resize an in-memory GIF, decoding it once per pass.
///
/// Pipeline:
/// 1. validate the target
/// 2. [`classify`] over a first [`GifFrameSource`]
/// 3. [`resize_animation`] over a second, freshly opened one
pub fn resize_gif(bytes: &[u8], width: u32, height: u32) -> AnimResult<Vec<ResizedFrame>> {
    ResizeSettings::new(width, height).validate()?;

    let mode = classify(&mut GifFrameSource::from_bytes(bytes)?)?;
    let mut source = GifFrameSource::from_bytes(bytes)?;
    resize_animation(&mut source, mode, width, height)
}

/// [`resize_gif`] followed by [`encode_gif`].
pub fn resize_gif_to_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
    encode: &GifEncodeSettings,
) -> AnimResult<Vec<u8>> {
    let frames = resize_gif(bytes, width, height)?;
    encode_gif(&frames, width, height, encode)
}
