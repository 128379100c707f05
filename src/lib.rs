//! animfit resizes animated images to an arbitrary target box while keeping animation
//! semantics intact.
//!
//! Every output frame is a complete canvas at the target size, even when the source stores
//! frames as sparse deltas over the previous canvas.
//!
//! # Pipeline overview
//!
//! 1. **Analyze**: `FrameSource -> AnimationMode` (does any frame update only a sub-rectangle?)
//! 2. **Resize**: `FrameSource + AnimationMode -> Vec<ResizedFrame>` (aspect-fill each frame,
//!    compositing partial updates onto a persistent canvas when needed)
//! 3. **Encode** (optional): `Vec<ResizedFrame> -> GIF bytes`
//!
//! Each stage pulls frames from its own [`FrameSource`]; a caller re-opens the source (or
//! buffers the frames) between analysis and resizing.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical input frames and target produce byte-identical output.
//! - **No IO in the core**: analysis and resizing only see decoded frames.
//! - **Straight-alpha RGBA8** output frames.
//!
//! For a walkthrough of the concepts, see [`crate::guide`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod analyze;
mod encode;
mod foundation;
mod resize;
mod source;

/// Standalone documentation for animfit's concepts and architecture.
pub mod guide;

pub use analyze::mode::{AnimationInfo, AnimationMode, classify, probe};
pub use encode::gif::{GifEncodeSettings, encode_gif};
pub use foundation::core::{MAX_PIXEL_COUNT, Palette, Region, Size};
pub use foundation::error::{AnimError, AnimResult};
pub use resize::batch::{BatchThreading, DecodedAnimation, resize_many};
pub use resize::composite::{Rgba8, expand_to_canvas, paste_masked, paste_px};
pub use resize::engine::{ResizeSettings, ResizedFrame, resize_animation, resize_animation_with};
pub use resize::pipeline::{analyze_gif, resize_gif, resize_gif_to_bytes};
pub use resize::resample::{LanczosFit, Resampler};
pub use source::frame::{Frame, FrameSeq, FrameSlice, FrameSource, PixelData};
pub use source::gif::GifFrameSource;
