//! # animfit guide
//!
//! A standalone walkthrough of how animfit turns an animated image into a resized one.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Frame`](crate::Frame): one decoded frame. `size` is the animation's canvas,
//!   `update_region` is the rectangle its stored pixels cover.
//! - [`FrameSource`](crate::FrameSource): a forward-only producer of frames.
//!   `Ok(None)` means "no more frames"; errors are reserved for malformed data.
//! - [`AnimationMode`](crate::AnimationMode): `Full` when every frame covers the whole canvas,
//!   `Partial` otherwise.
//! - [`Resampler`](crate::Resampler): the scaling primitive. [`LanczosFit`](crate::LanczosFit)
//!   scales to cover the target box and crops the overflow around the center.
//! - [`ResizedFrame`](crate::ResizedFrame): one complete output canvas, RGBA8 with straight alpha.
//!
//! ---
//!
//! ## Two passes
//!
//! Classification must be known before frame 0 is resized, so the frames are walked twice:
//!
//! 1. [`classify`](crate::classify) pulls frames until one has a smaller update region
//!    (or the source runs dry).
//! 2. [`resize_animation`](crate::resize_animation) walks a *fresh* source from frame 0.
//!
//! Sources are single-pass. For GIF bytes, open two [`GifFrameSource`](crate::GifFrameSource)s;
//! for frames already in memory, use [`FrameSlice`](crate::FrameSlice) once per pass.
//! [`resize_gif`](crate::resize_gif) does both passes for you.
//!
//! ---
//!
//! ## What happens to each frame
//!
//! 1. The stored region is placed onto a transparent canvas-size RGBA image. Palette-indexed
//!    frames without a local palette use the last palette seen in this call (initially the
//!    source's global palette).
//! 2. The canvas-size image is aspect-filled to the target with Lanczos3.
//! 3. In `Full` mode that image is the output frame.
//!    In `Partial` mode it is pasted (source-over) onto the one persistent output canvas, and a
//!    copy of the canvas becomes the output frame. Pixels the frame leaves transparent keep
//!    whatever earlier frames put there.
//!
//! ---
//!
//! ## Errors
//!
//! All failures are [`AnimError`](crate::AnimError) values and abort the whole call:
//!
//! - `Decode`: malformed container or frame data, with the 0-based frame index when known
//! - `InvalidParameters`: zero target dimensions, zero thread count, bad encoder options
//! - `Resampling`: the resampler or compositor failed, with the frame index
//! - `Encode`: the output could not be serialized (e.g. GIF dimensions above 65535)
//!
//! Targets are validated before any frame is pulled.
//!
//! ---
//!
//! ## Many targets at once
//!
//! [`resize_many`](crate::resize_many) runs one independent engine per target over a shared,
//! immutable frame slice, on a rayon pool when [`BatchThreading::parallel`](crate::BatchThreading)
//! is set. Results come back in target order.
//!
//! ---
//!
//! ## Logging
//!
//! Entry points are `tracing` spans; per-frame progress is emitted at `debug`. Install any
//! subscriber (e.g. `tracing-subscriber`'s fmt layer) to see it.
