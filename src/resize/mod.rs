//! Resampling, compositing and the per-animation resize engine.

pub(crate) mod batch;
pub(crate) mod composite;
pub(crate) mod engine;
pub(crate) mod pipeline;
pub(crate) mod resample;
