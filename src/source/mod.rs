//! Decoded frame model and the pull-based sources that produce it.

pub(crate) mod frame;
pub(crate) mod gif;
