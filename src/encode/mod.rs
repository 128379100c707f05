//! Re-encoding of resized frames.

pub(crate) mod gif;
