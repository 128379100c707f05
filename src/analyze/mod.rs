//! Frame-storage classification.

pub(crate) mod mode;
