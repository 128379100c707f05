/// Convenience result type used across animfit.
pub type AnimResult<T> = Result<T, AnimError>;

/// Top-level error taxonomy for analysis, resizing and re-encoding.
///
/// Every variant aborts the current call; bad frames are never skipped or retried.
#[derive(thiserror::Error, Debug)]
pub enum AnimError {
    /// Malformed or truncated source frame data.
    #[error("decode error{}: {message}", frame_suffix(.frame))]
    Decode {
        /// 0-based source frame index, `None` when the container itself is unreadable.
        frame: Option<usize>,
        /// Human-readable cause.
        message: String,
    },

    /// Rejected caller input (target size, thread count, ...).
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The resampling or compositing step failed.
    #[error("resampling failure{}: {message}", frame_suffix(.frame))]
    Resampling {
        /// 0-based source frame index, when known.
        frame: Option<usize>,
        /// Human-readable cause.
        message: String,
    },

    /// Serializing output frames failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn frame_suffix(frame: &Option<usize>) -> String {
    match frame {
        Some(idx) => format!(" at frame {idx}"),
        None => String::new(),
    }
}

impl AnimError {
    /// Build an [`AnimError::Decode`] value.
    pub fn decode(frame: Option<usize>, msg: impl Into<String>) -> Self {
        Self::Decode {
            frame,
            message: msg.into(),
        }
    }

    /// Build an [`AnimError::InvalidParameters`] value.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Build an [`AnimError::Resampling`] value.
    pub fn resampling(frame: Option<usize>, msg: impl Into<String>) -> Self {
        Self::Resampling {
            frame,
            message: msg.into(),
        }
    }

    /// Build an [`AnimError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Source frame index the failure is attributed to, if any.
    pub fn frame(&self) -> Option<usize> {
        match self {
            Self::Decode { frame, .. } | Self::Resampling { frame, .. } => *frame,
            _ => None,
        }
    }

    /// Attach a frame index to decode/resampling errors that were raised without one.
    pub(crate) fn at_frame(self, idx: usize) -> Self {
        match self {
            Self::Decode {
                frame: None,
                message,
            } => Self::Decode {
                frame: Some(idx),
                message,
            },
            Self::Resampling {
                frame: None,
                message,
            } => Self::Resampling {
                frame: Some(idx),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
