/// Convenience result type used across swblend.
pub type BlendResult<T> = Result<T, BlendError>;

/// Top-level error taxonomy used by blending APIs.
///
/// Every check that can produce one of these runs before the first destination pixel is
/// written, so a failed call leaves the destination untouched.
#[derive(thiserror::Error, Debug)]
pub enum BlendError {
    /// The backend does not implement this format or byte-width combination.
    ///
    /// Callers are expected to retry with the scalar reference backend.
    #[error("unsupported combination: {combination} ({backend} backend)")]
    Unsupported {
        /// Name of the backend that rejected the call.
        backend: &'static str,
        /// Human-readable `source -> destination` description.
        combination: String,
    },

    /// Two regions that must agree in size do not.
    #[error("geometry mismatch: {0}")]
    GeometryMismatch(String),

    /// A malformed view, descriptor or format tag.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid blender configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlendError {
    /// Build a [`BlendError::Unsupported`] value.
    pub fn unsupported(backend: &'static str, combination: impl Into<String>) -> Self {
        Self::Unsupported {
            backend,
            combination: combination.into(),
        }
    }

    /// Build a [`BlendError::GeometryMismatch`] value.
    pub fn geometry_mismatch(msg: impl Into<String>) -> Self {
        Self::GeometryMismatch(msg.into())
    }

    /// Build a [`BlendError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`BlendError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether a caller should retry this call on a generic implementation.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
