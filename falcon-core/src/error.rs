/// Errors raised while building geometry
use thiserror::Error;

/// Result type for geometry construction.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur while generating, sculpting or patching meshes.
///
/// Construction is deterministic, so none of these are retryable: the same
/// input fails the same way every time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A size, radius or segment count was non-positive, or a vertex index
    /// was out of range.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// A mesh does not have the index layout an operation expects.
    #[error("Structural mismatch: {message}")]
    StructuralMismatch { message: String },
}

impl GeometryError {
    /// Creates an invalid parameter error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a structural mismatch error.
    pub fn mismatch(message: impl Into<String>) -> Self {
        Self::StructuralMismatch {
            message: message.into(),
        }
    }
}

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &str, value: f32) -> GeometryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}
