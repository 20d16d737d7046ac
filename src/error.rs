//! Error types for grid estimation and resampling

use thiserror::Error;

/// Error raised when grid inputs are out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// An image or output dimension is zero or negative
    #[error("Invalid {what}: {value} (must be a positive integer)")]
    InvalidDimension { what: &'static str, value: i64 },
    /// Cell size or offsets violate `0 <= offset < cell_size`
    #[error("Invalid grid: {reason}")]
    InvalidGrid { reason: String },
    /// Pixel buffer length does not match `width * height * 4`
    #[error("Pixel buffer holds {actual} bytes, expected {expected} for the given dimensions")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

impl GridError {
    pub(crate) fn dimension(what: &'static str, value: i64) -> Self {
        GridError::InvalidDimension { what, value }
    }

    pub(crate) fn grid(reason: impl Into<String>) -> Self {
        GridError::InvalidGrid { reason: reason.into() }
    }
}
