//! Unified error type for the retro-quant public API.
//!
//! [`ConvertError`] covers every failure the conversion core can report.
//! The core is deterministic, so a failing input always fails the same way;
//! nothing here is retried internally.

use thiserror::Error;

use crate::palette::ParseColorError;

/// Error type for all conversion operations.
///
/// # Example
///
/// ```
/// use retro_quant::{build_palette, ConvertError};
///
/// let err = build_palette(&[], 8, 0).unwrap_err();
/// assert!(matches!(err, ConvertError::InvalidInput(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Input violates a precondition: empty pixel set, zero dimensions,
    /// zero palette size, mismatched row lengths, zero block size.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An implementation ceiling on raster or palette size was exceeded.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// A palette color string could not be parsed.
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}

impl ConvertError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ConvertError::InvalidInput(msg.into())
    }

    pub(crate) fn exhausted(msg: impl Into<String>) -> Self {
        ConvertError::ResourceExhausted(msg.into())
    }
}
