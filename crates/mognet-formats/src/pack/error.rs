//! Database error types

use crate::span::SpanError;
use thiserror::Error;

/// Database-specific error type
///
/// Every variant is fatal for the run. The only tolerated ambiguity is leaf
/// classification, which is a total probe and never reaches this type.
#[derive(Debug, Error)]
pub enum PackError {
    /// Database signature mismatch
    #[error("bad magic number: expected {expected:#04x}, got {actual:#04x}")]
    BadMagic {
        /// The fixed database tag byte
        expected: u8,
        /// Value found in the buffer
        actual: u8,
    },

    /// An object's adjusted offset lies past the boundary inherited from
    /// its higher-indexed sibling, so no non-negative size exists for it
    #[error("object starts at offset {start} past its boundary at offset {boundary}")]
    ObjectPastBoundary {
        /// Adjusted start offset of the object
        start: u64,
        /// Boundary offset the object must not exceed
        boundary: u64,
    },

    /// Reserved for database format revisions
    #[error("unsupported database revision {0}")]
    UnsupportedVersion(u32),

    /// Window or field-read failure while decoding
    #[error(transparent)]
    Span(#[from] SpanError),

    /// Sink failure while persisting an object
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for database operations
pub type PackResult<T> = Result<T, PackError>;
