//! Disc-image error types

use crate::span::SpanError;
use thiserror::Error;

/// Disc-image-specific error type
///
/// Every variant is fatal for the run: a malformed descriptor invalidates
/// the size of every lower-indexed entry computed after it.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Root signature mismatch
    #[error("bad magic number: expected {expected:#010x}, got {actual:#010x}")]
    BadMagic {
        /// The fixed root signature
        expected: u32,
        /// Value found in the buffer
        actual: u32,
    },

    /// Container descriptor type outside the known set
    #[error("unknown container type {0:#06x}")]
    UnknownContainerType(u32),

    /// An entry's start sector lies past the boundary inherited from its
    /// higher-indexed sibling, so no non-negative size exists for it
    #[error("entry starts at sector {start} past its boundary at sector {boundary}")]
    EntryPastBoundary {
        /// Start sector decoded for the entry
        start: u64,
        /// Boundary sector the entry must not exceed
        boundary: u64,
    },

    /// Reserved for disc-image format revisions
    #[error("unsupported disc-image revision {0}")]
    UnsupportedVersion(u32),

    /// Window or field-read failure while decoding
    #[error(transparent)]
    Span(#[from] SpanError),

    /// Sink failure while persisting an object
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for disc-image operations
pub type ImageResult<T> = Result<T, ImageError>;
