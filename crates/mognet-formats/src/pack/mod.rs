//! Database archive format (`.ff9db`)
//!
//! Two mutually recursive structures. A *database* is a flat pointer table:
//! each 4-byte slot locates a pack relative to the slot's own position, with
//! the high byte carrying a type tag in some format revisions. A *pack* is a
//! typed sequence of objects addressed by an implicit offset table — object
//! lengths are not stored, so the same descending-order boundary fold as the
//! disc image recovers them, seeded from the one extra trailing offset slot.
//!
//! # Format Structure
//!
//! ```text
//! Database:
//! ├── header (4 bytes)
//! │   ├── magic 0xDB (u8)
//! │   ├── pointer_count (u8)
//! │   └── padding (u16 LE, 0x0000)
//! └── pointer slots (pointer_count × u32 LE)
//!     ├── low 24 bits: pack offset, relative to the slot's own start
//!     └── high byte: type tag (revision-dependent, not needed to locate)
//!
//! Pack:
//! ├── header (4 bytes)
//! │   ├── data_type (u8: 0x04 TIM, 0x0C model, 0x1B database, ...)
//! │   ├── object_count (u8)
//! │   └── padding (u16 LE, 0x0000)
//! ├── identifier table (object_count × u16 LE, padded to 4 bytes)
//! ├── offset table ((object_count + 1) × u32 LE, padded to 4 bytes)
//! │   └── the extra trailing slot is the terminal boundary
//! └── object data
//! ```
//!
//! Stored pack offsets are relative to their own slot's position counted
//! from the end of the pack header.

/// Database error types
pub mod error;
mod header;
mod walker;

pub use error::{PackError, PackResult};
pub use header::{DbHeader, PackHeader};
pub use walker::extract_db;

/// Database signature byte.
pub const DB_MAGIC: u8 = 0xDB;

/// Pack data types whose raw leaves have a dedicated extension; also the
/// set the nested-pack probe recognizes.
pub(crate) const KNOWN_DATA_TYPES: [u8; 3] = [0x04, 0x0C, 0x1B];

/// Round up to the next multiple of four, the alignment of both pack
/// tables.
pub(crate) fn ceil4(n: usize) -> usize {
    n.div_ceil(4) * 4
}
