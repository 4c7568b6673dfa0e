//! Pack and database header types

use super::error::{PackError, PackResult};
use super::{DB_MAGIC, ceil4};
use crate::reader;
use crate::span::Span;

/// 4-byte pack header: data type, object count, padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackHeader {
    /// Type of the contained objects; selects the raw-leaf extension
    pub data_type: u8,
    /// Number of objects in the pack
    pub object_count: u8,
}

impl PackHeader {
    /// Parse the header, advancing the span past it.
    pub fn parse(span: &mut Span<'_>) -> PackResult<Self> {
        let data_type = reader::read_u8(span)?;
        let object_count = reader::read_u8(span)?;
        let _padding = reader::read_u16_le(span)?;

        Ok(Self {
            data_type,
            object_count,
        })
    }

    /// Identifier table length: one u16 per object, aligned to 4 bytes.
    pub fn identifier_table_len(&self) -> usize {
        ceil4(2 * usize::from(self.object_count))
    }

    /// Offset table length: one u32 per object plus the trailing boundary
    /// slot, aligned to 4 bytes.
    pub fn offset_table_len(&self) -> usize {
        ceil4(4 * (usize::from(self.object_count) + 1))
    }
}

/// 4-byte database header: magic, pointer count, padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbHeader {
    /// Number of pointer slots following the header
    pub pointer_count: u8,
}

impl DbHeader {
    /// Parse the header, advancing the span past it.
    pub fn parse(span: &mut Span<'_>) -> PackResult<Self> {
        let magic = reader::read_u8(span)?;
        if magic != DB_MAGIC {
            return Err(PackError::BadMagic {
                expected: DB_MAGIC,
                actual: magic,
            });
        }

        let pointer_count = reader::read_u8(span)?;
        let _padding = reader::read_u16_le(span)?;

        Ok(Self { pointer_count })
    }
}
