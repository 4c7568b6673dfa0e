//! Root header and container descriptor types

use super::IMAGE_MAGIC;
use super::error::{ImageError, ImageResult};
use crate::reader;
use crate::span::Span;

/// Root header of a disc image
///
/// 16 bytes: magic (u32 BE), reserved, container_count (u32 LE), reserved.
/// The container descriptors follow immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Number of top-level container descriptors
    pub container_count: u32,
}

impl ImageHeader {
    /// Parse the root header, advancing the span past it.
    pub fn parse(span: &mut Span<'_>) -> ImageResult<Self> {
        let magic = reader::read_u32_be(span)?;
        if magic != IMAGE_MAGIC {
            return Err(ImageError::BadMagic {
                expected: IMAGE_MAGIC,
                actual: magic,
            });
        }

        let _reserved = reader::read_u32_le(span)?;
        let container_count = reader::read_u32_le(span)?;
        let _reserved = reader::read_u32_le(span)?;

        Ok(Self { container_count })
    }
}

/// What a container's entry list holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// 8-byte file entries (type 0x02)
    Files,
    /// 2-byte fragment entries (type 0x03)
    Fragments,
    /// 16-byte nested container descriptors (type 0x04)
    Containers,
}

impl ContainerKind {
    /// Map the descriptor's type word; values outside the known set are an
    /// error, since a mistyped descriptor corrupts the boundary fold of
    /// every sibling processed after it.
    pub fn from_type(value: u32) -> ImageResult<Self> {
        match value {
            0x02 => Ok(Self::Files),
            0x03 => Ok(Self::Fragments),
            0x04 => Ok(Self::Containers),
            other => Err(ImageError::UnknownContainerType(other)),
        }
    }

    /// Width of one slot in this container's entry list.
    pub fn entry_width(self) -> usize {
        match self {
            Self::Files => 8,
            Self::Fragments => 2,
            Self::Containers => 16,
        }
    }
}

/// Descriptor of one directory-like container
///
/// 16 bytes, four u32 LE fields: type, entry_count, entry_list_sector,
/// base_sector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDescriptor {
    /// Entry list interpretation
    pub kind: ContainerKind,
    /// Number of slots in the entry list
    pub entry_count: u32,
    /// Sector address of the entry list
    pub entry_list_sector: u32,
    /// Base sector added to fragment deltas
    pub base_sector: u32,
}

impl ContainerDescriptor {
    /// Parse one descriptor, advancing the span past it.
    pub fn parse(span: &mut Span<'_>) -> ImageResult<Self> {
        let kind = ContainerKind::from_type(reader::read_u32_le(span)?)?;
        let entry_count = reader::read_u32_le(span)?;
        let entry_list_sector = reader::read_u32_le(span)?;
        let base_sector = reader::read_u32_le(span)?;

        Ok(Self {
            kind,
            entry_count,
            entry_list_sector,
            base_sector,
        })
    }
}
