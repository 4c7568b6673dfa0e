//! Recursive database decoder
//!
//! Pack objects have no stored lengths; like the disc image, the walker
//! visits the offset table in strictly descending index order and threads a
//! boundary accumulator from each object's start into the size of the next
//! lower-indexed one. The accumulator seeds from the table's extra trailing
//! slot. Database pointer tables need no inference — every slot locates its
//! own pack — so they are walked forward.

use std::io::SeekFrom;
use tracing::{debug, info};

use super::error::{PackError, PackResult};
use super::header::{DbHeader, PackHeader};
use super::{DB_MAGIC, KNOWN_DATA_TYPES, ceil4};
use crate::extract::{ObjectPath, Sink};
use crate::reader;
use crate::span::Span;

/// Nesting cap for speculative recursion; the shipped archives use two
/// levels, anything deeper is dumped raw instead of walked.
const MAX_NESTING: usize = 16;

/// Decode a database file and emit every contained object into `sink`.
///
/// Fails on the first structural fault; nothing emitted before the failure
/// is retracted.
pub fn extract_db(data: &[u8], sink: &mut dyn Sink) -> PackResult<()> {
    info!(size = data.len(), "extracting database");
    parse_db(Span::new(data), &ObjectPath::new(), 0, sink)
}

/// Walk one pointer table, decoding each located pack.
fn parse_db(
    mut span: Span<'_>,
    path: &ObjectPath,
    depth: usize,
    sink: &mut dyn Sink,
) -> PackResult<()> {
    let header = DbHeader::parse(&mut span)?;
    debug!(path = %path, pointers = header.pointer_count, "database");

    for index in 0..header.pointer_count {
        let slot = reader::read_u32_le(&mut span)?;
        let offset = slot & 0x00FF_FFFF;
        let tag = (slot >> 24) as u8;
        if tag != 0 {
            debug!(index, tag, "pointer carries a type tag");
        }

        // The offset counts from the slot's own start; the span has already
        // advanced past the slot's 4 bytes.
        let mut pack = span;
        pack.seek(SeekFrom::Current(i64::from(offset) - 4))?;

        parse_pack(pack, &path.child(format!("{index:03}")), depth + 1, sink)?;
    }

    Ok(())
}

/// Walk one pack, folding the offset table backward into object sizes.
fn parse_pack(
    mut span: Span<'_>,
    path: &ObjectPath,
    depth: usize,
    sink: &mut dyn Sink,
) -> PackResult<()> {
    let header = PackHeader::parse(&mut span)?;
    let identifier_len = header.identifier_table_len();
    debug!(
        path = %path,
        data_type = header.data_type,
        objects = header.object_count,
        "pack"
    );

    let mut identifiers = span;
    identifiers.crop(SeekFrom::Current(0), identifier_len)?;

    let mut offsets = span;
    offsets.crop(
        SeekFrom::Current(identifier_len as i64),
        header.offset_table_len(),
    )?;

    // The extra trailing slot is the terminal boundary for the
    // highest-indexed object.
    offsets.seek(SeekFrom::Start(4 * u64::from(header.object_count)))?;
    let mut boundary = adjusted(
        reader::read_u32_le(&mut offsets)?,
        identifier_len,
        usize::from(header.object_count),
    );

    for index in (0..usize::from(header.object_count)).rev() {
        identifiers.seek(SeekFrom::Start(2 * index as u64))?;
        let identifier = reader::read_u16_le(&mut identifiers)?;

        offsets.seek(SeekFrom::Start(4 * index as u64))?;
        let start = adjusted(reader::read_u32_le(&mut offsets)?, identifier_len, index);

        let size = boundary
            .checked_sub(start)
            .ok_or(PackError::ObjectPastBoundary { start, boundary })?;

        // Saturate oversized requests; no real window satisfies them, so
        // the crop reports the range fault with the window bounds.
        let mut object = span;
        object.crop(
            SeekFrom::Current(start as i64),
            usize::try_from(size).unwrap_or(usize::MAX),
        )?;

        let object_path = path.child(format!("{index:03}"));
        debug!(index, identifier, start, size, "object");

        match ObjectClass::probe(&object, depth) {
            ObjectClass::Database => parse_db(object, &object_path, depth + 1, sink)?,
            ObjectClass::Pack => parse_pack(object, &object_path, depth + 1, sink)?,
            ObjectClass::Raw => {
                let named = object_path.with_suffix(leaf_extension(header.data_type));
                sink.write(&named, object.as_bytes())?;
            }
        }

        boundary = start;
    }

    Ok(())
}

/// Offsets are stored relative to their own slot; add the slot's position
/// counted from the end of the pack header to make them data-relative.
fn adjusted(stored: u32, identifier_len: usize, slot: usize) -> u64 {
    u64::from(stored) + identifier_len as u64 + 4 * slot as u64
}

/// Extension given to raw leaves, selected by the parent pack's data type.
fn leaf_extension(data_type: u8) -> String {
    match data_type {
        0x04 => ".tim".to_string(),
        0x0C => ".ff9bs".to_string(),
        0x1B => ".ff9db".to_string(),
        other => format!(".raw{other:02x}"),
    }
}

/// What a pack object turned out to be.
enum ObjectClass {
    /// Nested pointer table
    Database,
    /// Nested pack
    Pack,
    /// Terminal object, emitted as-is
    Raw,
}

impl ObjectClass {
    /// Speculative classification of a pack object from its first byte.
    ///
    /// The probe is total: anything that does not convincingly look like a
    /// nested structure — wrong tag, nonzero padding word, tables that
    /// cannot fit the window, or a window past the nesting cap — falls
    /// back to the raw category. Decode failures inside an accepted
    /// recursion stay fatal.
    fn probe(span: &Span<'_>, depth: usize) -> Self {
        if depth >= MAX_NESTING {
            return Self::Raw;
        }

        let bytes = span.as_bytes();
        if bytes.len() < 4 || u16::from_le_bytes([bytes[2], bytes[3]]) != 0 {
            return Self::Raw;
        }

        let count = usize::from(bytes[1]);
        match bytes[0] {
            DB_MAGIC if count > 0 && 4 + 4 * count <= bytes.len() => Self::Database,
            data_type
                if KNOWN_DATA_TYPES.contains(&data_type)
                    && count > 0
                    && 4 + ceil4(2 * count) + ceil4(4 * (count + 1)) <= bytes.len() =>
            {
                Self::Pack
            }
            _ => Self::Raw,
        }
    }
}
