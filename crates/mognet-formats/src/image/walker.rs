//! Recursive disc-image decoder
//!
//! Entries store a start sector and nothing else, so the distance to the
//! *next processed* start is the only size signal available. Each level
//! therefore walks its slots in strictly descending index order and threads
//! a boundary accumulator from the result of entry `i+1` into the
//! processing of entry `i`: the first (highest-indexed) entry is bounded by
//! the extent the parent already knows, every later one by the start of the
//! sibling just processed. The accumulator travels by value through return
//! values; there is no shared mutable state.

use std::io::SeekFrom;
use tracing::{debug, info};

use super::error::{ImageError, ImageResult};
use super::header::{ContainerDescriptor, ContainerKind, ImageHeader};
use super::{FRAGMENT_ABSENT, SECTOR_SIZE};
use crate::extract::{ObjectPath, Sink};
use crate::pack::DB_MAGIC;
use crate::reader;
use crate::span::Span;

/// Decode a disc image and emit every contained object into `sink`.
///
/// Fails on the first structural fault; nothing emitted before the failure
/// is retracted.
pub fn extract_image(data: &[u8], sink: &mut dyn Sink) -> ImageResult<()> {
    let mut root = Span::new(data);
    let header = ImageHeader::parse(&mut root)?;
    info!(containers = header.container_count, "extracting disc image");

    // The highest-indexed container has no processed sibling to bound it;
    // the image's own extent in sectors seeds the fold.
    let mut boundary = (root.len() / SECTOR_SIZE) as u64;

    for index in (0..header.container_count).rev() {
        let mut descriptor = root;
        descriptor.seek(SeekFrom::Current(16 * i64::from(index)))?;

        let path = ObjectPath::new().child(format!("{index:02}"));
        boundary = parse_container(descriptor, &path, boundary, sink)?;
    }

    Ok(())
}

/// Decode one container and return the boundary sector its lower-indexed
/// sibling at the parent level is bounded by.
fn parse_container(
    mut span: Span<'_>,
    path: &ObjectPath,
    mut boundary: u64,
    sink: &mut dyn Sink,
) -> ImageResult<u64> {
    let descriptor = ContainerDescriptor::parse(&mut span)?;
    debug!(
        path = %path,
        kind = ?descriptor.kind,
        entries = descriptor.entry_count,
        list_sector = descriptor.entry_list_sector,
        base_sector = descriptor.base_sector,
        "container"
    );

    span.seek(SeekFrom::Start(
        u64::from(descriptor.entry_list_sector) * SECTOR_SIZE as u64,
    ))?;

    for index in (0..descriptor.entry_count).rev() {
        let mut entry = span;
        entry.seek(SeekFrom::Current(
            descriptor.kind.entry_width() as i64 * i64::from(index),
        ))?;
        let entry_path = path.child(format!("{index:03}"));

        boundary = match descriptor.kind {
            ContainerKind::Files => parse_file_entry(entry, &entry_path, boundary, sink)?,
            ContainerKind::Fragments => {
                parse_fragment_entry(entry, &entry_path, descriptor.base_sector, boundary, sink)?
            }
            ContainerKind::Containers => parse_container(entry, &entry_path, boundary, sink)?,
        };
    }

    Ok(match descriptor.kind {
        // A container of containers bounds its successor with its own
        // extent; the others with their base sector.
        ContainerKind::Containers => (span.len() / SECTOR_SIZE) as u64,
        ContainerKind::Files | ContainerKind::Fragments => u64::from(descriptor.base_sector),
    })
}

/// 8-byte file entry: id, reserved, start sector.
fn parse_file_entry(
    mut span: Span<'_>,
    path: &ObjectPath,
    boundary: u64,
    sink: &mut dyn Sink,
) -> ImageResult<u64> {
    let id = reader::read_u16_le(&mut span)?;
    let _reserved = reader::read_u16_le(&mut span)?;
    let start = u64::from(reader::read_u32_le(&mut span)?);

    let data = object_range(span, start, boundary)?;
    let named = path.with_suffix(probe_suffix(&data));
    debug!(id, start_sector = start, size = data.len(), path = %named, "file entry");
    sink.write(&named, data.as_bytes())?;

    Ok(start)
}

/// 2-byte fragment entry: sector delta from the container's base sector,
/// or the absent sentinel.
fn parse_fragment_entry(
    mut span: Span<'_>,
    path: &ObjectPath,
    base_sector: u32,
    boundary: u64,
    sink: &mut dyn Sink,
) -> ImageResult<u64> {
    let delta = reader::read_u16_le(&mut span)?;
    if delta == FRAGMENT_ABSENT {
        // Absent slot: nothing to emit, and the boundary flows through to
        // the next lower-indexed entry untouched.
        return Ok(boundary);
    }

    // A delta of zero is a real entry starting exactly at the base sector;
    // only the all-ones sentinel marks absence.
    let start = u64::from(base_sector) + u64::from(delta);
    let data = object_range(span, start, boundary)?;
    let named = path.with_suffix(probe_suffix(&data));
    debug!(delta, start_sector = start, size = data.len(), path = %named, "fragment entry");
    sink.write(&named, data.as_bytes())?;

    Ok(start)
}

/// Crop the sector run `[start, boundary)` out of the entry's window.
fn object_range(mut span: Span<'_>, start: u64, boundary: u64) -> ImageResult<Span<'_>> {
    let sectors = boundary
        .checked_sub(start)
        .ok_or(ImageError::EntryPastBoundary { start, boundary })?;

    // Saturate oversized requests; no real window satisfies them, so the
    // crop reports the range fault with the window bounds.
    let len = usize::try_from(sectors * SECTOR_SIZE as u64).unwrap_or(usize::MAX);
    span.crop(SeekFrom::Start(start * SECTOR_SIZE as u64), len)?;
    Ok(span)
}

/// Leaf type probe: a database payload opens with the 0xDB tag byte;
/// anything else, an empty window included, is dumped as raw.
fn probe_suffix(span: &Span<'_>) -> &'static str {
    match span.as_bytes().first() {
        Some(&DB_MAGIC) => ".ff9db",
        _ => ".raw",
    }
}
