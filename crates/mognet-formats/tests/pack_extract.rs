#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! End-to-end database extraction over synthetic buffers

use mognet_formats::extract::MemorySink;
use mognet_formats::pack::extract_db;
use pretty_assertions::assert_eq;

const DB_MAGIC: u8 = 0xDB;

fn align4(n: usize) -> usize {
    n.div_ceil(4) * 4
}

/// Pack with slot-relative stored offsets and the trailing boundary slot.
fn build_pack(data_type: u8, objects: &[&[u8]]) -> Vec<u8> {
    let count = objects.len();
    let identifier_len = align4(2 * count);
    let table_len = identifier_len + 4 * (count + 1);

    let mut data = vec![data_type, count as u8, 0, 0];
    for identifier in 0..count {
        data.extend_from_slice(&(identifier as u16).to_le_bytes());
    }
    data.resize(4 + identifier_len, 0);

    let mut cursor = table_len;
    for (slot, object) in objects.iter().enumerate() {
        data.extend_from_slice(&((cursor - identifier_len - 4 * slot) as u32).to_le_bytes());
        cursor += object.len();
    }
    data.extend_from_slice(&((cursor - identifier_len - 4 * count) as u32).to_le_bytes());

    for object in objects {
        data.extend_from_slice(object);
    }
    data
}

/// Database with packs laid out after the pointer table; pointers are
/// relative to their own slot.
fn build_db(packs: &[Vec<u8>]) -> Vec<u8> {
    let count = packs.len();
    let mut data = vec![DB_MAGIC, count as u8, 0, 0];

    let mut cursor = 4 + 4 * count;
    for (slot, pack) in packs.iter().enumerate() {
        data.extend_from_slice(&((cursor - (4 + 4 * slot)) as u32).to_le_bytes());
        cursor += pack.len();
    }
    for pack in packs {
        data.extend_from_slice(pack);
    }
    data
}

#[test]
fn database_with_mixed_packs_extracts_every_leaf() {
    // An odd object count exercises the identifier-table padding; a 0x1B
    // pack nests a whole database one level down.
    let textures = build_pack(0x04, &[b"texture-a", b"texture-b", b"texture-c"]);
    let nested = build_db(&[build_pack(0x0C, &[b"mesh"])]);
    let wrapper = build_pack(0x1B, &[nested.as_slice()]);
    let data = build_db(&[textures, wrapper]);

    let mut sink = MemorySink::default();
    extract_db(&data, &mut sink).unwrap();

    let paths: Vec<&str> = sink.objects.iter().map(|(path, _)| path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "000/002.tim",
            "000/001.tim",
            "000/000.tim",
            "001/000/000/000.ff9bs",
        ]
    );
    assert_eq!(sink.objects[2].1, b"texture-a");
    assert_eq!(sink.objects[3].1, b"mesh");
}

#[test]
fn database_with_type_tagged_pointers_still_locates_packs() {
    // Some revisions store a type tag in the pointer's high byte; only the
    // low 24 bits address the pack.
    let mut data = build_db(&[build_pack(0x04, &[b"tagged"])]);
    data[7] = 0x5A;

    let mut sink = MemorySink::default();
    extract_db(&data, &mut sink).unwrap();

    assert_eq!(sink.objects.len(), 1);
    assert_eq!(sink.objects[0].1, b"tagged");
}

#[test]
fn database_bad_magic_is_reported() {
    let data = [0x00u8, 1, 0, 0, 4, 0, 0, 0];
    let mut sink = MemorySink::default();
    let error = extract_db(&data, &mut sink).unwrap_err();
    assert!(error.to_string().contains("bad magic number"));
}

#[test]
fn pointer_past_the_buffer_is_reported() {
    let mut data = build_db(&[build_pack(0x04, &[b"x"])]);
    // Rewrite the only pointer to aim far outside the buffer.
    data[4..8].copy_from_slice(&0x00FF_0000u32.to_le_bytes());

    let mut sink = MemorySink::default();
    let error = extract_db(&data, &mut sink).unwrap_err();
    assert!(error.to_string().contains("is not inside"));
}
