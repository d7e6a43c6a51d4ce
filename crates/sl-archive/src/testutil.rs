//! Minimal archive builder for fixtures.
//!
//! Test-only: produces just enough of the ZIP format for the reader to
//! consume (local headers, central directory, EOCD). Not a general-purpose
//! writer.

use flate2::write::DeflateEncoder;
use flate2::{Compression, Crc};
use std::io::Write;

const LOCAL_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// One entry of a fixture archive, holding the bytes exactly as they will
/// appear in the payload region.
pub struct FixtureEntry {
    pub name: String,
    pub method: u16,
    pub payload: Vec<u8>,
    pub uncompressed_size: u32,
    pub crc32: u32,
}

impl FixtureEntry {
    /// A method-0 entry: payload is the data itself.
    pub fn stored(name: impl Into<String>, data: &[u8]) -> Self {
        Self {
            name: name.into(),
            method: 0,
            payload: data.to_vec(),
            uncompressed_size: data.len() as u32,
            crc32: crc32(data),
        }
    }

    /// A method-8 entry: payload is the raw DEFLATE stream of `data`.
    pub fn deflated(name: impl Into<String>, data: &[u8]) -> Self {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).expect("in-memory deflate");
        let payload = encoder.finish().expect("in-memory deflate");
        Self {
            name: name.into(),
            method: 8,
            payload,
            uncompressed_size: data.len() as u32,
            crc32: crc32(data),
        }
    }

    /// A directory entry (trailing slash, no payload).
    pub fn directory(name: impl Into<String>) -> Self {
        let mut name = name.into();
        if !name.ends_with('/') {
            name.push('/');
        }
        Self {
            name,
            method: 0,
            payload: Vec::new(),
            uncompressed_size: 0,
            crc32: 0,
        }
    }

    /// An entry with an arbitrary compression method and pre-encoded payload.
    pub fn with_method(
        name: impl Into<String>,
        method: u16,
        payload: Vec<u8>,
        uncompressed_size: u32,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            payload,
            uncompressed_size,
            crc32: 0,
        }
    }
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(data);
    crc.sum()
}

fn push_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Assemble a complete single-disk archive from the given entries, with an
/// optional archive comment after the EOCD record.
pub fn build_archive_with_comment(entries: &[FixtureEntry], comment: &[u8]) -> Vec<u8> {
    assert!(comment.len() <= u16::MAX as usize);

    let mut buf = Vec::new();
    let mut local_offsets = Vec::with_capacity(entries.len());

    for entry in entries {
        local_offsets.push(buf.len() as u32);
        buf.extend_from_slice(&LOCAL_SIGNATURE);
        push_u16(&mut buf, 20); // version needed
        push_u16(&mut buf, 0); // flags
        push_u16(&mut buf, entry.method);
        push_u16(&mut buf, 0); // mod time
        push_u16(&mut buf, 0); // mod date
        push_u32(&mut buf, entry.crc32);
        push_u32(&mut buf, entry.payload.len() as u32);
        push_u32(&mut buf, entry.uncompressed_size);
        push_u16(&mut buf, entry.name.len() as u16);
        push_u16(&mut buf, 0); // extra length
        buf.extend_from_slice(entry.name.as_bytes());
        buf.extend_from_slice(&entry.payload);
    }

    let cd_start = buf.len() as u32;
    for (entry, local_offset) in entries.iter().zip(&local_offsets) {
        buf.extend_from_slice(&crate::reader::CENTRAL_DIR_SIGNATURE);
        push_u16(&mut buf, 20); // version made by
        push_u16(&mut buf, 20); // version needed
        push_u16(&mut buf, 0); // flags
        push_u16(&mut buf, entry.method);
        push_u16(&mut buf, 0); // mod time
        push_u16(&mut buf, 0); // mod date
        push_u32(&mut buf, entry.crc32);
        push_u32(&mut buf, entry.payload.len() as u32);
        push_u32(&mut buf, entry.uncompressed_size);
        push_u16(&mut buf, entry.name.len() as u16);
        push_u16(&mut buf, 0); // extra length
        push_u16(&mut buf, 0); // comment length
        push_u16(&mut buf, 0); // disk number start
        push_u16(&mut buf, 0); // internal attributes
        push_u32(&mut buf, 0); // external attributes
        push_u32(&mut buf, *local_offset);
        buf.extend_from_slice(entry.name.as_bytes());
    }
    let cd_size = buf.len() as u32 - cd_start;

    buf.extend_from_slice(&crate::reader::EOCD_SIGNATURE);
    push_u16(&mut buf, 0); // disk number
    push_u16(&mut buf, 0); // central directory disk
    push_u16(&mut buf, entries.len() as u16);
    push_u16(&mut buf, entries.len() as u16);
    push_u32(&mut buf, cd_size);
    push_u32(&mut buf, cd_start);
    push_u16(&mut buf, comment.len() as u16);
    buf.extend_from_slice(comment);

    buf
}

/// Assemble a complete single-disk archive from the given entries.
pub fn build_archive(entries: &[FixtureEntry]) -> Vec<u8> {
    build_archive_with_comment(entries, b"")
}
