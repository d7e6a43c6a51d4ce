//! Bounds-checked little-endian reads over an in-memory buffer.
//!
//! Every read is a total function: an offset past the buffer end yields
//! [`TruncatedData`] instead of a panic. Archive parsing never indexes the
//! buffer directly.

use thiserror::Error;

/// A read would run past the end of the buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("truncated data: need {wanted} bytes at offset {offset}, buffer holds {len}")]
pub struct TruncatedData {
    /// Offset the read started at.
    pub offset: usize,
    /// Bytes the read needed.
    pub wanted: usize,
    /// Total buffer length.
    pub len: usize,
}

fn check(buf: &[u8], offset: usize, wanted: usize) -> Result<(), TruncatedData> {
    let end = offset.checked_add(wanted);
    match end {
        Some(end) if end <= buf.len() => Ok(()),
        _ => Err(TruncatedData {
            offset,
            wanted,
            len: buf.len(),
        }),
    }
}

/// Read a little-endian u16 at `offset`.
pub fn read_u16_le(buf: &[u8], offset: usize) -> Result<u16, TruncatedData> {
    check(buf, offset, 2)?;
    Ok(u16::from_le_bytes([buf[offset], buf[offset + 1]]))
}

/// Read a little-endian u32 at `offset`.
pub fn read_u32_le(buf: &[u8], offset: usize) -> Result<u32, TruncatedData> {
    check(buf, offset, 4)?;
    Ok(u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

/// Borrow `len` bytes starting at `offset`.
pub fn read_slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], TruncatedData> {
    check(buf, offset, len)?;
    Ok(&buf[offset..offset + len])
}
