//! Central-directory walk over an in-memory archive.
//!
//! The End-Of-Central-Directory record anchors the parse: it is found by
//! scanning backward over the trailing comment window, and points at the
//! Central Directory, whose records in turn point at each entry's Local File
//! Header and payload.

use crate::cursor;
use crate::error::{ArchiveError, Result};
use crate::inflate::inflate_raw;
use tracing::{debug, warn};

/// End-Of-Central-Directory signature (`PK\x05\x06`).
pub const EOCD_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];

/// Central Directory file header signature (`PK\x01\x02`).
pub const CENTRAL_DIR_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x01, 0x02];

/// Fixed part of the EOCD record.
const EOCD_LEN: usize = 22;

/// EOCD offset plus the maximum archive comment (65535 bytes) bounds the
/// backward scan.
const EOCD_SEARCH_WINDOW: usize = EOCD_LEN + u16::MAX as usize;

/// Fixed part of a Central Directory record.
const CENTRAL_DIR_HEADER_LEN: usize = 46;

/// Fixed part of a Local File Header.
const LOCAL_HEADER_LEN: usize = 30;

/// Compression methods the reader can decode.
const METHOD_STORED: u16 = 0;
const METHOD_DEFLATE: u16 = 8;

/// How to react to a structurally inconsistent Central Directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Fail the whole parse on the first inconsistency.
    #[default]
    Strict,
    /// Legacy behavior: stop walking and return the entries parsed so far.
    Lenient,
}

/// Whether an entry names a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One archive entry, decoded.
///
/// `payload` is `None` for directories and for file entries whose
/// compression method is unsupported or whose stream failed to decode.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Path within the archive, as recorded (forward slashes).
    pub path: String,
    /// File or directory.
    pub kind: EntryKind,
    /// Decompressed bytes, when available.
    pub payload: Option<Vec<u8>>,
}

/// Fields of one Central Directory record. Transient: lives only for the
/// duration of a parse.
struct CentralDirectoryRecord {
    path: String,
    compression_method: u16,
    compressed_size: usize,
    uncompressed_size: usize,
    local_header_offset: usize,
    advance: usize,
}

/// Parse an archive, failing fast on any structural inconsistency.
pub fn parse(buffer: &[u8]) -> Result<Vec<ArchiveEntry>> {
    parse_with_mode(buffer, ParseMode::Strict)
}

/// Parse an archive with an explicit [`ParseMode`].
pub fn parse_with_mode(buffer: &[u8], mode: ParseMode) -> Result<Vec<ArchiveEntry>> {
    let eocd = find_eocd(buffer)?;
    let entry_count = cursor::read_u16_le(buffer, eocd + 10)? as usize;
    let cd_offset = cursor::read_u32_le(buffer, eocd + 16)? as usize;

    debug!(entry_count, cd_offset, eocd, "walking central directory");

    let mut entries = Vec::with_capacity(entry_count);
    let mut offset = cd_offset;

    for index in 0..entry_count {
        let record = match read_central_record(buffer, offset, index) {
            Ok(record) => record,
            Err(err) => match mode {
                ParseMode::Strict => return Err(err),
                ParseMode::Lenient => {
                    warn!(index, error = %err, "central directory inconsistent, stopping walk");
                    break;
                }
            },
        };

        offset += record.advance;

        if record.path.ends_with('/') {
            entries.push(ArchiveEntry {
                path: record.path,
                kind: EntryKind::Directory,
                payload: None,
            });
            continue;
        }

        let payload = match locate_payload(buffer, &record) {
            Ok(data) => decode_payload(&record, data),
            Err(err) => match mode {
                ParseMode::Strict => return Err(err),
                ParseMode::Lenient => {
                    warn!(path = %record.path, error = %err, "entry data out of range, stopping walk");
                    break;
                }
            },
        };

        entries.push(ArchiveEntry {
            path: record.path,
            kind: EntryKind::File,
            payload,
        });
    }

    debug!(entries = entries.len(), "archive parsed");
    Ok(entries)
}

/// Scan backward for the EOCD signature, from `len - 22` down to
/// `max(0, len - 65557)`.
fn find_eocd(buffer: &[u8]) -> Result<usize> {
    if buffer.len() < EOCD_LEN {
        return Err(ArchiveError::TooSmall { len: buffer.len() });
    }

    let floor = buffer.len().saturating_sub(EOCD_SEARCH_WINDOW);
    let mut offset = buffer.len() - EOCD_LEN;
    loop {
        if buffer[offset..offset + 4] == EOCD_SIGNATURE {
            return Ok(offset);
        }
        if offset == floor {
            return Err(ArchiveError::NoEocd);
        }
        offset -= 1;
    }
}

fn read_central_record(
    buffer: &[u8],
    offset: usize,
    index: usize,
) -> Result<CentralDirectoryRecord> {
    let signature = cursor::read_slice(buffer, offset, 4)?;
    if signature != CENTRAL_DIR_SIGNATURE {
        return Err(ArchiveError::CorruptCentralDirectory(format!(
            "bad signature for entry {index} at offset {offset}"
        )));
    }

    let compression_method = cursor::read_u16_le(buffer, offset + 10)?;
    let compressed_size = cursor::read_u32_le(buffer, offset + 20)? as usize;
    let uncompressed_size = cursor::read_u32_le(buffer, offset + 24)? as usize;
    let name_len = cursor::read_u16_le(buffer, offset + 28)? as usize;
    let extra_len = cursor::read_u16_le(buffer, offset + 30)? as usize;
    let comment_len = cursor::read_u16_le(buffer, offset + 32)? as usize;
    let local_header_offset = cursor::read_u32_le(buffer, offset + 42)? as usize;

    let name_bytes = cursor::read_slice(buffer, offset + CENTRAL_DIR_HEADER_LEN, name_len)?;
    let path = String::from_utf8_lossy(name_bytes).into_owned();

    // The declared extra and comment regions must lie inside the buffer too;
    // a record claiming more than exists is corrupt, not short.
    cursor::read_slice(
        buffer,
        offset + CENTRAL_DIR_HEADER_LEN + name_len,
        extra_len + comment_len,
    )?;

    Ok(CentralDirectoryRecord {
        path,
        compression_method,
        compressed_size,
        uncompressed_size,
        local_header_offset,
        advance: CENTRAL_DIR_HEADER_LEN + name_len + extra_len + comment_len,
    })
}

/// Resolve the payload slice behind a record's Local File Header.
fn locate_payload<'a>(buffer: &'a [u8], record: &CentralDirectoryRecord) -> Result<&'a [u8]> {
    let lho = record.local_header_offset;
    let name_len = cursor::read_u16_le(buffer, lho + 26)? as usize;
    let extra_len = cursor::read_u16_le(buffer, lho + 28)? as usize;
    let data_start = lho + LOCAL_HEADER_LEN + name_len + extra_len;
    Ok(cursor::read_slice(buffer, data_start, record.compressed_size)?)
}

/// Decode a payload slice per the entry's compression method. Failures are
/// entry-scoped: the entry stays listed, without payload.
fn decode_payload(record: &CentralDirectoryRecord, data: &[u8]) -> Option<Vec<u8>> {
    match record.compression_method {
        METHOD_STORED => Some(data.to_vec()),
        METHOD_DEFLATE => match inflate_raw(data, record.uncompressed_size) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(path = %record.path, error = %err, "entry failed to decompress");
                None
            }
        },
        method => {
            warn!(path = %record.path, method, "unsupported compression method");
            None
        }
    }
}
