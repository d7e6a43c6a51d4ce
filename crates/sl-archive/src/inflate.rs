//! Raw (headerless) DEFLATE decompression.
//!
//! ZIP entries with compression method 8 carry a bare DEFLATE stream, no
//! zlib or gzip wrapper. Method 0 ("stored") is a byte-identity passthrough
//! and is handled by the reader directly.

use crate::error::DecompressError;
use flate2::{Decompress, FlushDecompress, Status};

/// Decompress a raw DEFLATE stream whose uncompressed size is known.
///
/// The declared size is a contract, not a hint: the stream must terminate and
/// decode to exactly `expected_size` bytes. A truncated, overlong or corrupt
/// stream is an error rather than a silently-accepted partial buffer.
pub fn inflate_raw(compressed: &[u8], expected_size: usize) -> Result<Vec<u8>, DecompressError> {
    // One spare byte so an overlong stream is observable as out.len() >
    // expected_size instead of stalling on a full buffer.
    let mut out = Vec::with_capacity(expected_size + 1);
    let mut decoder = Decompress::new(false);

    loop {
        let consumed = decoder.total_in() as usize;
        let produced = decoder.total_out();
        let status = decoder.decompress_vec(
            &compressed[consumed..],
            &mut out,
            FlushDecompress::Finish,
        )?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                if out.len() > expected_size {
                    return Err(DecompressError::SizeMismatch {
                        expected: expected_size,
                        actual: out.len(),
                    });
                }
                // No forward progress means the input ran out before the
                // final block.
                if decoder.total_in() as usize == consumed && decoder.total_out() == produced {
                    return Err(DecompressError::Incomplete);
                }
            }
        }
    }

    if out.len() != expected_size {
        return Err(DecompressError::SizeMismatch {
            expected: expected_size,
            actual: out.len(),
        });
    }

    Ok(out)
}
