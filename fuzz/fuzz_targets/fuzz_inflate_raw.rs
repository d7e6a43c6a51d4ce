//! Fuzz target for raw DEFLATE decoding.
//!
//! The declared size comes from the (untrusted) central directory, so both
//! the stream and the size bound are attacker-controlled.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sl_archive::inflate_raw;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte picks a size bound, the rest is the stream.
    let expected = data[0] as usize * 256;
    let _ = inflate_raw(&data[1..], expected);
});
