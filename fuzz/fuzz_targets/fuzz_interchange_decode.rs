//! Fuzz target for interchange JSON decoding.
//!
//! Malformed payloads must fail with a decode error; record-level recovery
//! must not panic on odd field values.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sl_interchange::decode_batch;

fuzz_target!(|data: &[u8]| {
    let _ = decode_batch(data, None, &[]);
});
