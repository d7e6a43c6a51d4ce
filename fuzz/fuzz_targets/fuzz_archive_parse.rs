//! Fuzz target for the ZIP subset reader.
//!
//! Archives arrive from other devices and the web app, so the parser must
//! reject arbitrary bytes with an error, never a panic or an out-of-range
//! read.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sl_archive::{parse_with_mode, ParseMode};

fuzz_target!(|data: &[u8]| {
    let _ = parse_with_mode(data, ParseMode::Strict);
    let _ = parse_with_mode(data, ParseMode::Lenient);
});
