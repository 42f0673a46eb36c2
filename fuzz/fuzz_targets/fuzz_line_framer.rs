//! Fuzz target: `LineFramer::feed`
//!
//! Drives arbitrary byte sequences into the framer one byte at a time and
//! asserts that it never panics, never yields an empty or oversized frame,
//! and never emits content containing a delimiter.
//!
//! cargo fuzz run fuzz_line_framer

#![no_main]

use alarmbridge::framer::{LineFramer, MAX_FRAME_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut framer = LineFramer::new();

    for &byte in data {
        if let Some(frame) = framer.feed(byte) {
            assert!(!frame.is_empty(), "framer must not yield empty frames");
            assert!(
                frame.len() <= MAX_FRAME_LEN,
                "frame exceeds maximum content length"
            );
            assert!(
                !frame.as_bytes().contains(&b'\n') && !frame.as_bytes().contains(&b'\r'),
                "frame content must not include delimiters"
            );
        }
    }

    // Whatever is left buffered is within the bound.
    assert!(framer.pending() <= MAX_FRAME_LEN);
});
