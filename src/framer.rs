//! Newline-delimited serial framer.
//!
//! The sensor MCU emits ASCII records terminated by `\n` or `\r`. The UART
//! is inherently byte-oriented, so the framer accepts one byte at a time
//! and yields a [`Frame`] whenever a delimiter closes a non-empty
//! accumulator. Repeated delimiters (`\r\n` line endings, idle keepalives)
//! produce nothing.
//!
//! The accumulator is a fixed-capacity buffer: a record longer than
//! [`MAX_FRAME_LEN`] content bytes is a framing error. The oversized
//! record is discarded whole, never truncated and kept, and framing
//! resumes after the next delimiter. The stream is unbounded; the framer's
//! memory is not.

use heapless::Vec;
use log::warn;

use crate::error::FramingError;

/// Maximum content bytes per frame, delimiter excluded.
pub const MAX_FRAME_LEN: usize = 63;

/// A complete, delimiter-bounded record extracted from the byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_LEN>,
}

impl Frame {
    /// Raw content bytes (delimiter excluded).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content as UTF-8, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
impl Frame {
    /// Build a frame directly, for parser tests.
    pub(crate) fn from_slice(content: &[u8]) -> Self {
        Self {
            bytes: Vec::from_slice(content).expect("test frame within bound"),
        }
    }
}

/// Streaming line framer. Owns exactly one accumulator; single-threaded.
pub struct LineFramer {
    acc: Vec<u8, MAX_FRAME_LEN>,
    /// Set on overflow; the remainder of the oversized record is skipped
    /// until the next delimiter so a partial tail is never emitted.
    discarding: bool,
}

impl LineFramer {
    pub fn new() -> Self {
        Self {
            acc: Vec::new(),
            discarding: false,
        }
    }

    /// Feed one byte.
    ///
    /// Returns a completed [`Frame`] when `byte` is a delimiter closing a
    /// non-empty accumulator. An overflowing record is discarded whole and
    /// logged; the source keeps transmitting regardless, so there is no
    /// error to propagate and no backpressure to apply.
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        if byte == b'\n' || byte == b'\r' {
            if self.discarding {
                self.discarding = false;
                return None;
            }
            if self.acc.is_empty() {
                return None;
            }
            let bytes = core::mem::take(&mut self.acc);
            return Some(Frame { bytes });
        }

        if self.discarding {
            return None;
        }

        if self.acc.push(byte).is_err() {
            warn!(
                "{}: dropping {} buffered bytes",
                FramingError::Overflow,
                self.acc.len()
            );
            self.acc.clear();
            self.discarding = true;
        }
        None
    }

    /// Bytes currently buffered waiting for a delimiter.
    pub fn pending(&self) -> usize {
        self.acc.len()
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}
