//! Unified error types for the bridge daemon.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! dispatcher's error handling uniform. Framing and parse errors are `Copy`
//! so they can be passed around the hot loop without allocation; sink errors
//! carry the underlying I/O error for the log line.

use std::fmt;
use std::io;

// ---------------------------------------------------------------------------
// Top-level bridge error
// ---------------------------------------------------------------------------

/// Every fallible operation in the daemon funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// The serial framer overran its accumulator.
    Framing(FramingError),
    /// A completed frame did not match the sensor record pattern.
    Parse(ParseError),
    /// The JSON sink could not persist a payload.
    SinkWrite(io::Error),
    /// The initial clock resync failed; the process must not start.
    StartupSync(String),
    /// A platform adapter could not be brought up (UART, GPIO interrupt).
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Framing(e) => write!(f, "framing: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::SinkWrite(e) => write!(f, "sink write: {e}"),
            Self::StartupSync(msg) => write!(f, "startup sync: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Framing errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingError {
    /// A frame exceeded the maximum content length before a delimiter
    /// arrived. The accumulator is discarded and framing continues.
    Overflow,
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "frame exceeded maximum length"),
        }
    }
}

impl From<FramingError> for Error {
    fn from(e: FramingError) -> Self {
        Self::Framing(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The record did not contain exactly three pipe-delimited fields.
    FieldCountMismatch,
    /// A field was present but not a valid number.
    MalformedNumber,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCountMismatch => write!(f, "field count mismatch"),
            Self::MalformedNumber => write!(f, "malformed number"),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::SinkWrite(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, Error>;
