//! Port traits — the boundary between the dispatcher core and the outside
//! world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Dispatcher (domain)
//! ```
//!
//! Driven adapters (UART, filesystem, system clock) implement these traits.
//! The [`Dispatcher`](super::dispatcher::Dispatcher) consumes them via
//! generics, so the core never touches `/dev` or the filesystem directly.

use std::io;

use crate::error::Error;

// ───────────────────────────────────────────────────────────────
// Serial byte source (driven adapter: UART → domain)
// ───────────────────────────────────────────────────────────────

/// Non-blocking, byte-oriented serial input.
///
/// The dispatcher calls each method at most once per iteration; neither
/// may block. `read_byte` after a positive `bytes_available` may still
/// return `None` if the byte vanished (adapter-level read error) — the
/// dispatcher treats that as "nothing arrived".
pub trait SerialPort {
    fn bytes_available(&mut self) -> bool;
    fn read_byte(&mut self) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// JSON sink (driven adapter: domain → filesystem)
// ───────────────────────────────────────────────────────────────

/// Persists a JSON payload under a well-known logical name, overwriting
/// any previous content. Last write wins; nothing is queued or replayed.
pub trait JsonSink {
    fn write_named(&mut self, name: &str, content: &str) -> Result<(), io::Error>;
}

// ───────────────────────────────────────────────────────────────
// Wall clock (driven adapter: system time → domain)
// ───────────────────────────────────────────────────────────────

/// A local date/time pair formatted for the resync payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS`
    pub hour: String,
}

/// Source of the current local wall-clock time.
pub trait WallClock {
    fn timestamp(&self) -> Timestamp;
}

// ───────────────────────────────────────────────────────────────
// Clock resync (driven adapter: domain → OS time service)
// ───────────────────────────────────────────────────────────────

/// Forces the OS to resynchronize its clock.
///
/// Invoked once before the dispatcher loop starts; a failure there is
/// fatal to startup — the daemon must not run with an unsynced clock.
pub trait ClockSync {
    fn force_resync(&mut self) -> Result<(), Error>;
}
