//! Platform adapters implementing the port traits.
//!
//! Filesystem and clock adapters build everywhere; the UART and GPIO
//! adapters need the `rpi` feature (rppal) and only make sense on a
//! Raspberry Pi.

pub mod clock;
pub mod fs_sink;

#[cfg(feature = "rpi")]
pub mod button;
#[cfg(feature = "rpi")]
pub mod serial;
