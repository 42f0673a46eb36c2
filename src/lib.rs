//! AlarmBridge daemon library.
//!
//! Bridges a sensor-reporting MCU (UART) and a local alarm-stop button
//! (GPIO interrupt) to JSON status files, forcing periodic clock resyncs.
//! The pure-logic modules are exposed for integration testing; everything
//! Raspberry-Pi-specific lives behind the `rpi` feature inside
//! [`adapters`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod framer;
pub mod parser;
pub mod payload;
pub mod signal;
pub mod ticker;

pub mod adapters;
pub mod error;
