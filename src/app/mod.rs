//! Application core — the event-merging dispatcher and its port traits.
//!
//! All interaction with hardware and the filesystem happens through the
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without a Raspberry Pi attached.

pub mod dispatcher;
pub mod ports;
