//! Coalescing event flag.
//!
//! The bridge has exactly two asynchronous producers: the button ISR and
//! the resync ticker thread. Each posts through one of these flags and
//! nothing else crosses the thread boundary. Repeated notifications before
//! the consumer polls collapse into a single observed event — no counting,
//! no queue. That is the intended semantics for a bouncy physical button
//! and for a resync that is due "at least once", and it bounds the shared
//! mutable surface to a single atomic per producer.

use std::sync::atomic::{AtomicBool, Ordering};

/// A pending/absent event flag shared between one producer context and the
/// dispatcher.
#[derive(Debug, Default)]
pub struct CoalescingSignal {
    pending: AtomicBool,
}

impl CoalescingSignal {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Mark the event pending. Safe from any thread, including an
    /// interrupt-style callback racing with [`take_and_clear`].
    ///
    /// [`take_and_clear`]: Self::take_and_clear
    pub fn notify(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Atomically read and reset the flag. Idempotent when nothing is
    /// pending.
    pub fn take_and_clear(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Non-consuming peek, for diagnostics only.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}
