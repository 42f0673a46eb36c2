//! Periodic resync ticker.
//!
//! A detached background thread that asserts a [`CoalescingSignal`] every
//! `interval`, marking a clock resync due. The thread runs for the process
//! lifetime and never learns about dispatch outcomes — a failed sink write
//! or parse error cannot stop it. A slow consumer observes "at least one
//! tick occurred", never a backlog of missed ticks.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::signal::CoalescingSignal;

/// Handle to the periodic tick source.
pub struct PeriodicTicker {
    signal: Arc<CoalescingSignal>,
}

impl PeriodicTicker {
    /// Spawn the ticker thread. The first tick fires one full `interval`
    /// after start. A spawn failure is fatal to startup, like every other
    /// init failure.
    pub fn start(interval: Duration) -> std::io::Result<Self> {
        let signal = Arc::new(CoalescingSignal::new());
        let producer = Arc::clone(&signal);

        // No shutdown path by design: the ticker lives as long as the
        // process does.
        thread::Builder::new()
            .name("resync-ticker".into())
            .spawn(move || {
                info!("resync ticker started, interval {}s", interval.as_secs());
                loop {
                    thread::sleep(interval);
                    debug!("resync interval elapsed, marking tick pending");
                    producer.notify();
                }
            })?;

        Ok(Self { signal })
    }

    /// The flag the dispatcher polls.
    pub fn signal(&self) -> &Arc<CoalescingSignal> {
        &self.signal
    }
}
