//! System clock adapters.
//!
//! [`SystemClock`] reads the local wall clock for the resync payload.
//! [`CommandClockSync`] forces the OS time service to resynchronize by
//! running a configurable command — on Raspberry Pi OS the default is
//! `systemctl restart systemd-timesyncd`, which kicks the daemon into an
//! immediate sync.

use std::process::Command;

use chrono::Local;
use log::info;

use crate::app::ports::{ClockSync, Timestamp, WallClock};
use crate::error::Error;

/// Local wall-clock source.
pub struct SystemClock;

impl WallClock for SystemClock {
    fn timestamp(&self) -> Timestamp {
        let now = Local::now();
        Timestamp {
            date: now.format("%Y-%m-%d").to_string(),
            hour: now.format("%H:%M:%S").to_string(),
        }
    }
}

/// Clock resync via an external command.
pub struct CommandClockSync {
    argv: Vec<String>,
}

impl CommandClockSync {
    /// `argv[0]` is the program, the rest its arguments. The config layer
    /// guarantees a non-empty argv.
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl ClockSync for CommandClockSync {
    fn force_resync(&mut self) -> Result<(), Error> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(Error::StartupSync("empty resync command".into()));
        };

        info!("forcing clock resync: {}", self.argv.join(" "));
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| Error::StartupSync(format!("spawn '{program}': {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::StartupSync(format!(
                "'{}' exited with {status}",
                self.argv.join(" ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_shapes_match_payload_contract() {
        let stamp = SystemClock.timestamp();
        assert_eq!(stamp.date.len(), 10);
        assert_eq!(&stamp.date[4..5], "-");
        assert_eq!(stamp.hour.len(), 8);
        assert_eq!(&stamp.hour[2..3], ":");
    }

    #[test]
    fn true_command_succeeds() {
        let mut sync = CommandClockSync::new(vec!["true".into()]);
        assert!(sync.force_resync().is_ok());
    }

    #[test]
    fn failing_command_is_startup_error() {
        let mut sync = CommandClockSync::new(vec!["false".into()]);
        assert!(matches!(sync.force_resync(), Err(Error::StartupSync(_))));
    }

    #[test]
    fn missing_binary_is_startup_error() {
        let mut sync = CommandClockSync::new(vec!["/nonexistent/ntp-kick".into()]);
        assert!(matches!(sync.force_resync(), Err(Error::StartupSync(_))));
    }
}
