//! Daemon configuration parameters.
//!
//! All tunable parameters for the bridge. Values can be overridden via a
//! JSON config file next to the binary; anything absent falls back to the
//! deployed defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Core daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    // --- Serial link ---
    /// UART device the sensor MCU is attached to.
    pub serial_device: PathBuf,
    /// UART baud rate.
    pub baud_rate: u32,

    // --- Alarm button ---
    /// BCM GPIO number of the alarm-stop button (falling edge, pull-up).
    pub button_gpio: u8,
    /// Hardware debounce window for the button interrupt (milliseconds).
    pub button_debounce_ms: u64,

    // --- Clock resync ---
    /// Interval between periodic resync ticks (seconds).
    pub resync_interval_secs: u64,
    /// Command run to force the system clock to resync.
    pub resync_command: Vec<String>,

    // --- Dispatcher ---
    /// Sleep between control-loop iterations (milliseconds). Bounds CPU
    /// usage only; not a backpressure mechanism.
    pub loop_sleep_ms: u64,
    /// Directory the JSON status files are written into. `None` derives
    /// `<exe dir>/../../tmp`, matching the deployed layout.
    pub output_dir: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            serial_device: PathBuf::from("/dev/serial0"),
            baud_rate: 9600,

            button_gpio: 17,
            button_debounce_ms: 250,

            resync_interval_secs: 300,
            resync_command: vec![
                "systemctl".into(),
                "restart".into(),
                "systemd-timesyncd".into(),
            ],

            loop_sleep_ms: 1,
            output_dir: None,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<(), Error> {
        if self.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be non-zero".into()));
        }
        if self.resync_interval_secs == 0 {
            return Err(Error::Config("resync_interval_secs must be non-zero".into()));
        }
        if self.resync_command.is_empty() {
            return Err(Error::Config("resync_command must not be empty".into()));
        }
        Ok(())
    }
}
