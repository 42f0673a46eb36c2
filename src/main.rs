//! AlarmBridge — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  UartSource      AlarmButton      FsJsonSink                 │
//! │  (SerialPort)    (GPIO ISR)       (JsonSink)                 │
//! │  SystemClock     CommandClockSync                            │
//! │  (WallClock)     (ClockSync)                                 │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │          Dispatcher (pure logic)                   │      │
//! │  │  LineFramer · SensorRecordParser · priority merge  │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  PeriodicTicker (thread) · CoalescingSignal (ISR flag)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use alarmbridge::adapters::button::AlarmButton;
use alarmbridge::adapters::clock::{CommandClockSync, SystemClock};
use alarmbridge::adapters::fs_sink::FsJsonSink;
use alarmbridge::adapters::serial::UartSource;
use alarmbridge::app::dispatcher::Dispatcher;
use alarmbridge::app::ports::ClockSync;
use alarmbridge::config::BridgeConfig;
use alarmbridge::signal::CoalescingSignal;
use alarmbridge::ticker::PeriodicTicker;

/// Config file searched for next to the binary.
const CONFIG_FILE: &str = "alarmbridge.json";

/// Output directory default: three levels up from the binary, then `tmp`
/// (`<prefix>/bin/alarmbridge` → `<prefix>/../tmp`), matching the deployed
/// dashboard layout.
fn default_output_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("resolving own executable path")?;
    let mut dir = exe;
    for _ in 0..3 {
        if !dir.pop() {
            anyhow::bail!("executable path too shallow to derive output dir");
        }
    }
    Ok(dir.join("tmp"))
}

fn load_config() -> BridgeConfig {
    let path = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE)));

    match path {
        Some(path) if path.exists() => match BridgeConfig::from_file(&path) {
            Ok(config) => {
                info!("config loaded from {}", path.display());
                config
            }
            Err(e) => {
                warn!("config load failed ({e}), using defaults");
                BridgeConfig::default()
            }
        },
        _ => {
            info!("no config file, using defaults");
            BridgeConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("alarmbridge v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config();

    let output_dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => default_output_dir()?,
    };
    info!("JSON output directory: {}", output_dir.display());

    // ── 2. Platform adapters ──────────────────────────────────
    let mut serial = UartSource::open(&config)?;
    info!("waiting for data from the MCU in '|humidity|temperature|ADC|' format");

    let button_signal = Arc::new(CoalescingSignal::new());
    let _button = AlarmButton::register(&config, Arc::clone(&button_signal))?;

    let mut sink = FsJsonSink::new(output_dir);
    let clock = SystemClock;

    // ── 3. Initial clock sync (fatal on failure) ──────────────
    let mut clock_sync = CommandClockSync::new(config.resync_command.clone());
    clock_sync
        .force_resync()
        .context("initial clock resync — refusing to start unsynced")?;
    info!("initial clock resync successful");

    // ── 4. Periodic resync ticker ─────────────────────────────
    let ticker = PeriodicTicker::start(Duration::from_secs(config.resync_interval_secs))
        .context("starting resync ticker thread")?;
    // The successful startup sync is announced through the normal
    // dispatch path: the first iteration writes the ntp file.
    ticker.signal().notify();

    // ── 5. Dispatcher loop ────────────────────────────────────
    let mut dispatcher = Dispatcher::new(button_signal, Arc::clone(ticker.signal()));
    let sleep = Duration::from_millis(config.loop_sleep_ms);

    info!("system ready, entering dispatch loop");
    loop {
        let _decision = dispatcher.poll_once(&mut serial, &clock, &mut sink);
        // Bounds CPU usage only; event latency stays within one iteration.
        thread::sleep(sleep);
    }
}
