//! Alarm-stop button adapter (Raspberry Pi).
//!
//! Active-low momentary switch with the internal pull-up enabled; the GPIO
//! fires on the falling edge. The interrupt callback runs on a thread rppal
//! owns, with no ordering guarantee relative to the dispatcher, so its only
//! side effect is notifying the shared [`CoalescingSignal`] — nothing else
//! crosses that boundary. Bounce beyond the hardware debounce window is
//! absorbed by the flag's coalescing semantics.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use rppal::gpio::{Gpio, InputPin, Trigger};

use crate::config::BridgeConfig;
use crate::error::Error;
use crate::signal::CoalescingSignal;

/// Holds the configured input pin for the process lifetime; dropping it
/// would unregister the interrupt.
pub struct AlarmButton {
    _pin: InputPin,
}

impl AlarmButton {
    /// Configure the pin and register the falling-edge interrupt. Failure
    /// is fatal at startup, matching the resync contract: the daemon must
    /// not run half-wired.
    pub fn register(config: &BridgeConfig, signal: Arc<CoalescingSignal>) -> Result<Self, Error> {
        let gpio = Gpio::new().map_err(|e| {
            error!("gpio init: {e}");
            Error::Init("GPIO init failed")
        })?;

        let mut pin = gpio
            .get(config.button_gpio)
            .map_err(|e| {
                error!("gpio {} unavailable: {e}", config.button_gpio);
                Error::Init("button GPIO unavailable")
            })?
            .into_input_pullup();

        let debounce = Duration::from_millis(config.button_debounce_ms);
        pin.set_async_interrupt(Trigger::FallingEdge, Some(debounce), move |_event| {
            signal.notify();
        })
        .map_err(|e| {
            error!("interrupt registration on gpio {}: {e}", config.button_gpio);
            Error::Init("button interrupt registration failed")
        })?;

        info!(
            "alarm button on GPIO {} (pull-up, falling edge, {}ms debounce)",
            config.button_gpio, config.button_debounce_ms
        );
        Ok(Self { _pin: pin })
    }
}
