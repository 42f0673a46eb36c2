//! UART byte source adapter (Raspberry Pi).
//!
//! Wraps an rppal [`Uart`] in non-blocking read mode and implements
//! [`SerialPort`]. The sensor MCU transmits at 9600 baud 8N1 on the Pi's
//! primary UART; the dispatcher pulls one byte per iteration.

use std::time::Duration;

use log::{error, info, warn};
use rppal::uart::{Parity, Uart};

use crate::app::ports::SerialPort;
use crate::config::BridgeConfig;
use crate::error::Error;

/// Non-blocking UART input for the dispatcher.
pub struct UartSource {
    uart: Uart,
}

impl UartSource {
    /// Open the configured device. Failure is fatal at startup: without
    /// the serial link there is nothing to bridge.
    pub fn open(config: &BridgeConfig) -> Result<Self, Error> {
        let mut uart = Uart::with_path(&config.serial_device, config.baud_rate, Parity::None, 8, 1)
            .map_err(|e| {
                error!("open {}: {e}", config.serial_device.display());
                Error::Init("serial port open failed")
            })?;

        // min_length 0 + zero timeout: read returns immediately with
        // whatever is buffered, possibly nothing.
        uart.set_read_mode(0, Duration::ZERO).map_err(|e| {
            error!("set non-blocking read mode: {e}");
            Error::Init("serial read mode setup failed")
        })?;

        info!(
            "serial port {} open at {} baud",
            config.serial_device.display(),
            config.baud_rate
        );
        Ok(Self { uart })
    }
}

impl SerialPort for UartSource {
    fn bytes_available(&mut self) -> bool {
        match self.uart.input_len() {
            Ok(len) => len > 0,
            Err(e) => {
                warn!("input_len failed: {e}");
                false
            }
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.uart.read(&mut buf) {
            Ok(1) => Some(buf[0]),
            Ok(_) => None,
            Err(e) => {
                warn!("serial read failed: {e}");
                None
            }
        }
    }
}
