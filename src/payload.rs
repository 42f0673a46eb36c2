//! JSON payload shapes written to the sink.
//!
//! Field names are part of the wire contract with the dashboard backend
//! and must not change: `alarm_stopped`, `date`/`hour`, and
//! `hum`/`tempC`/`mq7Adc`.

use serde::Serialize;

use crate::parser::SensorReading;

/// `{"alarm_stopped": true}` — the operator pressed the alarm-stop button.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlarmStopPayload {
    pub alarm_stopped: bool,
}

impl AlarmStopPayload {
    pub fn new() -> Self {
        Self {
            alarm_stopped: true,
        }
    }
}

impl Default for AlarmStopPayload {
    fn default() -> Self {
        Self::new()
    }
}

/// `{"date": "YYYY-MM-DD", "hour": "HH:MM:SS"}` — a clock resync happened.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSyncPayload {
    pub date: String,
    pub hour: String,
}

/// `{"hum": ..., "tempC": ..., "mq7Adc": ...}` — latest sensor report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SensorPayload {
    pub hum: f32,
    #[serde(rename = "tempC")]
    pub temp_c: f32,
    #[serde(rename = "mq7Adc")]
    pub mq7_adc: i32,
}

impl From<SensorReading> for SensorPayload {
    fn from(reading: SensorReading) -> Self {
        Self {
            hum: reading.humidity,
            temp_c: reading.temperature_c,
            mq7_adc: reading.adc,
        }
    }
}
