//! The event-merging dispatcher.
//!
//! Three event sources funnel into one single-writer decision point: the
//! serial framer (sensor records), the alarm-stop button flag, and the
//! resync tick flag. Each control-loop iteration computes exactly one
//! [`Decision`] and performs at most one sink write; decisions are never
//! queued. When several sources assert in the same iteration, a fixed
//! priority resolves the conflict:
//!
//! ```text
//!   button > tick > sensor
//! ```
//!
//! An operator-triggered alarm stop must never be starved by routine
//! sensor chatter or housekeeping; a resync still outranks telemetry
//! because a dropped sample is superseded by the next line, while a missed
//! resync waits a whole interval. Every pending source is cleared every
//! iteration, overridden or not, so a losing event is coalesced away
//! rather than carried over.

use std::sync::Arc;

use log::{error, info, warn};

use crate::error::Error;
use crate::framer::LineFramer;
use crate::parser::{self, SensorReading};
use crate::payload::{AlarmStopPayload, SensorPayload, TimeSyncPayload};
use crate::signal::CoalescingSignal;

use super::ports::{JsonSink, SerialPort, Timestamp, WallClock};

/// Logical sink names, fixed per decision kind.
const SINK_ALARM: &str = "alarm";
const SINK_NTP: &str = "ntp";
const SINK_SENSOR: &str = "sensor";

/// The single tagged outcome of one control-loop iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Nothing pending; no sink call.
    Idle,
    /// The alarm-stop button was pressed since the last iteration.
    AlarmStop,
    /// A clock resync came due; carries the wall time it was observed.
    TimeSync(Timestamp),
    /// A complete sensor record arrived and parsed.
    Sensor(SensorReading),
}

/// Merges the three event sources and drives the sink.
pub struct Dispatcher {
    framer: LineFramer,
    button: Arc<CoalescingSignal>,
    tick: Arc<CoalescingSignal>,
}

impl Dispatcher {
    /// `button` is notified by the GPIO interrupt callback, `tick` by the
    /// periodic ticker thread. The dispatcher is their only consumer.
    pub fn new(button: Arc<CoalescingSignal>, tick: Arc<CoalescingSignal>) -> Self {
        Self {
            framer: LineFramer::new(),
            button,
            tick,
        }
    }

    /// Run one control-loop iteration and return the decision acted upon.
    ///
    /// Reads at most one serial byte, polls both flags exactly once, and
    /// performs at most one sink write. Never blocks. A parse failure
    /// means "no sensor decision this iteration"; a sink failure is logged
    /// and not retried.
    pub fn poll_once(
        &mut self,
        serial: &mut impl SerialPort,
        clock: &impl WallClock,
        sink: &mut impl JsonSink,
    ) -> Decision {
        let mut decision = Decision::Idle;

        // 1. Serial: one byte per iteration, sensor decision if it
        //    completes a frame that parses.
        if serial.bytes_available() {
            if let Some(byte) = serial.read_byte() {
                if let Some(frame) = self.framer.feed(byte) {
                    match parser::parse(&frame) {
                        Ok(reading) => {
                            info!(
                                "UART rx {:?}: hum={:.2} tempC={:.2} adc={}",
                                frame.as_str().unwrap_or("<non-utf8>"),
                                reading.humidity,
                                reading.temperature_c,
                                reading.adc
                            );
                            decision = Decision::Sensor(reading);
                        }
                        Err(e) => {
                            warn!(
                                "discarding frame ({} bytes): {}",
                                frame.len(),
                                Error::Parse(e)
                            );
                        }
                    }
                }
            }
        }

        // 2 + 3. Poll both flags unconditionally: a losing source is
        //    still consumed this iteration, never deferred.
        let button_pending = self.button.take_and_clear();
        let tick_pending = self.tick.take_and_clear();

        if button_pending {
            decision = Decision::AlarmStop;
        } else if tick_pending {
            decision = Decision::TimeSync(clock.timestamp());
        }

        // 4 + 5. Serialize and hand to the sink. Idle performs no I/O.
        self.act(&decision, sink);
        decision
    }

    fn act(&self, decision: &Decision, sink: &mut impl JsonSink) {
        let (name, json) = match decision {
            Decision::Idle => return,
            Decision::AlarmStop => {
                info!("alarm stop requested by button");
                (SINK_ALARM, serde_json::to_string(&AlarmStopPayload::new()))
            }
            Decision::TimeSync(stamp) => {
                info!("clock resync marker at {} {}", stamp.date, stamp.hour);
                (
                    SINK_NTP,
                    serde_json::to_string(&TimeSyncPayload {
                        date: stamp.date.clone(),
                        hour: stamp.hour.clone(),
                    }),
                )
            }
            Decision::Sensor(reading) => (
                SINK_SENSOR,
                serde_json::to_string(&SensorPayload::from(*reading)),
            ),
        };

        let json = match json {
            Ok(json) => json,
            Err(e) => {
                // Unreachable for these payload shapes, but the sink
                // contract is string-in, so surface it and move on.
                error!("could not serialize '{name}' payload: {e}");
                return;
            }
        };

        if let Err(e) = sink.write_named(name, &json) {
            error!("{}", Error::SinkWrite(e));
        }
    }
}
