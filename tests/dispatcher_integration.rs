//! Integration tests: serial bytes + flags → Dispatcher → sink writes.

use std::sync::Arc;

use alarmbridge::app::dispatcher::{Decision, Dispatcher};
use alarmbridge::app::ports::{JsonSink, SerialPort, Timestamp, WallClock};
use alarmbridge::parser::SensorReading;
use alarmbridge::signal::CoalescingSignal;

// ── Mock implementations ──────────────────────────────────────

/// Serial port fed from a script of bytes, one per iteration.
struct ScriptedSerial {
    bytes: Vec<u8>,
    cursor: usize,
}

impl ScriptedSerial {
    fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            cursor: 0,
        }
    }

    fn exhausted(&self) -> bool {
        self.cursor >= self.bytes.len()
    }
}

impl SerialPort for ScriptedSerial {
    fn bytes_available(&mut self) -> bool {
        self.cursor < self.bytes.len()
    }
    fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.cursor)?;
        self.cursor += 1;
        Some(byte)
    }
}

struct FixedClock;

impl WallClock for FixedClock {
    fn timestamp(&self) -> Timestamp {
        Timestamp {
            date: "2025-06-01".into(),
            hour: "08:30:00".into(),
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    writes: Vec<(String, String)>,
}

impl JsonSink for RecordingSink {
    fn write_named(&mut self, name: &str, content: &str) -> Result<(), std::io::Error> {
        self.writes.push((name.to_string(), content.to_string()));
        Ok(())
    }
}

struct Harness {
    dispatcher: Dispatcher,
    button: Arc<CoalescingSignal>,
    tick: Arc<CoalescingSignal>,
    sink: RecordingSink,
}

impl Harness {
    fn new() -> Self {
        let button = Arc::new(CoalescingSignal::new());
        let tick = Arc::new(CoalescingSignal::new());
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&button), Arc::clone(&tick)),
            button,
            tick,
            sink: RecordingSink::default(),
        }
    }

    /// Run iterations until the serial script is drained, collecting every
    /// non-idle decision.
    fn run(&mut self, serial: &mut ScriptedSerial) -> Vec<Decision> {
        let mut decisions = Vec::new();
        while !serial.exhausted() {
            let decision = self.dispatcher.poll_once(serial, &FixedClock, &mut self.sink);
            if decision != Decision::Idle {
                decisions.push(decision);
            }
        }
        decisions
    }
}

// ── End-to-end stream processing ──────────────────────────────

#[test]
fn back_to_back_records_each_dispatch() {
    let mut harness = Harness::new();
    let mut serial = ScriptedSerial::new(b"|10.0|20.0|30|\r\n|11.0|21.0|31|\r\n");

    let decisions = harness.run(&mut serial);
    assert_eq!(decisions.len(), 2);
    assert_eq!(
        decisions[0],
        Decision::Sensor(SensorReading {
            humidity: 10.0,
            temperature_c: 20.0,
            adc: 30,
        })
    );
    assert_eq!(
        decisions[1],
        Decision::Sensor(SensorReading {
            humidity: 11.0,
            temperature_c: 21.0,
            adc: 31,
        })
    );

    let names: Vec<&str> = harness.sink.writes.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["sensor", "sensor"]);
    assert_eq!(
        harness.sink.writes[1].1,
        r#"{"hum":11.0,"tempC":21.0,"mq7Adc":31}"#
    );
}

#[test]
fn garbage_between_records_is_skipped() {
    let mut harness = Harness::new();
    let mut serial = ScriptedSerial::new(b"noise\n|50.50|25.00|800|\n|not|a|record|\n");

    let decisions = harness.run(&mut serial);
    // "noise" fails field-count, the middle record parses, the trailing
    // record has non-numeric fields.
    assert_eq!(decisions.len(), 1);
    assert!(matches!(decisions[0], Decision::Sensor(_)));
    assert_eq!(harness.sink.writes.len(), 1);
    assert_eq!(harness.sink.writes[0].0, "sensor");
}

#[test]
fn oversized_record_produces_no_write() {
    let mut harness = Harness::new();
    let mut line = vec![b'|'];
    line.extend(std::iter::repeat_n(b'9', 100));
    line.push(b'\n');
    let mut serial = ScriptedSerial::new(&line);

    let decisions = harness.run(&mut serial);
    assert!(decisions.is_empty());
    assert!(harness.sink.writes.is_empty());
}

// ── Priority matrix ───────────────────────────────────────────

#[test]
fn all_three_pending_selects_alarm_and_clears_everything() {
    let mut harness = Harness::new();
    // Everything but the final delimiter, so the frame completes in the
    // same iteration the flags are polled.
    let mut serial = ScriptedSerial::new(b"|1.0|2.0|3|");
    while !serial.exhausted() {
        harness
            .dispatcher
            .poll_once(&mut serial, &FixedClock, &mut harness.sink);
    }

    harness.button.notify();
    harness.tick.notify();
    let mut tail = ScriptedSerial::new(b"\n");
    let decision = harness
        .dispatcher
        .poll_once(&mut tail, &FixedClock, &mut harness.sink);

    assert_eq!(decision, Decision::AlarmStop);
    assert_eq!(harness.sink.writes.len(), 1);
    assert_eq!(harness.sink.writes[0].0, "alarm");

    // All three sources consumed: nothing carries into the next iteration.
    let mut idle = ScriptedSerial::new(b"");
    let next = harness
        .dispatcher
        .poll_once(&mut idle, &FixedClock, &mut harness.sink);
    assert_eq!(next, Decision::Idle);
    assert_eq!(harness.sink.writes.len(), 1);
}

#[test]
fn tick_and_sensor_pending_selects_time_sync() {
    let mut harness = Harness::new();
    let mut serial = ScriptedSerial::new(b"|1.0|2.0|3|");
    while !serial.exhausted() {
        harness
            .dispatcher
            .poll_once(&mut serial, &FixedClock, &mut harness.sink);
    }

    harness.tick.notify();
    let mut tail = ScriptedSerial::new(b"\n");
    let decision = harness
        .dispatcher
        .poll_once(&mut tail, &FixedClock, &mut harness.sink);

    assert_eq!(
        decision,
        Decision::TimeSync(Timestamp {
            date: "2025-06-01".into(),
            hour: "08:30:00".into(),
        })
    );
    assert_eq!(harness.sink.writes.len(), 1);
    assert_eq!(harness.sink.writes[0].0, "ntp");
    assert_eq!(
        harness.sink.writes[0].1,
        r#"{"date":"2025-06-01","hour":"08:30:00"}"#
    );
}

#[test]
fn coalesced_presses_yield_one_alarm_write() {
    let mut harness = Harness::new();
    for _ in 0..25 {
        harness.button.notify();
    }

    let mut serial = ScriptedSerial::new(b"");
    let decision = harness
        .dispatcher
        .poll_once(&mut serial, &FixedClock, &mut harness.sink);
    assert_eq!(decision, Decision::AlarmStop);

    let next = harness
        .dispatcher
        .poll_once(&mut serial, &FixedClock, &mut harness.sink);
    assert_eq!(next, Decision::Idle);
    assert_eq!(harness.sink.writes.len(), 1);
}

#[test]
fn idle_loop_never_touches_the_sink() {
    let mut harness = Harness::new();
    let mut serial = ScriptedSerial::new(b"");
    for _ in 0..1000 {
        let decision = harness
            .dispatcher
            .poll_once(&mut serial, &FixedClock, &mut harness.sink);
        assert_eq!(decision, Decision::Idle);
    }
    assert!(harness.sink.writes.is_empty());
}

// ── Concurrent producers ──────────────────────────────────────

#[test]
fn button_pressed_from_another_thread_is_observed_next_iteration() {
    let mut harness = Harness::new();
    let button = Arc::clone(&harness.button);

    let presser = std::thread::spawn(move || {
        for _ in 0..50 {
            button.notify();
            std::thread::sleep(std::time::Duration::from_micros(200));
        }
    });

    let mut alarms = 0;
    let mut serial = ScriptedSerial::new(b"");
    while !presser.is_finished() {
        if harness
            .dispatcher
            .poll_once(&mut serial, &FixedClock, &mut harness.sink)
            == Decision::AlarmStop
        {
            alarms += 1;
        }
    }
    presser.join().unwrap();
    // Final sweep for a press that landed after the last poll.
    if harness
        .dispatcher
        .poll_once(&mut serial, &FixedClock, &mut harness.sink)
        == Decision::AlarmStop
    {
        alarms += 1;
    }

    // Coalescing means at least one and at most fifty observations, and
    // the sink saw exactly one write per observation.
    assert!(alarms >= 1);
    assert!(alarms <= 50);
    assert_eq!(harness.sink.writes.len(), alarms);
    assert!(harness.sink.writes.iter().all(|(name, _)| name == "alarm"));
}
