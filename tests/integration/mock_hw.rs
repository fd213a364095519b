//! Mock adapters for integration tests.
//!
//! Records every duty write and every emitted event so tests can assert
//! on the full history without touching real ADC/LEDC registers.

use std::cell::Cell;

use coolant::app::events::AppEvent;
use coolant::app::ports::{
    Clock, EventSink, PwmChannel, PwmPort, SENSOR_FAULT_C, SensorId, SensorPort, TextPanel,
};

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub temps: [f32; 2],
    pub updates: u32,
    pub writes: Vec<(PwmChannel, u8)>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn at(t0: f32, t1: f32) -> Self {
        Self {
            temps: [t0, t1],
            updates: 0,
            writes: Vec::new(),
        }
    }

    pub fn set_all(&mut self, t: f32) {
        self.temps = [t, t];
    }

    /// Last duty written to `channel`.
    pub fn duty(&self, channel: PwmChannel) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find_map(|(ch, d)| (*ch == channel).then_some(*d))
    }
}

impl SensorPort for MockHardware {
    fn update(&mut self) {
        self.updates += 1;
    }

    fn temperature_c(&self, id: SensorId) -> f32 {
        self.temps
            .get(usize::from(id.0))
            .copied()
            .unwrap_or(SENSOR_FAULT_C)
    }
}

impl PwmPort for MockHardware {
    fn set_duty(&mut self, channel: PwmChannel, duty: u8) {
        self.writes.push((channel, duty));
    }
}

// ── ManualClock ───────────────────────────────────────────────

pub struct ManualClock(Cell<u32>);

#[allow(dead_code)]
impl ManualClock {
    pub fn at(ms: u32) -> Self {
        Self(Cell::new(ms))
    }

    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(actuator, on)` for every switch event, in order.
    pub fn switches(&self) -> Vec<(&'static str, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::ActuatorSwitched { actuator, on, .. } => Some((*actuator, *on)),
                _ => None,
            })
            .collect()
    }

    pub fn telemetry_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry(_)))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── RecordingPanel ────────────────────────────────────────────

pub struct RecordingPanel {
    pub init_ok: bool,
    pub init_calls: u32,
    pub frames: Vec<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingPanel {
    pub fn working() -> Self {
        Self {
            init_ok: true,
            init_calls: 0,
            frames: Vec::new(),
        }
    }

    pub fn broken() -> Self {
        Self {
            init_ok: false,
            ..Self::working()
        }
    }

    pub fn last_frame(&self) -> Option<&[String]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl TextPanel for RecordingPanel {
    fn init(&mut self) -> bool {
        self.init_calls += 1;
        self.init_ok
    }

    fn draw(&mut self, lines: &[&str]) {
        self.frames
            .push(lines.iter().map(|l| (*l).to_string()).collect());
    }
}
