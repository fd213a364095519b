//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ThermalLoop / ActuatorController (domain)
//! ```
//!
//! Driven adapters (sensor bank, PWM bank, clock, log sinks, display
//! panels) implement these traits.  The domain core consumes them via
//! generics, so it never touches hardware directly.

use serde::{Deserialize, Serialize};

// ───────────────────────────────────────────────────────────────
// Identifiers
// ───────────────────────────────────────────────────────────────

/// Handle to a temperature sensor owned by the hardware side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorId(pub u8);

/// Identifier of a PWM output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PwmChannel(pub u8);

/// Temperature reported for a sensor that cannot produce a plausible
/// reading.  Far below every switch-on threshold, so actuators fail low.
pub const SENSOR_FAULT_C: f32 = -100.0;

/// Upper bound of the logical duty range (percent).
pub const DUTY_MAX: u8 = 100;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for temperatures.
pub trait SensorPort {
    /// Sample and filter every sensor.  Called once per tick, before any
    /// actuator reads.
    fn update(&mut self);

    /// Latest filtered temperature in °C.  Non-blocking; returns
    /// [`SENSOR_FAULT_C`] for a faulted or unknown sensor.
    fn temperature_c(&self, id: SensorId) -> f32;
}

// ───────────────────────────────────────────────────────────────
// PWM port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for duty-cycle outputs.
pub trait PwmPort {
    /// Set `channel` to `duty` percent (0–100).  Idempotent and
    /// fire-and-forget; out-of-range values are clamped by the adapter.
    fn set_duty(&mut self, channel: PwmChannel, duty: u8);
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Wraps at `u32::MAX`; consumers must use
/// `wrapping_sub` for elapsed time.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Display panel port
// ───────────────────────────────────────────────────────────────

/// A text display able to show one rendered status frame.
pub trait TextPanel {
    /// Bring the panel up.  `false` means the panel is absent or failed.
    fn init(&mut self) -> bool;

    /// Replace the panel contents with `lines`, top to bottom.
    fn draw(&mut self, lines: &[&str]);
}
