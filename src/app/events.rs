//! Outbound application events.
//!
//! The [`ThermalLoop`](super::service::ThermalLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::control::curve::Mode;
use crate::display::StatusSnapshot;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The loop has started; `display_ok` is the panel init result.
    Started { display_ok: bool },

    /// An actuator crossed its hysteresis band this tick.
    ActuatorSwitched {
        actuator: &'static str,
        on: bool,
        /// Reading that caused the switch.
        temp_c: f32,
    },

    /// The operator mode differs from the previous tick's.
    ModeChanged { from: Mode, to: Mode },

    /// Periodic telemetry snapshot.
    Telemetry(StatusSnapshot),
}
