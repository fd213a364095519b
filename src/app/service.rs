//! Application service: the hexagonal core.
//!
//! [`ThermalLoop`] owns both pump controllers, the fan controller and the
//! status display.  All I/O flows through port traits injected at call
//! sites, so the whole loop runs against mock adapters in tests.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       ThermalLoop      │
//!     PwmPort ◀── │ pump1 · pump2 · fan    │ ──▶ TextPanel
//!                 └────────────────────────┘
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::control::actuator::{ActuatorController, Transition};
use crate::control::curve::Mode;
use crate::display::{StatusDisplay, StatusSnapshot};
use crate::error::ConfigError;

use super::events::AppEvent;
use super::ports::{Clock, EventSink, PwmPort, SensorId, SensorPort, TextPanel};

/// One control loop: sensors → pump 1 → pump 2 → fan → display.
pub struct ThermalLoop<P: TextPanel> {
    pumps: [ActuatorController; 2],
    fan: ActuatorController,
    display: StatusDisplay<P>,
    display_enabled: bool,
    telemetry_interval_ticks: u32,
    tick_count: u64,
    /// Mode seen by the most recent tick.
    mode: Mode,
}

impl<P: TextPanel> ThermalLoop<P> {
    /// Validate `config` and build every controller.
    ///
    /// Does **not** touch the display; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig, panel: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let pumps = [
            ActuatorController::pump("pump1", &config.pumps[0])?,
            ActuatorController::pump("pump2", &config.pumps[1])?,
        ];
        let fan = ActuatorController::fan("fan", &config.fan)?;

        Ok(Self {
            pumps,
            fan,
            display: StatusDisplay::new(panel),
            display_enabled: config.display.enabled,
            telemetry_interval_ticks: config.timing.telemetry_interval_ticks,
            tick_count: 0,
            mode: Mode::default(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring up the display (if enabled) and announce the start.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let display_ok = if self.display_enabled {
            self.display.begin()
        } else {
            info!("display disabled in config");
            false
        };
        sink.emit(&AppEvent::Started { display_ok });
        info!("ThermalLoop started (display_ok={})", display_ok);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle.
    ///
    /// The clock is sampled once; every actuator sees the same `now_ms`.
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`PwmPort`], which avoids a double mutable borrow while keeping the
    /// port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + PwmPort),
        clock: &impl Clock,
        mode: Mode,
        sink: &mut impl EventSink,
    ) {
        let now_ms = clock.now_ms();
        self.tick_count += 1;

        if mode != self.mode {
            info!("mode {:?} -> {:?}", self.mode, mode);
            sink.emit(&AppEvent::ModeChanged {
                from: self.mode,
                to: mode,
            });
            self.mode = mode;
        }

        // 1. Sensors
        hw.update();

        // 2. Actuators, fixed order
        let actuators = self.pumps.iter_mut().chain(core::iter::once(&mut self.fan));
        for actuator in actuators {
            if let Some(transition) = actuator.update(&mut *hw, mode, now_ms) {
                sink.emit(&AppEvent::ActuatorSwitched {
                    actuator: actuator.name(),
                    on: transition == Transition::TurnedOn,
                    temp_c: hw.temperature_c(actuator.sensor()),
                });
            }
        }

        // 3. Display
        let snapshot = self.snapshot(&*hw);
        self.display.update(&snapshot);

        // 4. Telemetry
        if self.telemetry_interval_ticks != 0
            && self.tick_count % u64::from(self.telemetry_interval_ticks) == 0
        {
            sink.emit(&AppEvent::Telemetry(snapshot));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current readings and duties, as the display shows them.
    pub fn snapshot(&self, sensors: &impl SensorPort) -> StatusSnapshot {
        StatusSnapshot {
            temps_c: [
                sensors.temperature_c(SensorId(0)),
                sensors.temperature_c(SensorId(1)),
            ],
            pump_duty: [self.pumps[0].duty(), self.pumps[1].duty()],
            fan_duty: self.fan.duty(),
            mode: self.mode,
        }
    }

    pub fn pumps(&self) -> &[ActuatorController; 2] {
        &self.pumps
    }

    pub fn fan(&self) -> &ActuatorController {
        &self.fan
    }

    pub fn display(&self) -> &StatusDisplay<P> {
        &self.display
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
