//! Hysteresis-gated, curve-mapped actuator controller.
//!
//! One controller drives one PWM channel from one sensor.  Each tick:
//!
//! 1. read the sensor through its [`SensorId`] handle,
//! 2. switch on/off against the hysteresis band of the selected [`Mode`],
//! 3. map temperature to duty with the mode's [`Curve`],
//! 4. run the [`PostProcess`] step (pump kickstart, or nothing),
//! 5. clamp to [`DUTY_MAX`] and write the channel.
//!
//! While off, duty 0 is written every tick; the output is never assumed
//! to hold its previous value.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app::ports::{DUTY_MAX, PwmChannel, PwmPort, SENSOR_FAULT_C, SensorId, SensorPort};
use crate::config::{FanConfig, PumpConfig};
use crate::error::ConfigError;

use super::curve::{Curve, CurveConfig, Hysteresis, Mode, ModeProfile};

/// Forced duty applied for a fixed time after each switch-on, to break
/// static friction and prime the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kickstart {
    pub duration_ms: u32,
    pub duty: u8,
}

/// Adjustment applied to the curve output before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    Passthrough,
    Kickstart(Kickstart),
}

impl PostProcess {
    /// `elapsed_ms` is the time since the actuator last switched on.
    pub fn apply(&self, duty: u8, elapsed_ms: u32) -> u8 {
        match self {
            Self::Kickstart(k) if elapsed_ms < k.duration_ms => k.duty,
            Self::Kickstart(_) | Self::Passthrough => duty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorKind {
    Pump,
    Fan,
}

/// Result of a tick that crossed the hysteresis band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    TurnedOn,
    TurnedOff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorState {
    pub on: bool,
    /// Last duty written, percent.
    pub duty: u8,
    /// Clock value at the most recent off → on switch.
    pub last_on_ms: u32,
}

pub struct ActuatorController {
    name: &'static str,
    sensor: SensorId,
    channel: PwmChannel,
    hysteresis: ModeProfile<Hysteresis>,
    curves: ModeProfile<Curve>,
    post: PostProcess,
    state: ActuatorState,
}

impl ActuatorController {
    /// Build a controller.  Fails if either curve is degenerate.
    pub fn new(
        name: &'static str,
        sensor: SensorId,
        channel: PwmChannel,
        hysteresis: ModeProfile<Hysteresis>,
        curves: ModeProfile<CurveConfig>,
        post: PostProcess,
    ) -> Result<Self, ConfigError> {
        let curves = curves.try_map(|c| Curve::new(*c))?;
        let hysteresis = ModeProfile::new(
            hysteresis.normal.checked(name),
            hysteresis.benchmark.checked(name),
        );
        Ok(Self {
            name,
            sensor,
            channel,
            hysteresis,
            curves,
            post,
            state: ActuatorState::default(),
        })
    }

    /// A pump: curve mapping plus kickstart after every switch-on.
    pub fn pump(name: &'static str, cfg: &PumpConfig) -> Result<Self, ConfigError> {
        Self::new(
            name,
            cfg.sensor,
            cfg.channel,
            cfg.hysteresis,
            cfg.curve,
            PostProcess::Kickstart(cfg.kickstart),
        )
    }

    /// A fan: plain curve mapping.
    pub fn fan(name: &'static str, cfg: &FanConfig) -> Result<Self, ConfigError> {
        Self::new(
            name,
            cfg.sensor,
            cfg.channel,
            cfg.hysteresis,
            cfg.curve,
            PostProcess::Passthrough,
        )
    }

    /// Run one control step and write the resulting duty to `hw`.
    ///
    /// Returns the transition if this tick crossed the hysteresis band.
    pub fn update(
        &mut self,
        hw: &mut (impl SensorPort + PwmPort),
        mode: Mode,
        now_ms: u32,
    ) -> Option<Transition> {
        let reading = hw.temperature_c(self.sensor);
        let t = if reading.is_finite() { reading } else { SENSOR_FAULT_C };
        let band = self.hysteresis.select(mode);

        let transition = if !self.state.on && t > band.on_c {
            self.state.on = true;
            self.state.last_on_ms = now_ms;
            info!("{}: on at {:.1}C ({:?})", self.name, t, mode);
            Some(Transition::TurnedOn)
        } else if self.state.on && t < band.off_c {
            self.state.on = false;
            info!("{}: off at {:.1}C ({:?})", self.name, t, mode);
            Some(Transition::TurnedOff)
        } else {
            None
        };

        if !self.state.on {
            self.park(&mut *hw);
            return transition;
        }

        let raw = self.curves.select(mode).map(t);
        let elapsed_ms = now_ms.wrapping_sub(self.state.last_on_ms);
        let duty = self.post.apply(raw, elapsed_ms).min(DUTY_MAX);
        if duty != raw {
            debug!("{}: curve {}% -> {}% ({}ms on)", self.name, raw, duty, elapsed_ms);
        }

        self.state.duty = duty;
        hw.set_duty(self.channel, duty);
        transition
    }

    /// Zero the output.  Shared by the stay-off and switch-off paths.
    fn park(&mut self, out: &mut impl PwmPort) {
        self.state.duty = 0;
        out.set_duty(self.channel, 0);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sensor(&self) -> SensorId {
        self.sensor
    }

    pub fn channel(&self) -> PwmChannel {
        self.channel
    }

    pub fn kind(&self) -> ActuatorKind {
        match self.post {
            PostProcess::Kickstart(_) => ActuatorKind::Pump,
            PostProcess::Passthrough => ActuatorKind::Fan,
        }
    }

    pub fn duty(&self) -> u8 {
        self.state.duty
    }

    pub fn is_on(&self) -> bool {
        self.state.on
    }

    pub fn state(&self) -> ActuatorState {
        self.state
    }
}
