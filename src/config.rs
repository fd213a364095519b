//! System configuration parameters
//!
//! Every tunable of the cooling loop, compiled in via [`Default`].
//! Duty values are percent (0-100); temperatures are °C.

use serde::{Deserialize, Serialize};

use crate::app::ports::{PwmChannel, SensorId};
use crate::control::actuator::Kickstart;
use crate::control::curve::{Curve, CurveConfig, Hysteresis, ModeProfile};
use crate::error::ConfigError;
use crate::pins;
use crate::sensors::temperature::NtcParams;

/// Number of temperature sensors on the board.
pub const SENSOR_COUNT: usize = 2;

/// One NTC input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SensorConfig {
    /// ADC1 channel the divider is wired to.
    pub adc_channel: u32,
    pub ntc: NtcParams,
    /// EMA smoothing factor, `(0, 1]`.  1.0 disables smoothing.
    pub alpha: f32,
}

/// A pump: hysteresis + curve per mode, plus kickstart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PumpConfig {
    pub sensor: SensorId,
    pub channel: PwmChannel,
    pub hysteresis: ModeProfile<Hysteresis>,
    pub curve: ModeProfile<CurveConfig>,
    pub kickstart: Kickstart,
}

/// The radiator fan: hysteresis + curve per mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FanConfig {
    pub sensor: SensorId,
    pub channel: PwmChannel,
    pub hysteresis: ModeProfile<Hysteresis>,
    pub curve: ModeProfile<CurveConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Control tick period (milliseconds).
    pub control_interval_ms: u32,
    /// Ticks between telemetry log lines.  0 disables telemetry.
    pub telemetry_interval_ticks: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub enabled: bool,
    /// 7-bit I²C address of the SSD1306 panel.
    pub i2c_address: u8,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    pub sensors: [SensorConfig; SENSOR_COUNT],
    pub pumps: [PumpConfig; 2],
    pub fan: FanConfig,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let pump_hysteresis = ModeProfile::new(
            Hysteresis::new(30.0, 27.0),
            Hysteresis::new(26.0, 24.0),
        );
        let pump_curve = ModeProfile::new(
            CurveConfig::new(28.0, 40.0, 30, 100),
            CurveConfig::new(24.0, 34.0, 50, 100),
        );
        let kickstart = Kickstart {
            duration_ms: 2000,
            duty: 100,
        };

        Self {
            sensors: [
                SensorConfig {
                    adc_channel: pins::LOOP_A_TEMP_ADC_CH,
                    ntc: NtcParams::default(),
                    alpha: 0.1,
                },
                SensorConfig {
                    adc_channel: pins::LOOP_B_TEMP_ADC_CH,
                    ntc: NtcParams::default(),
                    alpha: 0.1,
                },
            ],
            pumps: [
                PumpConfig {
                    sensor: SensorId(0),
                    channel: pins::PUMP1_PWM_CH,
                    hysteresis: pump_hysteresis,
                    curve: pump_curve,
                    kickstart,
                },
                PumpConfig {
                    sensor: SensorId(1),
                    channel: pins::PUMP2_PWM_CH,
                    hysteresis: pump_hysteresis,
                    curve: pump_curve,
                    kickstart,
                },
            ],
            fan: FanConfig {
                sensor: SensorId(1),
                channel: pins::FAN_PWM_CH,
                hysteresis: ModeProfile::new(
                    Hysteresis::new(32.0, 29.0),
                    Hysteresis::new(28.0, 25.0),
                ),
                curve: ModeProfile::new(
                    CurveConfig::new(30.0, 45.0, 20, 100),
                    CurveConfig::new(26.0, 38.0, 40, 100),
                ),
            },
            timing: TimingConfig {
                control_interval_ms: 200,
                telemetry_interval_ticks: 50, // every 10 s
            },
            display: DisplayConfig {
                enabled: true,
                i2c_address: 0x3D,
            },
        }
    }
}

impl SystemConfig {
    /// Range-check everything the control loop relies on.
    ///
    /// Inverted hysteresis bands are not rejected here; they are logged
    /// when the controllers are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.control_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        for s in &self.sensors {
            if !(s.alpha > 0.0 && s.alpha <= 1.0) {
                return Err(ConfigError::InvalidFilterAlpha);
            }
        }

        let outputs = self
            .pumps
            .iter()
            .map(|p| (p.sensor, p.channel, &p.curve))
            .chain(core::iter::once((self.fan.sensor, self.fan.channel, &self.fan.curve)));

        let mut seen: heapless::Vec<PwmChannel, { pins::PWM_CHANNEL_COUNT }> = heapless::Vec::new();
        for (sensor, channel, curve) in outputs {
            if usize::from(sensor.0) >= SENSOR_COUNT {
                return Err(ConfigError::UnknownSensor(sensor.0));
            }
            if !pins::PWM_CHANNELS.iter().any(|(ch, _)| *ch == channel) {
                return Err(ConfigError::UnknownChannel(channel.0));
            }
            if seen.contains(&channel) || seen.push(channel).is_err() {
                return Err(ConfigError::DuplicateChannel(channel.0));
            }
            curve.try_map(|c| Curve::new(*c))?;
        }
        Ok(())
    }
}
