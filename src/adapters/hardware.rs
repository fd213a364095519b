//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorBank`] and the [`PwmBank`], exposing them through
//! [`SensorPort`] and [`PwmPort`].  This is the only module in the system
//! that touches actual hardware.  On non-espidf targets, the underlying
//! drivers use cfg-gated simulation stubs.

use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{PwmChannel, PwmPort, SensorId, SensorPort};
use crate::config::SystemConfig;
use crate::drivers::pwm::{LedcChannel, PwmBank};
use crate::error::ConfigError;
use crate::pins;
use crate::sensors::SensorBank;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P = LedcChannel> {
    sensors: SensorBank,
    pwm: PwmBank<P, { pins::PWM_CHANNEL_COUNT }>,
}

impl HardwareAdapter<LedcChannel> {
    /// Sensors from `config`, one LEDC output per wired channel.
    pub fn from_config(config: &SystemConfig) -> Result<Self, ConfigError> {
        let mut pwm = PwmBank::new();
        for (channel, _gpio) in pins::PWM_CHANNELS {
            pwm.add(channel, LedcChannel::new(channel))?;
        }
        Ok(Self::new(SensorBank::from_config(&config.sensors), pwm))
    }
}

impl<P: SetDutyCycle> HardwareAdapter<P> {
    pub fn new(sensors: SensorBank, pwm: PwmBank<P, { pins::PWM_CHANNEL_COUNT }>) -> Self {
        Self { sensors, pwm }
    }

    pub fn duty(&self, channel: PwmChannel) -> Option<u8> {
        self.pwm.duty(channel)
    }

    pub fn sensors(&self) -> &SensorBank {
        &self.sensors
    }

    pub fn sensors_mut(&mut self) -> &mut SensorBank {
        &mut self.sensors
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: SetDutyCycle> SensorPort for HardwareAdapter<P> {
    fn update(&mut self) {
        self.sensors.update_all();
    }

    fn temperature_c(&self, id: SensorId) -> f32 {
        self.sensors.temperature_c(id)
    }
}

// ── PwmPort implementation ────────────────────────────────────

impl<P: SetDutyCycle> PwmPort for HardwareAdapter<P> {
    fn set_duty(&mut self, channel: PwmChannel, duty: u8) {
        self.pwm.set_duty(channel, duty);
    }
}
