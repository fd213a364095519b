//! PWM output bank.
//!
//! Maps logical [`PwmChannel`]s to `embedded-hal` duty-cycle outputs and
//! rescales the controller's percent duty into timer ticks.  On target the
//! outputs are [`LedcChannel`]s; tests plug in any `SetDutyCycle` fake.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use log::{error, warn};

use crate::app::ports::{DUTY_MAX, PwmChannel, PwmPort};
use crate::drivers::hw_init;
use crate::error::ConfigError;

struct Output<P> {
    channel: PwmChannel,
    pin: P,
    /// Last duty written, percent.
    duty: u8,
}

/// Up to `N` duty-cycle outputs addressed by channel id.
pub struct PwmBank<P, const N: usize> {
    outputs: heapless::Vec<Output<P>, N>,
}

impl<P: SetDutyCycle, const N: usize> PwmBank<P, N> {
    pub fn new() -> Self {
        Self {
            outputs: heapless::Vec::new(),
        }
    }

    /// Attach `pin` as `channel`.  The output starts at 0 %.
    pub fn add(&mut self, channel: PwmChannel, mut pin: P) -> Result<(), ConfigError> {
        if self.outputs.iter().any(|o| o.channel == channel) {
            return Err(ConfigError::DuplicateChannel(channel.0));
        }
        if let Err(e) = pin.set_duty_cycle_fully_off() {
            error!("pwm ch{}: initial off failed: {:?}", channel.0, e);
        }
        self.outputs
            .push(Output { channel, pin, duty: 0 })
            .map_err(|_| ConfigError::TooManyChannels(channel.0))
    }

    /// Last duty written to `channel`, percent.
    pub fn duty(&self, channel: PwmChannel) -> Option<u8> {
        self.find(channel).map(|o| o.duty)
    }

    pub fn pin(&self, channel: PwmChannel) -> Option<&P> {
        self.find(channel).map(|o| &o.pin)
    }

    fn find(&self, channel: PwmChannel) -> Option<&Output<P>> {
        self.outputs.iter().find(|o| o.channel == channel)
    }
}

impl<P: SetDutyCycle, const N: usize> Default for PwmBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SetDutyCycle, const N: usize> PwmPort for PwmBank<P, N> {
    fn set_duty(&mut self, channel: PwmChannel, duty: u8) {
        let Some(out) = self.outputs.iter_mut().find(|o| o.channel == channel) else {
            warn!("pwm: write to unwired channel {}", channel.0);
            return;
        };
        let duty = duty.min(DUTY_MAX);
        if let Err(e) = out.pin.set_duty_cycle_percent(duty) {
            error!("pwm ch{}: set {}% failed: {:?}", channel.0, duty, e);
            return;
        }
        out.duty = duty;
    }
}

// ---------------------------------------------------------------------------
// LEDC output
// ---------------------------------------------------------------------------

/// One LEDC channel configured by [`hw_init::init_peripherals`].
#[derive(Debug, Clone, Copy)]
pub struct LedcChannel {
    channel: u32,
}

impl LedcChannel {
    pub fn new(channel: PwmChannel) -> Self {
        Self {
            channel: u32::from(channel.0),
        }
    }
}

impl ErrorType for LedcChannel {
    type Error = Infallible;
}

impl SetDutyCycle for LedcChannel {
    fn max_duty_cycle(&self) -> u16 {
        hw_init::LEDC_DUTY_MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        hw_init::ledc_set(self.channel, duty.min(hw_init::LEDC_DUTY_MAX));
        Ok(())
    }
}
