//! GPIO / peripheral pin assignments for the Coolant controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

use crate::app::ports::PwmChannel;

// ---------------------------------------------------------------------------
// PWM outputs (4-wire pump/fan PWM inputs, 25 kHz)
// ---------------------------------------------------------------------------

/// Logical channel ids double as LEDC channel numbers.
pub const PUMP1_PWM_CH: PwmChannel = PwmChannel(0);
pub const PUMP2_PWM_CH: PwmChannel = PwmChannel(1);
pub const FAN_PWM_CH: PwmChannel = PwmChannel(2);

pub const PUMP1_PWM_GPIO: i32 = 1;
pub const PUMP2_PWM_GPIO: i32 = 2;
pub const FAN_PWM_GPIO: i32 = 3;

pub const PWM_CHANNEL_COUNT: usize = 3;

/// Channel → GPIO routing, in LEDC channel order.
pub const PWM_CHANNELS: [(PwmChannel, i32); PWM_CHANNEL_COUNT] = [
    (PUMP1_PWM_CH, PUMP1_PWM_GPIO),
    (PUMP2_PWM_CH, PUMP2_PWM_GPIO),
    (FAN_PWM_CH, FAN_PWM_GPIO),
];

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Intel 4-wire fan spec frequency; also inaudible for the pumps.
pub const PWM_FREQ_HZ: u32 = 25_000;

// ---------------------------------------------------------------------------
// Sensors: NTC thermistors on ADC1
// ---------------------------------------------------------------------------

/// Loop A coolant temperature (GPIO 5).
pub const LOOP_A_TEMP_ADC_CH: u32 = 4;
/// Loop B coolant temperature (GPIO 6).
pub const LOOP_B_TEMP_ADC_CH: u32 = 5;

// ---------------------------------------------------------------------------
// User button (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button: short press toggles benchmark mode.
pub const BUTTON_GPIO: i32 = 16;
