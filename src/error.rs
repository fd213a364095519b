//! Unified error types for the Coolant firmware.
//!
//! Every fallible path in the firmware is construction-time: the control
//! loop itself never returns an error (bad readings fail low instead).
//! All variants are `Copy` so they can be logged and passed around
//! without allocation.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Configuration is invalid.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Rejected configuration values.  Raised while building curves and
/// controllers at boot, never during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Curve temperature span is empty, reversed, or not finite.
    DegenerateCurve { low_c: f32, high_c: f32 },
    /// An actuator references a sensor slot that does not exist.
    UnknownSensor(u8),
    /// An actuator references a PWM channel that is not wired.
    UnknownChannel(u8),
    /// Two actuators were assigned the same PWM channel.
    DuplicateChannel(u8),
    /// A PWM bank is already at capacity; carries the rejected channel.
    TooManyChannels(u8),
    /// EMA smoothing factor outside `(0, 1]`.
    InvalidFilterAlpha,
    /// Control tick period of zero.
    ZeroTickInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateCurve { low_c, high_c } => {
                write!(f, "empty or reversed curve span ({low_c:.1}..{high_c:.1} C)")
            }
            Self::UnknownSensor(id) => write!(f, "unknown sensor {id}"),
            Self::UnknownChannel(ch) => write!(f, "unknown PWM channel {ch}"),
            Self::DuplicateChannel(ch) => write!(f, "PWM channel {ch} assigned twice"),
            Self::TooManyChannels(ch) => write!(f, "no PWM slot left for channel {ch}"),
            Self::InvalidFilterAlpha => write!(f, "filter alpha must be in (0, 1]"),
            Self::ZeroTickInterval => write!(f, "control interval must be non-zero"),
        }
    }
}

impl core::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
