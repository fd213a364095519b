//! Hysteresis thresholds, temperature → duty curves, and the
//! normal/benchmark profile pair that selects between them.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Operating mode, chosen by the operator and threaded into every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Normal,
    /// Aggressive thresholds/curves for stress-testing cooling capacity.
    Benchmark,
}

impl Mode {
    pub fn from_benchmark(benchmark: bool) -> Self {
        if benchmark { Self::Benchmark } else { Self::Normal }
    }

    pub fn is_benchmark(self) -> bool {
        matches!(self, Self::Benchmark)
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Benchmark,
            Self::Benchmark => Self::Normal,
        }
    }
}

/// One value per [`Mode`].  Selection is all-or-nothing; values from the
/// two modes are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeProfile<T> {
    pub normal: T,
    pub benchmark: T,
}

impl<T> ModeProfile<T> {
    pub const fn new(normal: T, benchmark: T) -> Self {
        Self { normal, benchmark }
    }

    pub fn select(&self, mode: Mode) -> &T {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Benchmark => &self.benchmark,
        }
    }

    /// Apply a fallible conversion to both values.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<ModeProfile<U>, E> {
        Ok(ModeProfile {
            normal: f(&self.normal)?,
            benchmark: f(&self.benchmark)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Hysteresis
// ---------------------------------------------------------------------------

/// On/off switching band.  Turn on strictly above `on_c`, turn off
/// strictly below `off_c`.
///
/// `on_c > off_c` is expected but not enforced; an inverted band makes the
/// actuator toggle on consecutive ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hysteresis {
    pub on_c: f32,
    pub off_c: f32,
}

impl Hysteresis {
    pub const fn new(on_c: f32, off_c: f32) -> Self {
        Self { on_c, off_c }
    }

    pub fn is_well_formed(&self) -> bool {
        self.on_c > self.off_c
    }

    /// Log a warning for an inverted band.  Returns `self` unchanged.
    pub(crate) fn checked(self, owner: &str) -> Self {
        if !self.is_well_formed() {
            warn!(
                "{}: hysteresis on={:.1}C <= off={:.1}C, expect chatter",
                owner, self.on_c, self.off_c
            );
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Curve
// ---------------------------------------------------------------------------

/// Raw curve parameters as they appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    pub low_c: f32,
    pub high_c: f32,
    pub low_duty: u8,
    pub high_duty: u8,
}

impl CurveConfig {
    pub const fn new(low_c: f32, high_c: f32, low_duty: u8, high_duty: u8) -> Self {
        Self {
            low_c,
            high_c,
            low_duty,
            high_duty,
        }
    }
}

/// Validated piecewise-linear map from temperature to duty.
///
/// Flat at `low_duty` up to `low_c`, flat at `high_duty` from `high_c`,
/// linear in between.  The temperature span is guaranteed non-empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    low_c: f32,
    high_c: f32,
    low_duty: u8,
    high_duty: u8,
}

impl Curve {
    pub fn new(cfg: CurveConfig) -> Result<Self, ConfigError> {
        // Also rejects NaN bounds.
        if !(cfg.high_c > cfg.low_c) || !cfg.low_c.is_finite() || !cfg.high_c.is_finite() {
            return Err(ConfigError::DegenerateCurve {
                low_c: cfg.low_c,
                high_c: cfg.high_c,
            });
        }
        Ok(Self {
            low_c: cfg.low_c,
            high_c: cfg.high_c,
            low_duty: cfg.low_duty,
            high_duty: cfg.high_duty,
        })
    }

    pub fn low_c(&self) -> f32 {
        self.low_c
    }

    pub fn high_c(&self) -> f32 {
        self.high_c
    }

    /// Duty for temperature `t`.  A NaN `t` maps to `low_duty`.
    pub fn map(&self, t: f32) -> u8 {
        if t <= self.low_c || t.is_nan() {
            return self.low_duty;
        }
        if t >= self.high_c {
            return self.high_duty;
        }
        let ratio = (t - self.low_c) / (self.high_c - self.low_c);
        let span = f32::from(self.high_duty) - f32::from(self.low_duty);
        let duty = f32::from(self.low_duty) + (ratio * span).floor();
        duty.clamp(0.0, 255.0) as u8
    }
}
