//! Actuator control model: hysteresis gating, curve mapping, and the
//! per-kind post-processing step.

pub mod actuator;
pub mod curve;

pub use actuator::{ActuatorController, ActuatorKind, Kickstart, PostProcess, Transition};
pub use curve::{Curve, CurveConfig, Hysteresis, Mode, ModeProfile};
