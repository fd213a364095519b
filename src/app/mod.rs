//! Application core: pure domain logic, zero I/O.
//!
//! The thermal loop orchestrates sensors, actuator controllers and the
//! status display.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
