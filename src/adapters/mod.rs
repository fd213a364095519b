//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements            | Connects to                 |
//! |-------------|-----------------------|-----------------------------|
//! | `hardware`  | SensorPort, PwmPort   | ESP32 ADC1, LEDC            |
//! | `log_panel` | TextPanel             | Serial log output           |
//! | `log_sink`  | EventSink             | Serial log output           |
//! | `time`      | Clock                 | ESP32 high-resolution timer |

pub mod hardware;
pub mod log_panel;
pub mod log_sink;
pub mod time;
