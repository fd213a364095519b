//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! Telemetry snapshots are serialised as one JSON object per line so a
//! host script can tail the console.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(snapshot) => match serde_json::to_string(snapshot) {
                Ok(json) => info!("TELEM | {}", json),
                Err(e) => warn!("TELEM | encode failed: {}", e),
            },
            AppEvent::ActuatorSwitched {
                actuator,
                on,
                temp_c,
            } => {
                info!(
                    "STATE | {} {} at {:.1}\u{00b0}C",
                    actuator,
                    if *on { "ON" } else { "OFF" },
                    temp_c
                );
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {:?} -> {:?}", from, to);
            }
            AppEvent::Started { display_ok } => {
                info!("START | display={}", if *display_ok { "OK" } else { "absent" });
            }
        }
    }
}
