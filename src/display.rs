//! Status display.
//!
//! Renders a read-only [`StatusSnapshot`] as three text lines in two
//! columns, matching the 128 px panel split at x = 64:
//!
//! ```text
//! T1=23.4C   T2=25.0C
//! P1=40      P2=40
//! Fan=55     BM: OFF
//! ```
//!
//! The panel itself sits behind [`TextPanel`].  A panel that fails to
//! initialise is simply never drawn to; control carries on regardless.

use core::fmt::{self, Write};

use log::{info, warn};
use serde::Serialize;

use crate::app::ports::TextPanel;
use crate::config::SENSOR_COUNT;
use crate::control::curve::Mode;

/// Characters per column (64 px at 6 px per glyph, rounded up).
const COLUMN_WIDTH: usize = 11;

pub type Line = heapless::String<24>;

/// Everything the display and telemetry need from one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub temps_c: [f32; SENSOR_COUNT],
    pub pump_duty: [u8; 2],
    pub fan_duty: u8,
    pub mode: Mode,
}

impl StatusSnapshot {
    pub fn render(&self) -> [Line; 3] {
        let bm = if self.mode.is_benchmark() { "BM: ON" } else { "BM: OFF" };
        [
            columns(
                format_args!("T1={:.1}C", self.temps_c[0]),
                format_args!("T2={:.1}C", self.temps_c[1]),
            ),
            columns(
                format_args!("P1={}", self.pump_duty[0]),
                format_args!("P2={}", self.pump_duty[1]),
            ),
            columns(format_args!("Fan={}", self.fan_duty), format_args!("{bm}")),
        ]
    }
}

fn columns(left: fmt::Arguments<'_>, right: fmt::Arguments<'_>) -> Line {
    let mut line = Line::new();
    // Overflow only truncates the line.
    let _ = line.write_fmt(left);
    while line.len() < COLUMN_WIDTH {
        if line.push(' ').is_err() {
            break;
        }
    }
    let _ = line.write_fmt(right);
    line
}

pub struct StatusDisplay<P: TextPanel> {
    panel: P,
    ready: bool,
}

impl<P: TextPanel> StatusDisplay<P> {
    pub fn new(panel: P) -> Self {
        Self { panel, ready: false }
    }

    /// Initialise the panel.  The result is remembered; a failed panel is
    /// skipped by every later [`update`](Self::update).
    pub fn begin(&mut self) -> bool {
        self.ready = self.panel.init();
        if self.ready {
            self.panel.draw(&["Display OK!"]);
            info!("display: ready");
        } else {
            warn!("display: init failed, running headless");
        }
        self.ready
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn update(&mut self, snapshot: &StatusSnapshot) {
        if !self.ready {
            return;
        }
        let [a, b, c] = snapshot.render();
        self.panel.draw(&[a.as_str(), b.as_str(), c.as_str()]);
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}
