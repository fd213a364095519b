//! Console-backed text panel.
//!
//! Implements [`TextPanel`] by logging each frame as one line.  Stands in
//! for the OLED when no panel driver is linked, and is what the host
//! simulation draws to.  Identical consecutive frames are not repeated.

use core::fmt::Write;

use log::info;

use crate::app::ports::TextPanel;

type Frame = heapless::String<96>;

#[derive(Debug)]
pub struct LogPanel {
    /// I²C address of the panel this adapter stands in for.
    address: u8,
    last: Frame,
    frames: u32,
}

impl LogPanel {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            last: Frame::new(),
            frames: 0,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Frames actually written (duplicates excluded).
    pub fn frames_written(&self) -> u32 {
        self.frames
    }

    pub fn last_frame(&self) -> &str {
        self.last.as_str()
    }
}

impl TextPanel for LogPanel {
    fn init(&mut self) -> bool {
        info!("panel: console output in place of OLED @0x{:02X}", self.address);
        true
    }

    fn draw(&mut self, lines: &[&str]) {
        let mut frame = Frame::new();
        for (i, line) in lines.iter().enumerate() {
            let sep = if i == 0 { "" } else { " | " };
            // Overflow only truncates the log line.
            let _ = write!(frame, "{sep}{line}");
        }
        if frame == self.last {
            return;
        }
        info!("PANEL | {}", frame);
        self.last = frame;
        self.frames = self.frames.wrapping_add(1);
    }
}
