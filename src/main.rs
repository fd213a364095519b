//! Coolant Firmware: Main Entry Point
//!
//! Hexagonal architecture with event-driven execution.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LogEventSink   LogPanel     MonotonicClock │
//! │  (Sensor+Pwm)       (EventSink)    (TextPanel)  (Clock)        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │             ThermalLoop (pure logic)                   │    │
//! │  │  pump1 · pump2 · fan · status display                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Control timer ─▶ event queue ◀─ button ISR                    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{debug, error, info, warn};

use coolant::adapters::hardware::HardwareAdapter;
use coolant::adapters::log_panel::LogPanel;
use coolant::adapters::log_sink::LogEventSink;
use coolant::adapters::time::MonotonicClock;
use coolant::app::ports::Clock;
use coolant::app::service::ThermalLoop;
use coolant::config::SystemConfig;
use coolant::control::curve::Mode;
use coolant::drivers::button::{ButtonDriver, ButtonEvent};
use coolant::drivers::{hw_init, hw_timer};
use coolant::error::Error;
use coolant::events::{self, Event, push_event};
use coolant::pins;

/// Event-queue poll period while the hardware timer drives ticks.
const IDLE_POLL_MS: u64 = 10;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("╔══════════════════════════════════════╗");
    info!("║  Coolant v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate().map_err(Error::from)?;

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}", e);
        return Err(Error::from(e).into());
    }
    if let Err(e) = hw_init::init_isr_service() {
        warn!("ISR service init failed: {} (button disabled)", e);
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::from_config(&config).map_err(Error::from)?;
    let clock = MonotonicClock::new();
    let mut log_sink = LogEventSink::new();
    let mut button = ButtonDriver::new(pins::BUTTON_GPIO);

    // ── 5. Construct the control loop ─────────────────────────
    let mut thermal = ThermalLoop::new(&config, LogPanel::new(config.display.i2c_address)).map_err(Error::from)?;
    thermal.start(&mut log_sink);

    let interval_ms = config.timing.control_interval_ms;
    let timer_running = hw_timer::start_control_timer(interval_ms);
    let mut mode = Mode::Normal;

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    loop {
        if timer_running {
            std::thread::sleep(Duration::from_millis(IDLE_POLL_MS));
        } else {
            // No hardware timer (host simulation or create failure):
            // pace ticks with a sleep instead.
            std::thread::sleep(Duration::from_millis(u64::from(interval_ms)));
            push_event(Event::ControlTick);
        }

        events::drain_events(|event| match event {
            Event::ControlTick => {
                thermal.tick(&mut hw, &clock, mode, &mut log_sink);
            }
            Event::ButtonPressed => {
                debug!("button: edge");
            }
        });

        if let Some(gesture) = button.tick(clock.now_ms()) {
            match gesture {
                ButtonEvent::ShortPress => {
                    mode = mode.toggled();
                    info!("Button: short press → {:?} mode", mode);
                }
                ButtonEvent::LongPress | ButtonEvent::DoublePress => {
                    info!("Button: {:?} ignored", gesture);
                }
            }
        }
    }
}
