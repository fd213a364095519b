//! ISR-debounced button driver with short, long, and double press detection.
//!
//! ## Hardware
//!
//! Active-low momentary switch with external pull-up. GPIO fires on
//! falling edge; ISR records the raw timestamp into an atomic, and the
//! `tick()` method (called from the main loop at control-tick rate)
//! runs the debounce + gesture state machine.  A short press toggles
//! benchmark mode.
//!
//! ## Gesture detection
//!
//! | Gesture      | Condition                              | Event          |
//! |--------------|----------------------------------------|----------------|
//! | Short press  | Release < 5s, no second press < 300ms  | `ShortPress`   |
//! | Long press   | Hold >= 5s                             | `LongPress`    |
//! | Double press | Second press within 300ms of release   | `DoublePress`  |
//!
//! All timing uses wrapping `u32` millisecond arithmetic.

use core::sync::atomic::{AtomicU32, Ordering};

const DEBOUNCE_MS: u32 = 50;
const LONG_PRESS_MS: u32 = 5000;
const DOUBLE_PRESS_WINDOW_MS: u32 = 300;

/// Raw ISR timestamp (milliseconds since boot, truncated to u32).
/// Written by the ISR, read by the main loop.  0 means "never pressed".
static BUTTON_ISR_TIMESTAMP: AtomicU32 = AtomicU32::new(0);

/// Button events emitted after gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    ShortPress,
    LongPress,
    DoublePress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Idle,
    DebounceWait { since_ms: u32 },
    Pressed { since_ms: u32 },
    /// Long press already reported; wait for release before re-arming.
    HeldLong,
    WaitSecondPress { release_ms: u32 },
}

pub struct ButtonDriver {
    gpio: i32,
    state: GestureState,
    last_isr_ms: u32,
}

impl ButtonDriver {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            state: GestureState::Idle,
            last_isr_ms: 0,
        }
    }

    /// GPIO pin this button is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Call from the main loop at each control tick.
    /// Returns a classified gesture event, if any.
    pub fn tick(&mut self, now_ms: u32) -> Option<ButtonEvent> {
        let isr_ms = BUTTON_ISR_TIMESTAMP.load(Ordering::Acquire);
        self.step(now_ms, isr_ms, self.is_pressed_hw())
    }

    /// Advance the gesture machine with an explicit edge timestamp and
    /// pin level (`pressed` = line pulled low).
    pub fn step(&mut self, now_ms: u32, isr_ms: u32, pressed: bool) -> Option<ButtonEvent> {
        let new_edge = isr_ms != 0 && isr_ms != self.last_isr_ms;
        if new_edge {
            self.last_isr_ms = isr_ms;
        }

        match self.state {
            GestureState::Idle => {
                if new_edge {
                    self.state = GestureState::DebounceWait { since_ms: now_ms };
                }
                None
            }

            GestureState::DebounceWait { since_ms } => {
                if now_ms.wrapping_sub(since_ms) >= DEBOUNCE_MS {
                    // Line must still be low once the window closes.
                    self.state = if pressed {
                        GestureState::Pressed { since_ms }
                    } else {
                        GestureState::Idle
                    };
                }
                None
            }

            GestureState::Pressed { since_ms } => {
                let held_ms = now_ms.wrapping_sub(since_ms);
                if held_ms >= LONG_PRESS_MS {
                    self.state = if pressed { GestureState::HeldLong } else { GestureState::Idle };
                    return Some(ButtonEvent::LongPress);
                }
                if !pressed {
                    self.state = GestureState::WaitSecondPress { release_ms: now_ms };
                }
                None
            }

            GestureState::HeldLong => {
                if !pressed {
                    self.state = GestureState::Idle;
                }
                None
            }

            GestureState::WaitSecondPress { release_ms } => {
                let gap = now_ms.wrapping_sub(release_ms);

                // Edges inside the debounce window are release bounce.
                if new_edge && gap >= DEBOUNCE_MS && gap <= DOUBLE_PRESS_WINDOW_MS {
                    self.state = GestureState::Idle;
                    return Some(ButtonEvent::DoublePress);
                }
                if gap > DOUBLE_PRESS_WINDOW_MS {
                    self.state = GestureState::Idle;
                    return Some(ButtonEvent::ShortPress);
                }
                None
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn is_pressed_hw(&self) -> bool {
        !crate::drivers::hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_pressed_hw(&self) -> bool {
        false
    }
}

/// ISR handler.  Register this on the button GPIO falling edge.
/// Safe to call from interrupt context (lock-free atomic store).
pub fn button_isr_handler(now_ms: u32) {
    BUTTON_ISR_TIMESTAMP.store(now_ms, Ordering::Release);
}
