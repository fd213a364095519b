//! PWM outputs, peripheral bring-up, the control timer and the mode button.

pub mod button;
pub mod hw_init;
pub mod hw_timer;
pub mod pwm;
