//! Periodic control-tick timer using ESP-IDF's esp_timer API.
//!
//! One timer pushes [`Event::ControlTick`] into the lock-free queue every
//! control interval.  On simulation targets the main loop sleeps instead.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), so
//! they can safely call push_event().

#[cfg(target_os = "espidf")]
use crate::events::{Event, push_event};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::{error, info};

#[cfg(target_os = "espidf")]
static mut CONTROL_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: CONTROL_TIMER is written once in `start_control_timer()` before
/// any callback fires.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn control_timer() -> esp_timer_handle_t {
    unsafe { CONTROL_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn control_tick_cb(_arg: *mut core::ffi::c_void) {
    if !push_event(Event::ControlTick) {
        // Main loop is behind; the next tick catches up.
        log::debug!("hw_timer: event queue full, tick dropped");
    }
}

/// Start the periodic control timer.  Returns `false` if it could not be
/// created or started; the caller falls back to a polling delay.
#[cfg(target_os = "espidf")]
pub fn start_control_timer(interval_ms: u32) -> bool {
    // SAFETY: CONTROL_TIMER is written here once at boot from the single
    // main-task context before any callback fires.  The callback only
    // calls push_event(), which is lock-free.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(control_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"control".as_ptr(),
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut CONTROL_TIMER);
        if ret != ESP_OK {
            error!("hw_timer: control timer create failed (rc={})", ret);
            return false;
        }
        let ret = esp_timer_start_periodic(control_timer(), u64::from(interval_ms) * 1_000);
        if ret != ESP_OK {
            error!("hw_timer: control timer start failed (rc={})", ret);
            return false;
        }
    }
    info!("hw_timer: control tick every {} ms", interval_ms);
    true
}

#[cfg(not(target_os = "espidf"))]
pub fn start_control_timer(interval_ms: u32) -> bool {
    log::info!("hw_timer(sim): no timer, main loop sleeps {} ms per tick", interval_ms);
    false
}
