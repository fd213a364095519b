//! Fuzz target: `ActuatorController::update`
//!
//! Each 7-byte record is one tick: a temperature (f32, any bit pattern
//! including NaN and infinities), a clock step, and a mode flag.  Drives a
//! kickstart pump through arbitrary sequences and asserts that it never
//! panics, never exceeds full scale, and always writes 0 while off.
//!
//! cargo fuzz run fuzz_actuator_ticks

#![no_main]

use coolant::app::ports::{DUTY_MAX, PwmChannel, PwmPort, SensorId, SensorPort};
use coolant::control::actuator::{ActuatorController, Kickstart, PostProcess};
use coolant::control::curve::{CurveConfig, Hysteresis, Mode, ModeProfile};
use libfuzzer_sys::fuzz_target;

struct Bench {
    temp_c: f32,
    last: Option<u8>,
}

impl SensorPort for Bench {
    fn update(&mut self) {}
    fn temperature_c(&self, _id: SensorId) -> f32 {
        self.temp_c
    }
}

impl PwmPort for Bench {
    fn set_duty(&mut self, _channel: PwmChannel, duty: u8) {
        self.last = Some(duty);
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(mut pump) = ActuatorController::new(
        "fuzz",
        SensorId(0),
        PwmChannel(0),
        ModeProfile::new(Hysteresis::new(30.0, 27.0), Hysteresis::new(26.0, 24.0)),
        ModeProfile::new(
            CurveConfig::new(28.0, 40.0, 30, 100),
            CurveConfig::new(24.0, 34.0, 50, 255),
        ),
        PostProcess::Kickstart(Kickstart {
            duration_ms: 2000,
            duty: 200,
        }),
    ) else {
        return;
    };

    let mut hw = Bench {
        temp_c: 0.0,
        last: None,
    };
    let mut now_ms = u32::MAX - 10_000;

    for rec in data.chunks_exact(7) {
        hw.temp_c = f32::from_le_bytes([rec[0], rec[1], rec[2], rec[3]]);
        now_ms = now_ms.wrapping_add(u32::from(u16::from_le_bytes([rec[4], rec[5]])));
        let mode = Mode::from_benchmark(rec[6] & 1 == 1);

        pump.update(&mut hw, mode, now_ms);

        assert!(pump.duty() <= DUTY_MAX, "duty above full scale");
        assert_eq!(hw.last, Some(pump.duty()), "written duty differs from state");
        if !pump.is_on() {
            assert_eq!(pump.duty(), 0, "off actuator must write 0");
        }
    }
});
