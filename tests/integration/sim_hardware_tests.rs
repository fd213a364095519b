//! Full stack on the host: simulated ADC → NTC filter → controllers →
//! PWM bank.  Uses ADC channels no other test in this binary touches.

use coolant::adapters::hardware::HardwareAdapter;
use coolant::app::ports::{SENSOR_FAULT_C, SensorId, SensorPort};
use coolant::app::service::ThermalLoop;
use coolant::config::SystemConfig;
use coolant::control::curve::Mode;
use coolant::pins::{FAN_PWM_CH, PUMP1_PWM_CH, PUMP2_PWM_CH};
use coolant::sensors::temperature::sim_set_adc;

use crate::mock_hw::{ManualClock, RecordingPanel, RecordingSink};

/// ≈35 C and ≈20 C with the default 10k/3950 divider.
const RAW_HOT: u16 = 1600;
const RAW_COOL: u16 = 2270;

#[test]
fn simulated_adc_drives_outputs() {
    let mut cfg = SystemConfig::default();
    cfg.sensors[0].adc_channel = 2;
    cfg.sensors[1].adc_channel = 3;
    sim_set_adc(2, RAW_HOT);
    sim_set_adc(3, RAW_COOL);

    let mut hw = HardwareAdapter::from_config(&cfg).unwrap();
    let mut tl = ThermalLoop::new(&cfg, RecordingPanel::working()).unwrap();
    let clock = ManualClock::at(0);
    let mut sink = RecordingSink::new();

    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    let hot = hw.temperature_c(SensorId(0));
    let cool = hw.temperature_c(SensorId(1));
    assert!((34.0..36.5).contains(&hot), "hot={hot}");
    assert!((19.0..21.0).contains(&cool), "cool={cool}");

    assert_eq!(sink.switches(), vec![("pump1", true)]);
    assert_eq!(hw.duty(PUMP1_PWM_CH), Some(100));
    assert_eq!(hw.duty(PUMP2_PWM_CH), Some(0));
    assert_eq!(hw.duty(FAN_PWM_CH), Some(0));

    // Open thermistor: rail reading, sentinel, pump parks.
    sim_set_adc(2, 4095);
    clock.advance(200);
    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert_eq!(hw.temperature_c(SensorId(0)), SENSOR_FAULT_C);
    assert_eq!(hw.duty(PUMP1_PWM_CH), Some(0));
    assert_eq!(sink.switches(), vec![("pump1", true), ("pump1", false)]);
}
