//! End-to-end control scenarios through [`ThermalLoop`] with mock adapters.

use coolant::app::events::AppEvent;
use coolant::app::ports::SENSOR_FAULT_C;
use coolant::app::service::ThermalLoop;
use coolant::config::SystemConfig;
use coolant::control::actuator::Kickstart;
use coolant::control::curve::{Curve, CurveConfig, Hysteresis, Mode, ModeProfile};
use coolant::error::ConfigError;
use coolant::pins::{FAN_PWM_CH, PUMP1_PWM_CH, PUMP2_PWM_CH};

use crate::mock_hw::{ManualClock, MockHardware, RecordingPanel, RecordingSink};

type Loop = ThermalLoop<RecordingPanel>;

fn default_loop() -> Loop {
    ThermalLoop::new(&SystemConfig::default(), RecordingPanel::working()).unwrap()
}

/// Pump 1 with a 30/27 band in both modes, curve 30..40 C -> 0..100 %,
/// and a 2 s kickstart at `duty`.
fn kickstart_loop(duty: u8) -> Loop {
    let mut cfg = SystemConfig::default();
    let band = Hysteresis::new(30.0, 27.0);
    let curve = CurveConfig::new(30.0, 40.0, 0, 100);
    cfg.pumps[0].hysteresis = ModeProfile::new(band, band);
    cfg.pumps[0].curve = ModeProfile::new(curve, curve);
    cfg.pumps[0].kickstart = Kickstart {
        duration_ms: 2000,
        duty,
    };
    ThermalLoop::new(&cfg, RecordingPanel::working()).unwrap()
}

// ── Scenario A: curve endpoints and midpoint ──────────────────

#[test]
fn scenario_a_curve_mapping() {
    let c = Curve::new(CurveConfig::new(25.0, 40.0, 0, 255)).unwrap();
    assert_eq!(c.map(25.0), 0);
    assert_eq!(c.map(40.0), 255);
    assert_eq!(c.map(32.5), 127);
}

// ── Scenario B: hysteresis band ───────────────────────────────

#[test]
fn scenario_b_hysteresis_through_loop() {
    let mut tl = default_loop();
    let mut hw = MockHardware::at(31.0, 20.0);
    let clock = ManualClock::at(0);
    let mut sink = RecordingSink::new();

    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert_eq!(
        sink.events,
        vec![AppEvent::ActuatorSwitched {
            actuator: "pump1",
            on: true,
            temp_c: 31.0,
        }]
    );

    hw.temps[0] = 28.0;
    clock.advance(200);
    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert!(tl.pumps()[0].is_on(), "28 C is inside the band");

    hw.temps[0] = 26.0;
    clock.advance(200);
    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert!(!tl.pumps()[0].is_on());
    assert_eq!(sink.switches(), vec![("pump1", true), ("pump1", false)]);
    assert_eq!(hw.duty(PUMP1_PWM_CH), Some(0));
    assert_eq!(tl.pumps()[0].duty(), 0);
}

// ── Scenario C: kickstart window ──────────────────────────────

#[test]
fn scenario_c_kickstart_then_curve() {
    let mut tl = kickstart_loop(95);
    let mut hw = MockHardware::at(35.0, 20.0);
    let clock = ManualClock::at(0);
    let mut sink = RecordingSink::new();

    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert_eq!(hw.duty(PUMP1_PWM_CH), Some(95));

    clock.set(1000);
    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert_eq!(hw.duty(PUMP1_PWM_CH), Some(95));

    clock.set(2500);
    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert_eq!(hw.duty(PUMP1_PWM_CH), Some(50), "curve value once kickstart expires");
}

#[test]
fn kickstart_override_above_full_scale_is_clamped() {
    let mut tl = kickstart_loop(200);
    let mut hw = MockHardware::at(35.0, 20.0);
    let clock = ManualClock::at(0);
    let mut sink = RecordingSink::new();

    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert_eq!(hw.duty(PUMP1_PWM_CH), Some(100));
}

#[test]
fn kickstart_window_spans_clock_wrap() {
    let mut tl = kickstart_loop(95);
    let mut hw = MockHardware::at(35.0, 20.0);
    let clock = ManualClock::at(u32::MAX - 499);
    let mut sink = RecordingSink::new();

    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    clock.advance(1500);
    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert_eq!(hw.duty(PUMP1_PWM_CH), Some(95));

    clock.advance(600);
    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert_eq!(hw.duty(PUMP1_PWM_CH), Some(50));
}

// ── Scenario D: sensor fault ──────────────────────────────────

#[test]
fn scenario_d_sentinel_parks_everything() {
    let mut tl = default_loop();
    let mut hw = MockHardware::at(45.0, 45.0);
    let clock = ManualClock::at(0);
    let mut sink = RecordingSink::new();

    tl.tick(&mut hw, &clock, Mode::Benchmark, &mut sink);
    assert!(tl.pumps().iter().all(|p| p.is_on()));
    assert!(tl.fan().is_on());

    hw.set_all(SENSOR_FAULT_C);
    sink.clear();
    clock.advance(200);
    tl.tick(&mut hw, &clock, Mode::Benchmark, &mut sink);
    assert_eq!(
        sink.switches(),
        vec![("pump1", false), ("pump2", false), ("fan", false)]
    );

    clock.advance(200);
    tl.tick(&mut hw, &clock, Mode::Benchmark, &mut sink);
    for ch in [PUMP1_PWM_CH, PUMP2_PWM_CH, FAN_PWM_CH] {
        assert_eq!(hw.duty(ch), Some(0));
    }
    assert_eq!(sink.switches().len(), 3, "no further transitions while faulted");
}

// ── Mode isolation ────────────────────────────────────────────

#[test]
fn benchmark_toggle_switches_band_and_curve_immediately() {
    let mut tl = default_loop();
    // 29 C on sensor 1: below both normal on-thresholds, above both
    // benchmark ones.
    let mut hw = MockHardware::at(20.0, 29.0);
    let clock = ManualClock::at(0);
    let mut sink = RecordingSink::new();

    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert!(sink.events.is_empty());

    clock.advance(200);
    tl.tick(&mut hw, &clock, Mode::Benchmark, &mut sink);
    assert_eq!(
        sink.events[0],
        AppEvent::ModeChanged {
            from: Mode::Normal,
            to: Mode::Benchmark,
        }
    );
    assert_eq!(sink.switches(), vec![("pump2", true), ("fan", true)]);
    // Benchmark fan curve 26..38 C -> 40..100 %.
    assert_eq!(hw.duty(FAN_PWM_CH), Some(55));
    assert_eq!(hw.duty(PUMP2_PWM_CH), Some(100), "kickstart");

    clock.advance(200);
    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    assert!(tl.fan().is_on(), "29 C is not strictly below the normal off-threshold");
    // Normal fan curve starts at 30 C -> 20 %.
    assert_eq!(hw.duty(FAN_PWM_CH), Some(20));
}

// ── Loop mechanics ────────────────────────────────────────────

#[test]
fn every_tick_updates_sensors_then_writes_all_outputs() {
    let mut tl = default_loop();
    let mut hw = MockHardware::at(20.0, 20.0);
    let clock = ManualClock::at(0);
    let mut sink = RecordingSink::new();

    for _ in 0..4 {
        tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
        clock.advance(200);
    }
    assert_eq!(hw.updates, 4);
    assert_eq!(tl.tick_count(), 4);
    assert_eq!(hw.writes.len(), 12);
    for chunk in hw.writes.chunks(3) {
        let channels: Vec<_> = chunk.iter().map(|(c, _)| *c).collect();
        assert_eq!(channels, vec![PUMP1_PWM_CH, PUMP2_PWM_CH, FAN_PWM_CH]);
        assert!(chunk.iter().all(|(_, d)| *d == 0));
    }
}

#[test]
fn telemetry_follows_configured_cadence() {
    let mut cfg = SystemConfig::default();
    cfg.timing.telemetry_interval_ticks = 3;
    let mut tl = ThermalLoop::new(&cfg, RecordingPanel::working()).unwrap();
    let mut hw = MockHardware::at(20.0, 21.0);
    let clock = ManualClock::at(0);
    let mut sink = RecordingSink::new();

    for _ in 0..9 {
        tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    }
    assert_eq!(sink.telemetry_count(), 3);
    let Some(AppEvent::Telemetry(snap)) = sink.events.last() else {
        panic!("last event should be telemetry");
    };
    assert_eq!(snap.temps_c, [20.0, 21.0]);
    assert_eq!(snap.pump_duty, [0, 0]);
    assert_eq!(snap.fan_duty, 0);
    assert_eq!(snap.mode, Mode::Normal);
}

#[test]
fn zero_telemetry_interval_disables_telemetry() {
    let mut cfg = SystemConfig::default();
    cfg.timing.telemetry_interval_ticks = 0;
    let mut tl = ThermalLoop::new(&cfg, RecordingPanel::working()).unwrap();
    let mut hw = MockHardware::at(20.0, 20.0);
    let mut sink = RecordingSink::new();

    for _ in 0..10 {
        tl.tick(&mut hw, &ManualClock::at(0), Mode::Normal, &mut sink);
    }
    assert_eq!(sink.telemetry_count(), 0);
}

#[test]
fn bad_config_is_rejected_at_construction() {
    let mut cfg = SystemConfig::default();
    cfg.fan.curve.normal = CurveConfig::new(40.0, 30.0, 20, 100);
    assert!(matches!(
        ThermalLoop::new(&cfg, RecordingPanel::working()),
        Err(ConfigError::DegenerateCurve { .. })
    ));

    let mut cfg = SystemConfig::default();
    cfg.pumps[0].sensor.0 = 5;
    assert!(matches!(
        ThermalLoop::new(&cfg, RecordingPanel::working()),
        Err(ConfigError::UnknownSensor(5))
    ));
}
