//! Status display wiring: banner, per-tick frames, and headless operation.

use coolant::app::events::AppEvent;
use coolant::app::service::ThermalLoop;
use coolant::config::SystemConfig;
use coolant::control::curve::Mode;
use coolant::pins::PUMP1_PWM_CH;

use crate::mock_hw::{ManualClock, MockHardware, RecordingPanel, RecordingSink};

#[test]
fn start_shows_banner_and_reports_success() {
    let mut tl = ThermalLoop::new(&SystemConfig::default(), RecordingPanel::working()).unwrap();
    let mut sink = RecordingSink::new();
    tl.start(&mut sink);

    assert_eq!(sink.events, vec![AppEvent::Started { display_ok: true }]);
    assert_eq!(tl.display().panel().frames, vec![vec!["Display OK!".to_string()]]);
}

#[test]
fn each_tick_draws_current_snapshot() {
    let mut tl = ThermalLoop::new(&SystemConfig::default(), RecordingPanel::working()).unwrap();
    let mut hw = MockHardware::at(23.44, 25.0);
    let clock = ManualClock::at(0);
    let mut sink = RecordingSink::new();
    tl.start(&mut sink);

    tl.tick(&mut hw, &clock, Mode::Normal, &mut sink);
    let frame = tl.display().panel().last_frame().unwrap();
    assert_eq!(frame, ["T1=23.4C   T2=25.0C", "P1=0       P2=0", "Fan=0      BM: OFF"]);

    hw.temps[0] = 31.0;
    clock.advance(200);
    tl.tick(&mut hw, &clock, Mode::Benchmark, &mut sink);
    let frame = tl.display().panel().last_frame().unwrap();
    assert_eq!(frame[0], "T1=31.0C   T2=25.0C");
    assert_eq!(frame[1], "P1=100     P2=0");
    assert_eq!(frame[2], "Fan=0      BM: ON");
    assert_eq!(tl.display().panel().frames.len(), 3);
}

#[test]
fn control_runs_without_a_display() {
    let mut tl = ThermalLoop::new(&SystemConfig::default(), RecordingPanel::broken()).unwrap();
    let mut hw = MockHardware::at(31.0, 20.0);
    let mut sink = RecordingSink::new();
    tl.start(&mut sink);
    assert_eq!(sink.events, vec![AppEvent::Started { display_ok: false }]);

    tl.tick(&mut hw, &ManualClock::at(0), Mode::Normal, &mut sink);
    assert!(tl.display().panel().frames.is_empty());
    assert_eq!(hw.duty(PUMP1_PWM_CH), Some(100));
}

#[test]
fn disabled_display_is_never_initialised() {
    let mut cfg = SystemConfig::default();
    cfg.display.enabled = false;
    let mut tl = ThermalLoop::new(&cfg, RecordingPanel::working()).unwrap();
    let mut sink = RecordingSink::new();
    tl.start(&mut sink);

    tl.tick(&mut MockHardware::at(20.0, 20.0), &ManualClock::at(0), Mode::Normal, &mut sink);
    assert_eq!(tl.display().panel().init_calls, 0);
    assert!(tl.display().panel().frames.is_empty());
    assert_eq!(sink.events[0], AppEvent::Started { display_ok: false });
}
