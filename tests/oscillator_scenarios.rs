//! Spring-mass oscillator scenario tests.

use oscisim::prelude::*;
use std::f64::consts::PI;

/// m = 1 kg, k = 10 N/m, A = 1 m, no damping: x = 1, −1, 1 at
/// t = 0, π/√10, 2π/√10.
#[test]
fn undamped_reference_points() {
    let params = OscillatorParams::new(1.0, 10.0, 1.0, 0.0).expect("params");
    let omega = 10.0_f64.sqrt();

    assert!((params.position_at(0.0) - 1.0).abs() < 1e-9);
    assert!((params.position_at(PI / omega) + 1.0).abs() < 1e-9);
    assert!((params.position_at(2.0 * PI / omega) - 1.0).abs() < 1e-9);
}

/// Every damping regime starts at the amplitude.
#[test]
fn every_regime_starts_at_amplitude() {
    for damping in [0.0, 0.5, 2.0 * 10.0_f64.sqrt(), 20.0] {
        let params = OscillatorParams::new(1.0, 10.0, 0.7, damping).expect("params");
        assert_eq!(params.position_at(0.0), 0.7);
    }
}

/// Changing a parameter mid-animation recomputes the whole curve but keeps
/// the playhead where it was.
#[test]
fn parameter_change_keeps_phase() {
    let mut session = OscillatorSession::from_config(&SimConfig::default().oscillator).expect("session");
    for _ in 0..123 {
        session.advance_frame();
    }
    let t = session.playback_time();
    let index = session.current_index();

    let heavier = OscillatorParams::new(3.0, 10.0, 1.0, 0.1).expect("params");
    assert!(session.apply_params(heavier));

    assert_eq!(session.playback_time(), t);
    assert_eq!(session.current_index(), index);
    let expected: Vec<f64> = session
        .grid()
        .times()
        .iter()
        .map(|&t| position_at(t, 1.0, 3.0, 10.0, 0.1))
        .collect();
    assert_eq!(session.positions(), expected.as_slice());
}

/// Derived quantities track the current parameters.
#[test]
fn quantities_follow_parameters() {
    let mut session = OscillatorSession::from_config(&SimConfig::default().oscillator).expect("session");
    let before = session.quantities().period;

    session.apply_params(OscillatorParams::new(1.0, 20.0, 1.0, 0.1).expect("params"));
    let after = session.quantities();

    assert!(after.period < before);
    assert!((after.omega - 20.0_f64.sqrt()).abs() < 1e-12);
    assert!((after.frequency - 1.0 / after.period).abs() < 1e-12);
    assert_eq!(after.regime, DampingRegime::Underdamped);
}

/// The playhead wraps to the start of the grid after one duration.
#[test]
fn playback_wraps() {
    let grid = SampleGrid::new(1.0, 101).expect("grid");
    let mut session = OscillatorSession::new(OscillatorParams::default(), grid, 20);
    for _ in 0..51 {
        session.advance_frame();
    }
    // 51 × 20 ms = 1.02 s
    assert!((session.playback_time() - 0.02).abs() < 1e-9);
    assert!(session.current_index() <= 2);
}
