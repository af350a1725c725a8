//! Integration tests for the TUI app modules.

use super::oscillator_app::OscillatorApp;
use super::pendulum_app::PendulumApp;
use crate::engine::RunState;
use crate::render::RenderCommand;
use crossterm::event::KeyCode;

#[test]
fn test_pendulum_app_lifecycle() {
    let mut app = PendulumApp::new();
    assert_eq!(app.session.run_state(), RunState::Stopped);

    app.handle_key(KeyCode::Char('s'));
    for _ in 0..5 {
        app.update(1.0 / 60.0);
    }
    assert_eq!(app.session.step_count(), 5);
    assert_eq!(app.session.trail().len(), 5);

    app.handle_key(KeyCode::Char('p'));
    let steps = app.session.step_count();
    app.update(1.0 / 60.0);
    assert_eq!(app.session.step_count(), steps);

    app.handle_key(KeyCode::Char('s'));
    app.update(1.0 / 60.0);
    assert_eq!(app.session.step_count(), steps + 1);

    app.handle_key(KeyCode::Char('r'));
    assert_eq!(app.session.step_count(), 0);
    assert!(app.session.trail().is_empty());

    app.handle_key(KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn test_pendulum_trail_bounded_by_config() {
    let mut app = PendulumApp::new();
    app.handle_key(KeyCode::Char('s'));
    for _ in 0..250 {
        app.update(1.0 / 60.0);
    }
    assert_eq!(app.session.trail().len(), 100);
}

#[test]
fn test_pendulum_stalled_frame_is_clamped() {
    let mut app = PendulumApp::new();
    app.handle_key(KeyCode::Char('s'));
    app.update(10.0);
    assert!((app.session.sim_time() - 0.05).abs() < 1e-12);
}

#[test]
fn test_pendulum_scene_has_trail_after_running() {
    let mut app = PendulumApp::new();
    app.handle_key(KeyCode::Char('s'));
    for _ in 0..10 {
        app.update(1.0 / 60.0);
    }
    assert!(app
        .scene()
        .iter()
        .any(|c| matches!(c, RenderCommand::DrawPolyline { points, .. } if points.len() == 10)));
}

#[test]
fn test_oscillator_app_lifecycle() {
    let mut app = OscillatorApp::new();
    let initial = app.session.current_position();
    assert!((initial - 1.0).abs() < 1e-12);

    for _ in 0..10 {
        app.update();
    }
    assert_eq!(app.session.frame(), 10);

    // Spring constant up one step
    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Right);
    app.update();
    assert_eq!(app.session.recomputations(), 1);
    assert!((app.session.params().spring_constant() - 10.1).abs() < 1e-9);

    app.handle_key(KeyCode::Char('r'));
    app.update();
    assert_eq!(app.session.recomputations(), 2);
    assert!((app.session.params().spring_constant() - 10.0).abs() < f64::EPSILON);

    app.handle_key(KeyCode::Esc);
    assert!(app.should_quit);
}

#[test]
fn test_oscillator_playback_loops() {
    let mut app = OscillatorApp::new();
    // 500 frames × 20 ms = one full 10 s loop
    for _ in 0..500 {
        app.update();
    }
    assert!(app.session.playback_time() < 1e-6 || app.session.playback_time() > 9.99);
}
