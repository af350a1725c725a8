//! Terminal front-end state for both simulations.
//!
//! Application state and key handling live here so they can be tested;
//! the binaries only own the terminal and the event loop.

#[cfg(feature = "tui")]
pub mod oscillator_app;
#[cfg(feature = "tui")]
pub mod pendulum_app;
#[cfg(feature = "tui")]
pub mod widgets;

use std::path::Path;

use crate::config::SimConfig;
use crate::controls::ControlAction;
use crate::error::SimResult;

/// Embedded default configuration shared by both front ends.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../configs/default.yaml");

/// Load the configuration named on the command line, or the embedded
/// default when no path is given.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> SimResult<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path),
        None => SimConfig::from_yaml(DEFAULT_CONFIG_YAML),
    }
}

/// Map a pressed character to a control action.
///
/// Key bindings: `s` start, `p` pause, `r` reset, `q` quit.
#[must_use]
pub fn action_for_char(c: char) -> Option<ControlAction> {
    match c.to_ascii_lowercase() {
        's' => Some(ControlAction::Start),
        'p' => Some(ControlAction::Pause),
        'r' => Some(ControlAction::Reset),
        'q' => Some(ControlAction::Quit),
        _ => None,
    }
}

/// Map a crossterm key to a control action.
#[cfg(feature = "tui")]
#[must_use]
pub fn action_for_key(code: crossterm::event::KeyCode) -> Option<ControlAction> {
    use crossterm::event::KeyCode;

    match code {
        KeyCode::Char(c) => action_for_char(c),
        KeyCode::Esc => Some(ControlAction::Quit),
        KeyCode::Tab | KeyCode::Down => Some(ControlAction::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(ControlAction::FocusPrev),
        KeyCode::Right => Some(ControlAction::Increase),
        KeyCode::Left => Some(ControlAction::Decrease),
        _ => None,
    }
}

#[cfg(test)]
#[cfg(feature = "tui")]
mod tests;
