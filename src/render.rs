//! Platform-agnostic render commands for both simulations.
//!
//! The physics core works in meters; this module owns the mapping to pixels
//! and produces draw commands a front end replays on its own surface.
//!
//! Pendulum scenes are emitted in screen pixels (y grows downward). The
//! oscillator scene and its position plot are emitted in world units
//! (meters and seconds, y grows upward) with the wall at `x = -2`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::domains::physics::{OscillatorQuantities, PendulumQuantities};
use crate::scenarios::oscillator::OscillatorSession;
use crate::scenarios::pendulum::PendulumSession;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const GRAY: Self = Self::rgb(200, 200, 200);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const BLUE: Self = Self::rgb(66, 133, 244);
    pub const DARK_BLUE: Self = Self::rgb(41, 101, 202);
}

/// Platform-agnostic render command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Clear the surface.
    Clear { color: Color },

    /// Draw a circle.
    DrawCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        filled: bool,
    },

    /// Draw a line segment.
    DrawLine {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    },

    /// Draw an open polyline.
    DrawPolyline {
        points: Vec<(f64, f64)>,
        color: Color,
    },

    /// Draw a text label.
    DrawText {
        x: f64,
        y: f64,
        text: String,
        color: Color,
    },
}

/// Maps pendulum offsets in meters to screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMapping {
    pixels_per_meter: f64,
    pivot: (f64, f64),
    width: f64,
    height: f64,
}

impl Default for ScreenMapping {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl ScreenMapping {
    /// Build from the render section of the configuration.
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            pixels_per_meter: config.pixels_per_meter,
            pivot: (config.pivot_x, config.pivot_y),
            width: config.width,
            height: config.height,
        }
    }

    /// Pixels per meter.
    #[must_use]
    pub const fn pixels_per_meter(&self) -> f64 {
        self.pixels_per_meter
    }

    /// Pivot position (px).
    #[must_use]
    pub const fn pivot(&self) -> (f64, f64) {
        self.pivot
    }

    /// Surface size (px).
    #[must_use]
    pub const fn surface(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Convert an offset from the pivot `(right, down)` in meters to pixels.
    #[must_use]
    pub fn to_screen(&self, offset: (f64, f64)) -> (f64, f64) {
        (
            self.pivot.0 + offset.0 * self.pixels_per_meter,
            self.pivot.1 + offset.1 * self.pixels_per_meter,
        )
    }
}

/// Fixed-capacity FIFO of recent bob offsets (m).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailBuffer {
    points: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl TrailBuffer {
    /// Create an empty trail holding at most `capacity` points.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest once full.
    pub fn push(&mut self, point: (f64, f64)) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Points from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.points.iter()
    }

    /// Copy of the points from oldest to newest.
    #[must_use]
    pub fn to_vec(&self) -> Vec<(f64, f64)> {
        self.points.iter().copied().collect()
    }

    /// Drop every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trail is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of stored points.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Length of the red vertical reference line below the pivot (px).
pub const REFERENCE_LINE_PX: f64 = 40.0;
const PIVOT_RADIUS_PX: f64 = 5.0;

/// Readout lines for the pendulum display.
#[must_use]
pub fn pendulum_readout(quantities: &PendulumQuantities) -> [String; 3] {
    [
        format!("Period (T): {:.2} seconds", quantities.period),
        format!("Angular Velocity (ω): {:.2} rad/s", quantities.angular_velocity),
        format!("Energy: {:.2} J", quantities.total_energy),
    ]
}

/// Readout lines for the oscillator display.
#[must_use]
pub fn oscillator_readout(quantities: &OscillatorQuantities) -> [String; 3] {
    [
        format!("ω = {:.2} rad/s", quantities.omega),
        format!("T = {:.2} s", quantities.period),
        format!("f = {:.2} Hz", quantities.frequency),
    ]
}

/// Draw commands for one pendulum frame, in screen pixels.
#[must_use]
pub fn pendulum_scene(
    session: &PendulumSession,
    mapping: &ScreenMapping,
    bob_radius: f64,
) -> Vec<RenderCommand> {
    let (px, py) = mapping.pivot();
    let length = session.params().length();
    let (bx, by) = mapping.to_screen(session.state().bob_offset(length));

    let mut commands = vec![
        RenderCommand::Clear {
            color: Color::WHITE,
        },
        RenderCommand::DrawCircle {
            x: px,
            y: py,
            radius: PIVOT_RADIUS_PX,
            color: Color::BLACK,
            filled: true,
        },
    ];

    if session.trail().len() > 1 {
        commands.push(RenderCommand::DrawPolyline {
            points: session
                .trail()
                .iter()
                .map(|&offset| mapping.to_screen(offset))
                .collect(),
            color: Color::GRAY,
        });
    }

    commands.push(RenderCommand::DrawLine {
        x1: px,
        y1: py,
        x2: bx,
        y2: by,
        color: Color::BLACK,
    });
    commands.push(RenderCommand::DrawLine {
        x1: px,
        y1: py,
        x2: px,
        y2: py + REFERENCE_LINE_PX,
        color: Color::RED,
    });
    commands.push(RenderCommand::DrawCircle {
        x: bx,
        y: by,
        radius: bob_radius,
        color: Color::BLUE,
        filled: true,
    });
    commands.push(RenderCommand::DrawCircle {
        x: bx,
        y: by,
        radius: bob_radius,
        color: Color::DARK_BLUE,
        filled: false,
    });

    let (_, height) = mapping.surface();
    for (i, text) in pendulum_readout(session.quantities()).into_iter().enumerate() {
        commands.push(RenderCommand::DrawText {
            x: 30.0,
            y: height - 280.0 + 20.0 * i as f64,
            text,
            color: Color::BLACK,
        });
    }

    commands
}

/// Wall position of the spring scene (m).
pub const WALL_X: f64 = -2.0;
/// Horizontal extent of the spring scene (m).
pub const SPRING_X_BOUNDS: [f64; 2] = [-3.0, 3.0];
/// Vertical extent of the spring scene (m).
pub const SPRING_Y_BOUNDS: [f64; 2] = [-2.0, 2.0];
/// Radius of the drawn mass (m).
pub const MASS_RADIUS: f64 = 0.2;
const POINTS_PER_COIL: usize = 20;

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| start + (end - start) * i as f64 / last)
                .collect()
        }
    }
}

/// Spring polyline from the wall to the mass at `x`.
///
/// `coils × 20` points. The first and last tenth are straight; the middle
/// is a sine wave of amplitude `width` with 20 points per coil.
#[must_use]
pub fn spring_points(x: f64, coils: usize, width: f64) -> Vec<(f64, f64)> {
    let n = coils * POINTS_PER_COIL;
    let mut xs = linspace(WALL_X, x, n);
    let mut ys = vec![0.0; n];

    let coil_start = n / 10;
    let coil_end = n * 9 / 10;
    if coil_end > coil_start {
        let coil_x = linspace(xs[coil_start], xs[coil_end], coil_end - coil_start);
        for (j, i) in (coil_start..coil_end).enumerate() {
            xs[i] = coil_x[j];
            ys[i] = width * (2.0 * std::f64::consts::PI * j as f64 / POINTS_PER_COIL as f64).sin();
        }
    }

    xs.into_iter().zip(ys).collect()
}

/// Draw commands for the spring-mass frame, in world units.
#[must_use]
pub fn oscillator_scene(session: &OscillatorSession) -> Vec<RenderCommand> {
    let x = session.current_position();
    vec![
        RenderCommand::Clear {
            color: Color::WHITE,
        },
        RenderCommand::DrawLine {
            x1: WALL_X,
            y1: SPRING_Y_BOUNDS[0],
            x2: WALL_X,
            y2: SPRING_Y_BOUNDS[1],
            color: Color::BLACK,
        },
        RenderCommand::DrawPolyline {
            points: spring_points(x, 10, 0.5),
            color: Color::BLACK,
        },
        RenderCommand::DrawCircle {
            x,
            y: 0.0,
            radius: MASS_RADIUS,
            color: Color::RED,
            filled: true,
        },
    ]
}

/// Draw commands for the position-time plot: the whole curve plus a
/// vertical marker at the playback time.
#[must_use]
pub fn oscillator_plot(session: &OscillatorSession) -> Vec<RenderCommand> {
    let (lo, hi) = session.plot_bounds();
    let t = session.playback_time();
    let curve = session
        .grid()
        .times()
        .iter()
        .copied()
        .zip(session.positions().iter().copied())
        .collect();

    vec![
        RenderCommand::DrawPolyline {
            points: curve,
            color: Color::BLUE,
        },
        RenderCommand::DrawLine {
            x1: t,
            y1: lo,
            x2: t,
            y2: hi,
            color: Color::RED,
        },
    ]
}
