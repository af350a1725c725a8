//! Replays render commands on a ratatui canvas and builds slider widgets.

use ratatui::style::{Color as TermColor, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Circle, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Gauge};

use crate::controls::Slider;
use crate::render::{Color, RenderCommand};

/// Convert a render color to a terminal color.
#[must_use]
pub const fn term_color(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

/// Vertical orientation of the command coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Axis {
    /// y grows upward, as on the canvas.
    Up,
    /// y grows downward from 0 to the given surface height.
    Down(f64),
}

impl Axis {
    fn y(self, y: f64) -> f64 {
        match self {
            Self::Up => y,
            Self::Down(height) => height - y,
        }
    }
}

/// Background color requested by a `Clear` command, if any.
#[must_use]
pub fn background(commands: &[RenderCommand]) -> Option<TermColor> {
    commands.iter().find_map(|c| match c {
        RenderCommand::Clear { color } => Some(term_color(*color)),
        _ => None,
    })
}

/// Draw every command on the canvas context.
///
/// `Clear` is left to the widget background. Filled circles are drawn as
/// concentric rings.
pub fn paint(ctx: &mut Context<'_>, commands: &[RenderCommand], axis: Axis) {
    for command in commands {
        match command {
            RenderCommand::Clear { .. } => {}
            RenderCommand::DrawLine {
                x1,
                y1,
                x2,
                y2,
                color,
            } => ctx.draw(&CanvasLine {
                x1: *x1,
                y1: axis.y(*y1),
                x2: *x2,
                y2: axis.y(*y2),
                color: term_color(*color),
            }),
            RenderCommand::DrawPolyline { points, color } => {
                for pair in points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: axis.y(pair[0].1),
                        x2: pair[1].0,
                        y2: axis.y(pair[1].1),
                        color: term_color(*color),
                    });
                }
            }
            RenderCommand::DrawCircle {
                x,
                y,
                radius,
                color,
                filled,
            } => {
                let rings: &[f64] = if *filled { &[1.0, 0.66, 0.33] } else { &[1.0] };
                for scale in rings {
                    ctx.draw(&Circle {
                        x: *x,
                        y: axis.y(*y),
                        radius: radius * scale,
                        color: term_color(*color),
                    });
                }
            }
            RenderCommand::DrawText { x, y, text, color } => {
                ctx.print(
                    *x,
                    axis.y(*y),
                    Span::styled(text.clone(), Style::default().fg(term_color(*color))),
                );
            }
        }
    }
}

/// Label shown on a slider gauge, e.g. `Length (m): 1.00`.
#[must_use]
pub fn slider_label(slider: &Slider) -> String {
    let decimals = if slider.step() < 0.01 { 3 } else { 2 };
    format!("{}: {:.*}", slider.label(), decimals, slider.value())
}

/// Gauge widget for one slider; the focused slider is highlighted.
#[must_use]
pub fn slider_gauge(slider: &Slider, focused: bool) -> Gauge<'static> {
    let (border, bar) = if focused {
        (Style::default().fg(TermColor::Yellow), TermColor::Cyan)
    } else {
        (Style::default().fg(TermColor::Gray), TermColor::Blue)
    };
    let title = if focused {
        Line::from(Span::styled(
            "▶",
            Style::default().add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::default()
    };
    Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        )
        .gauge_style(Style::default().fg(bar))
        .ratio(slider.fraction())
        .label(slider_label(slider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderSpec;
    use ratatui::backend::TestBackend;
    use ratatui::widgets::canvas::Canvas;
    use ratatui::Terminal;

    #[test]
    fn test_term_color() {
        assert_eq!(term_color(Color::RED), TermColor::Rgb(255, 0, 0));
    }

    #[test]
    fn test_axis_flip() {
        assert!((Axis::Down(600.0).y(100.0) - 500.0).abs() < f64::EPSILON);
        assert!((Axis::Up.y(1.5) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_background_from_clear() {
        let commands = vec![RenderCommand::Clear {
            color: Color::WHITE,
        }];
        assert_eq!(background(&commands), Some(TermColor::Rgb(255, 255, 255)));
        assert_eq!(background(&[]), None);
    }

    #[test]
    fn test_slider_label_precision() {
        let damping = Slider::from_spec("Dampening", &SliderSpec::new(0.0, 0.1, 0.001, 0.005));
        assert_eq!(slider_label(&damping), "Dampening: 0.005");
        let length = Slider::from_spec("Length (m)", &SliderSpec::new(0.1, 2.0, 0.1, 1.0));
        assert_eq!(slider_label(&length), "Length (m): 1.00");
    }

    #[test]
    fn test_paint_every_command_kind() {
        let commands = vec![
            RenderCommand::Clear {
                color: Color::WHITE,
            },
            RenderCommand::DrawLine {
                x1: 0.0,
                y1: 0.0,
                x2: 1.0,
                y2: 1.0,
                color: Color::BLACK,
            },
            RenderCommand::DrawPolyline {
                points: vec![(0.0, 0.0), (0.5, 0.5), (1.0, 0.0)],
                color: Color::GRAY,
            },
            RenderCommand::DrawCircle {
                x: 0.5,
                y: 0.5,
                radius: 0.2,
                color: Color::BLUE,
                filled: true,
            },
            RenderCommand::DrawText {
                x: 0.1,
                y: 0.9,
                text: "label".to_string(),
                color: Color::BLACK,
            },
        ];

        let mut terminal = Terminal::new(TestBackend::new(40, 20)).expect("terminal");
        terminal
            .draw(|f| {
                let canvas = Canvas::default()
                    .x_bounds([0.0, 1.0])
                    .y_bounds([0.0, 1.0])
                    .paint(|ctx| paint(ctx, &commands, Axis::Up));
                f.render_widget(canvas, f.area());
            })
            .expect("canvas should render");
    }
}
