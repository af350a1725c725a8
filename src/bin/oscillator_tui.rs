//! oscisim spring-mass oscillator - Terminal User Interface
//!
//! Animated damped oscillator with a live position-time plot.
//! App logic lives in `oscisim::tui::oscillator_app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use oscisim::logging;
    use oscisim::tui::{load_config, oscillator_app::OscillatorApp};

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let config = load_config(path.as_deref()).map_err(std::io::Error::other)?;
    if let Err(e) = logging::init_file_only(&config.logging) {
        eprintln!("Warning: {e}");
    }
    let app = OscillatorApp::from_config(&config).map_err(std::io::Error::other)?;
    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use oscisim::engine::FrameClock;
    use oscisim::render::{oscillator_readout, SPRING_X_BOUNDS, SPRING_Y_BOUNDS};
    use oscisim::tui::oscillator_app::OscillatorApp;
    use oscisim::tui::widgets::{background, paint, slider_gauge, Axis};
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{canvas::Canvas, Block, Borders, Paragraph},
        Frame, Terminal,
    };
    use std::io;

    /// Run the TUI application.
    pub fn run(mut app: OscillatorApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut clock = FrameClock::from_interval(app.interval);

        loop {
            terminal.draw(|f| ui(f, &app))?;

            if event::poll(clock.remaining())? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit {
                break;
            }

            // One animation frame per interval, independent of key traffic.
            if clock.remaining().is_zero() {
                clock.tick();
                app.update();
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn ui(f: &mut Frame, app: &OscillatorApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(40),
                Constraint::Min(8),
            ])
            .split(f.area());

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[2]);

        render_title(f, chunks[0], app);
        render_spring_canvas(f, chunks[1], app);
        render_plot(f, bottom[0], app);
        render_side_panel(f, bottom[1], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &OscillatorApp) {
        let q = app.session.quantities();
        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                " DAMPED SPRING-MASS OSCILLATOR ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("t = {:.2} s", app.session.playback_time()),
                Style::default().fg(Color::White),
            ),
            Span::raw(" | "),
            Span::styled(q.regime.label(), Style::default().fg(Color::Yellow)),
        ])])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("[R] Reset  [Tab/↑↓] Select  [←→] Adjust  [Q] Quit"),
        );
        f.render_widget(title, area);
    }

    fn render_spring_canvas(f: &mut Frame, area: Rect, app: &OscillatorApp) {
        let commands = app.scene();
        let bg = background(&commands).unwrap_or(Color::Reset);

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Spring-Mass System"),
            )
            .background_color(bg)
            .x_bounds(SPRING_X_BOUNDS)
            .y_bounds(SPRING_Y_BOUNDS)
            .paint(|ctx| paint(ctx, &commands, Axis::Up));

        f.render_widget(canvas, area);
    }

    fn render_plot(f: &mut Frame, area: Rect, app: &OscillatorApp) {
        let commands = app.plot();
        let (lo, hi) = app.session.plot_bounds();

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Position vs Time"),
            )
            .x_bounds([0.0, app.session.grid().duration()])
            .y_bounds([lo, hi])
            .paint(|ctx| paint(ctx, &commands, Axis::Up));

        f.render_widget(canvas, area);
    }

    fn render_side_panel(f: &mut Frame, area: Rect, app: &OscillatorApp) {
        let sliders = app.controls.sliders();
        let mut constraints = vec![Constraint::Length(5)];
        constraints.extend(sliders.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let readout = Paragraph::new(
            oscillator_readout(app.session.quantities())
                .into_iter()
                .map(Line::from)
                .collect::<Vec<_>>(),
        )
        .block(Block::default().borders(Borders::ALL).title("Readout"));
        f.render_widget(readout, rows[0]);

        for (i, slider) in sliders.iter().enumerate() {
            f.render_widget(slider_gauge(slider, i == app.controls.focus()), rows[i + 1]);
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use ratatui::backend::TestBackend;

        fn create_test_terminal() -> Terminal<TestBackend> {
            let backend = TestBackend::new(100, 50);
            Terminal::new(backend).expect("Failed to create test terminal")
        }

        fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
            terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(ratatui::buffer::Cell::symbol)
                .collect()
        }

        #[test]
        fn test_ui_renders_without_panic() {
            let mut terminal = create_test_terminal();
            let app = OscillatorApp::new();

            terminal
                .draw(|f| ui(f, &app))
                .expect("UI should render without panic");
        }

        #[test]
        fn test_title_shows_regime() {
            let mut terminal = create_test_terminal();
            let app = OscillatorApp::new();

            terminal
                .draw(|f| {
                    let area = f.area();
                    render_title(f, area, &app);
                })
                .expect("Title should render");
            assert!(buffer_text(&terminal).contains("underdamped"));
        }

        #[test]
        fn test_render_plot_after_updates() {
            let mut terminal = create_test_terminal();
            let mut app = OscillatorApp::new();
            for _ in 0..50 {
                app.update();
            }

            terminal
                .draw(|f| {
                    let area = f.area();
                    render_plot(f, area, &app);
                })
                .expect("Plot should render");
        }

        #[test]
        fn test_side_panel_readout() {
            let mut terminal = create_test_terminal();
            let app = OscillatorApp::new();

            terminal
                .draw(|f| {
                    let area = f.area();
                    render_side_panel(f, area, &app);
                })
                .expect("Side panel should render");
            let text = buffer_text(&terminal);
            assert!(text.contains("ω = 3.16 rad/s"));
            assert!(text.contains("Mass (kg): 1.00"));
        }

        #[test]
        fn test_render_spring_canvas() {
            let mut terminal = create_test_terminal();
            let app = OscillatorApp::new();

            terminal
                .draw(|f| {
                    let area = f.area();
                    render_spring_canvas(f, area, &app);
                })
                .expect("Spring canvas should render");
        }
    }
}
