//! oscisim pendulum - Terminal User Interface
//!
//! Interactive simple pendulum using ratatui.
//! App logic lives in `oscisim::tui::pendulum_app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use oscisim::logging;
    use oscisim::tui::{load_config, pendulum_app::PendulumApp};

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let config = load_config(path.as_deref()).map_err(std::io::Error::other)?;
    if let Err(e) = logging::init_file_only(&config.logging) {
        eprintln!("Warning: {e}");
    }
    let app = PendulumApp::from_config(&config).map_err(std::io::Error::other)?;
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
    use oscisim::tui::pendulum_app::PendulumApp;
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
    pub fn run(mut app: PendulumApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut clock = FrameClock::new(app.frame_rate_hz);

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

            let dt = clock.tick();
            app.update(dt);
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn ui(f: &mut Frame, app: &PendulumApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(10)])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[1]);

        render_title(f, chunks[0], app);
        render_pendulum_canvas(f, body[0], app);
        render_side_panel(f, body[1], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &PendulumApp) {
        let run_state = app.session.run_state();
        let state_color = match run_state {
            oscisim::engine::RunState::Running => Color::Green,
            oscisim::engine::RunState::Paused => Color::Yellow,
            oscisim::engine::RunState::Stopped => Color::Red,
        };
        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                " SIMPLE HARMONIC PENDULUM ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("[{}]", run_state.label()),
                Style::default().fg(state_color),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("t = {:.2} s", app.session.sim_time()),
                Style::default().fg(Color::White),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("Frame: {}", app.frame_count),
                Style::default().fg(Color::DarkGray),
            ),
        ])])
        .block(Block::default().borders(Borders::ALL).title(
            "[S] Start  [P] Pause  [R] Reset  [Tab/↑↓] Select  [←→] Adjust  [Q] Quit",
        ));
        f.render_widget(title, area);
    }

    fn render_pendulum_canvas(f: &mut Frame, area: Rect, app: &PendulumApp) {
        let commands = app.scene();
        let (width, height) = app.mapping.surface();
        let bg = background(&commands).unwrap_or(Color::Reset);

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title("Pendulum"))
            .background_color(bg)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| paint(ctx, &commands, Axis::Down(height)));

        f.render_widget(canvas, area);
    }

    fn render_side_panel(f: &mut Frame, area: Rect, app: &PendulumApp) {
        let sliders = app.controls.sliders();
        let mut constraints: Vec<Constraint> =
            sliders.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, slider) in sliders.iter().enumerate() {
            f.render_widget(slider_gauge(slider, i == app.controls.focus()), rows[i]);
        }
    }

}
