#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, layout::Size, Terminal};

use corsi_rust::experiment::{report, App, ExperimentConfig, InputEvent, Screen, Signal};
use corsi_rust::ui::canvas::cell_to_canvas;
use corsi_rust::ui::render::{board_grid_size, draw_ui, STATUS_BAR_HEIGHT};

/// Result rows are appended here, one per participant session.
const RESULT_FILE: &str = "corsi.csv";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // App state
    let mut app = App::new(ExperimentConfig::default());
    let tick_rate = Duration::from_millis(50);

    let res = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;

    // Persist the session once, on quit from any state or the natural end.
    if let Some(participant) = &app.participant {
        report::append_result(Path::new(RESULT_FILE), participant)?;
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // 1. Advance time-driven state
        app.tick(Instant::now());

        // 2. Render
        terminal.draw(|f| draw_ui(f, app))?;

        // 3. Input
        if event::poll(tick_rate)? {
            let size = terminal.size()?;
            if let Some(input) =
                translate_event(event::read()?, app.screen, size, app.cfg.canvas_size)
            {
                if app.handle_event(input, Instant::now())? == Signal::Exit {
                    return Ok(());
                }
            }
        }
    }
}

/// Translates a crossterm event into the app's device-independent input.
///
/// Mouse releases on the board are mapped from terminal cells back to
/// logical canvas coordinates; clicks on the status bar are ignored.
fn translate_event(
    event: Event,
    screen: Screen,
    size: Size,
    canvas: (i32, i32),
) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Esc => Some(InputEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Quit)
            }
            KeyCode::Char('q') if screen != Screen::Identification => Some(InputEvent::Quit),
            KeyCode::Enter => Some(InputEvent::Confirm),
            KeyCode::Char(' ') => Some(InputEvent::Proceed),
            KeyCode::Backspace => Some(InputEvent::Backspace),
            KeyCode::Char(c) if screen == Screen::Identification => Some(InputEvent::Char(c)),
            _ => None,
        },
        Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) => {
            let area = Rect::new(0, 0, size.width, size.height);
            let (rows, cols) = board_grid_size(area);
            let row = (mouse.row as usize).checked_sub(STATUS_BAR_HEIGHT as usize)?;
            let col = mouse.column as usize;
            if rows == 0 || cols == 0 || row >= rows || col >= cols {
                return None;
            }
            let (x, y) = cell_to_canvas(col, row, canvas, rows, cols);
            Some(InputEvent::Click { x, y })
        }
        _ => None,
    }
}
