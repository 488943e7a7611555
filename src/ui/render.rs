use crate::experiment::app::{App, Screen};
use crate::ui::canvas::compute_board_lines;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the status bar at the top of the screen.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows and columns of the board area inside the given frame area.
#[must_use]
pub fn board_grid_size(area: Rect) -> (usize, usize) {
    let rows = area.height.saturating_sub(STATUS_BAR_HEIGHT) as usize;
    (rows, area.width as usize)
}

/// Draws the current screen. Read-only: all state transitions happen in
/// the event and tick paths, never here.
pub fn draw_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_BAR_HEIGHT),
            Constraint::Min(0),
        ])
        .split(f.area());

    let status = Paragraph::new(Span::styled(
        status_line(app),
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    f.render_widget(status, chunks[0]);

    match app.screen {
        Screen::Identification => draw_identification(f, app, chunks[1]),
        Screen::Instructions => draw_instructions(f, chunks[1]),
        Screen::ShowingSequence | Screen::AwaitingInput => draw_board(f, app, chunks[1]),
        Screen::Feedback | Screen::Done => draw_feedback(f, app, chunks[1]),
    }
}

fn status_line(app: &App) -> String {
    match &app.participant {
        Some(p) => format!(
            "Corsi Block Tapping Test: Participant {} | Trial {}/{}",
            p.id, p.current_trial, app.cfg.max_trials
        ),
        None => "Corsi Block Tapping Test".to_string(),
    }
}

fn draw_identification(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Corsi Block Tapping Test",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Please enter your participant ID and press Enter:"),
        Line::from(Span::styled(
            format!("{}_", app.id_input),
            Style::default().fg(Color::Cyan),
        )),
    ];
    if let Some(message) = &app.id_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    f.render_widget(centered_paragraph(lines), area);
}

fn draw_instructions(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Instructions",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("A set of blue boxes will appear on the screen."),
        Line::from("Some of them light up yellow, one after another."),
        Line::from("Remember the order and click the boxes back in that order."),
        Line::from("After each correct round the sequence grows by one box."),
        Line::from("Two mistakes at the same length end the trial."),
        Line::from(""),
        Line::from(Span::styled(
            "Press space bar to start!",
            Style::default().fg(Color::Cyan),
        )),
    ];
    f.render_widget(centered_paragraph(lines), area);
}

fn draw_board(f: &mut Frame, app: &App, area: Rect) {
    let Some(sequence) = &app.sequence else {
        return;
    };
    let (rows, cols) = board_grid_size(f.area());
    let lines = compute_board_lines(&sequence.blocks, app.cfg.canvas_size, rows, cols);
    let board = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().bg(Color::Black));
    f.render_widget(board, area);
}

fn draw_feedback(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.feedback.headline.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(detail) = &app.feedback.detail {
        lines.push(Line::from(""));
        lines.push(Line::from(detail.clone()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        app.feedback.prompt.clone(),
        Style::default().fg(Color::Cyan),
    )));
    f.render_widget(centered_paragraph(lines), area);
}

fn centered_paragraph(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Black))
}
