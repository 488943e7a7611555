//! Mapping between the logical canvas and the terminal character grid.

use crate::experiment::sequence::{Block, BlockStatus};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use rayon::prelude::*;

/// Display color for a block status (original palette).
#[must_use]
pub fn block_color(status: BlockStatus) -> Color {
    match status {
        BlockStatus::Normal => Color::Blue,
        BlockStatus::Highlighted => Color::Yellow,
        BlockStatus::ClickedCorrect => Color::Green,
        BlockStatus::ClickedIncorrect => Color::Red,
    }
}

/// Maps a canvas point to its (row, col) cell on a rows x cols grid.
#[must_use]
pub fn canvas_to_cell(
    x: i32,
    y: i32,
    canvas: (i32, i32),
    rows: usize,
    cols: usize,
) -> (usize, usize) {
    let row = (f64::from(y) / f64::from(canvas.1) * rows as f64) as usize;
    let col = (f64::from(x) / f64::from(canvas.0) * cols as f64) as usize;
    (row.min(rows.saturating_sub(1)), col.min(cols.saturating_sub(1)))
}

/// Maps a (col, row) cell back to the canvas point at its center.
#[must_use]
pub fn cell_to_canvas(
    col: usize,
    row: usize,
    canvas: (i32, i32),
    rows: usize,
    cols: usize,
) -> (i32, i32) {
    let x = (col as f64 + 0.5) / cols as f64 * f64::from(canvas.0);
    let y = (row as f64 + 0.5) / rows as f64 * f64::from(canvas.1);
    (x as i32, y as i32)
}

/// Rasterises the block set into one styled line per grid row.
///
/// Each cell shows the block covering its canvas center point, colored by
/// that block's status; empty cells stay blank. Rows are computed in
/// parallel.
#[must_use]
pub fn compute_board_lines(
    blocks: &[Block],
    canvas: (i32, i32),
    rows: usize,
    cols: usize,
) -> Vec<Line<'static>> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    (0..rows)
        .into_par_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..cols)
                .map(|col| {
                    let (x, y) = cell_to_canvas(col, row, canvas, rows, cols);
                    match blocks.iter().find(|b| b.contains(x, y)) {
                        Some(block) => Span::styled(
                            "\u{2588}",
                            Style::default().fg(block_color(block.status)),
                        ),
                        None => Span::raw(" "),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
