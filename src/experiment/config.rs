//! Experiment parameters.

use std::time::Duration;

/// Immutable configuration for one session, passed through constructors.
///
/// All geometry is expressed in logical canvas coordinates (pixels of the
/// original 800x600 surface); the UI maps these to terminal cells.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Logical canvas size (width, height).
    pub canvas_size: (i32, i32),
    /// Number of blocks placed per sequence.
    pub n_boxes: usize,
    /// Side length of each block.
    pub box_size: i32,
    /// Free margin kept clear at the canvas borders.
    pub margin: i32,
    /// Minimum distance between the centers of two blocks.
    pub min_dist: f64,
    /// Highlight duration for each block during sequence presentation.
    pub highlight_time: Duration,
    /// Delay between leaving the instructions and the first highlight.
    pub start_delay: Duration,
    /// Largest accepted participant identifier.
    pub max_participants: u32,
    /// Number of trials per participant.
    pub max_trials: u32,
    /// Placement samples before a layout is declared infeasible.
    pub max_layout_attempts: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        let box_size = 50;
        Self {
            canvas_size: (800, 600),
            n_boxes: 9,
            box_size,
            margin: 3 * box_size / 2,
            min_dist: 2.0 * f64::from(box_size),
            highlight_time: Duration::from_secs(1),
            start_delay: Duration::from_secs(1),
            max_participants: 20,
            max_trials: 3,
            max_layout_attempts: 10_000,
        }
    }
}
