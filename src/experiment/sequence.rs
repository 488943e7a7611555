//! Block set and presentation state for one trial attempt.

use crate::experiment::config::ExperimentConfig;
use crate::experiment::error::ExperimentError;
use crate::experiment::layout::generate_positions;
use std::time::Instant;

/// Display status of a single block. Mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    Normal,
    Highlighted,
    ClickedCorrect,
    ClickedIncorrect,
}

/// One tappable block. Position and size are fixed after generation; only
/// the status changes during a trial.
#[derive(Debug, Clone)]
pub struct Block {
    /// Center coordinates on the logical canvas.
    pub pos: (i32, i32),
    /// Side length of the square block.
    pub size: i32,
    pub status: BlockStatus,
}

impl Block {
    /// Returns true if the canvas point lies inside this block's rectangle.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let half = self.size / 2;
        (x - self.pos.0).abs() <= half && (y - self.pos.1).abs() <= half
    }
}

/// Presentation sub-state of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Generated, nothing highlighted yet.
    Idle,
    /// Highlight animation running.
    Showing,
    /// Presentation finished, waiting for the participant's taps.
    AwaitingInput,
    /// Scoring complete.
    Scored,
}

/// Result of one presentation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationStep {
    /// Start delay not yet elapsed.
    Waiting,
    /// Animation in progress.
    Showing,
    /// All blocks presented; input may begin.
    Done,
}

/// Result of routing one click into the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No block hit, or the hit block already shows click feedback.
    Miss,
    /// Correct block, more taps expected.
    Continue,
    /// Scoring complete.
    Complete { correct: bool },
}

/// One trial attempt: a fresh set of placed blocks, of which the first
/// `length` (in generation order) form the to-be-reproduced sequence.
///
/// Generation order is also the highlight order and the required tap order.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub blocks: Vec<Block>,
    /// Number of blocks that are lit and must be reproduced.
    pub length: usize,
    /// Index of the next block to highlight; `cursor - 1` is lit.
    cursor: usize,
    last_highlight: Option<Instant>,
    /// Unset until scoring completes.
    pub correct: Option<bool>,
    phase: Phase,
}

impl Sequence {
    /// Generates a fresh sequence of the given length.
    ///
    /// The full configured block count is placed; `length` determines how
    /// many of them are presented.
    pub fn generate(cfg: &ExperimentConfig, length: usize) -> Result<Self, ExperimentError> {
        debug_assert!(length <= cfg.n_boxes, "sequence longer than the block set");
        let blocks = generate_positions(cfg, cfg.n_boxes)?
            .into_iter()
            .map(|pos| Block {
                pos,
                size: cfg.box_size,
                status: BlockStatus::Normal,
            })
            .collect();

        Ok(Self {
            blocks,
            length,
            cursor: 0,
            last_highlight: None,
            correct: None,
            phase: Phase::Idle,
        })
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advances the highlight animation. Pure time-driven step: no input,
    /// no rendering. Calling it again before the next threshold is a no-op.
    ///
    /// Each dwell interval is measured from the last highlight instant, so
    /// there is no drift compensation across a slow frame.
    pub fn advance_presentation(
        &mut self,
        now: Instant,
        trial_start: Instant,
        cfg: &ExperimentConfig,
    ) -> PresentationStep {
        match self.phase {
            Phase::AwaitingInput | Phase::Scored => return PresentationStep::Done,
            Phase::Idle | Phase::Showing => {}
        }

        // One-time delay between the instructions and the first highlight.
        if now.duration_since(trial_start) <= cfg.start_delay {
            return PresentationStep::Waiting;
        }

        if self.phase == Phase::Idle {
            self.blocks[0].status = BlockStatus::Highlighted;
            self.cursor = 1;
            self.last_highlight = Some(now);
            self.phase = Phase::Showing;
            return PresentationStep::Showing;
        }

        let last = self
            .last_highlight
            .unwrap_or(trial_start);
        if now.duration_since(last) <= cfg.highlight_time {
            return PresentationStep::Showing;
        }

        self.blocks[self.cursor - 1].status = BlockStatus::Normal;

        if self.cursor < self.length {
            self.blocks[self.cursor].status = BlockStatus::Highlighted;
            self.cursor += 1;
            self.last_highlight = Some(now);
            PresentationStep::Showing
        } else {
            self.phase = Phase::AwaitingInput;
            PresentationStep::Done
        }
    }

    /// Routes one pointer release into the sequence.
    ///
    /// `expected_index` is the position in the presented order that the
    /// participant should reproduce next. Only the most recent tap keeps
    /// its click feedback; earlier feedback is cleared on each new tap.
    pub fn register_click(&mut self, pos: (i32, i32), expected_index: usize) -> ClickOutcome {
        if self.phase != Phase::AwaitingInput {
            return ClickOutcome::Miss;
        }

        let Some(hit) = self
            .blocks
            .iter()
            .position(|b| b.contains(pos.0, pos.1))
        else {
            return ClickOutcome::Miss;
        };

        if matches!(
            self.blocks[hit].status,
            BlockStatus::ClickedCorrect | BlockStatus::ClickedIncorrect
        ) {
            return ClickOutcome::Miss;
        }

        for block in &mut self.blocks {
            if block.status != BlockStatus::Normal {
                block.status = BlockStatus::Normal;
            }
        }

        if hit == expected_index {
            self.blocks[hit].status = BlockStatus::ClickedCorrect;
            if expected_index == self.length - 1 {
                self.correct = Some(true);
                self.phase = Phase::Scored;
                ClickOutcome::Complete { correct: true }
            } else {
                ClickOutcome::Continue
            }
        } else {
            self.blocks[hit].status = BlockStatus::ClickedIncorrect;
            self.correct = Some(false);
            self.phase = Phase::Scored;
            ClickOutcome::Complete { correct: false }
        }
    }
}
