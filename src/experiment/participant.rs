//! Participant state, staircase progression, and session statistics.

use crate::experiment::error::ExperimentError;

/// Outcome of scoring one sequence attempt against the staircase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Correct: span confirmed, next sequence is one longer.
    Advance,
    /// Correct at the maximum length: trial over, participant won.
    Won,
    /// Incorrect, one error at this span: same length gets retried.
    Retry,
    /// Second incorrect attempt at this span: trial over.
    SpanExhausted,
}

impl AttemptOutcome {
    /// True for the outcomes that end the current trial.
    #[must_use]
    pub fn ends_trial(self) -> bool {
        matches!(self, Self::Won | Self::SpanExhausted)
    }
}

/// One participant's session: trial index, span staircase, and statistics.
///
/// The Corsi span starts at 2 each trial; every sequence tests one block
/// more than the last confirmed span, and two consecutive failures at one
/// length end the trial at the previous confirmed span.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: u32,
    /// 1-based index of the current trial.
    pub current_trial: u32,
    /// Achieved span per completed trial.
    pub spans: Vec<u32>,
    /// Last confirmed span in the current trial.
    pub span: u32,
    /// Correct taps so far in the active sequence attempt; doubles as the
    /// index of the next expected tap.
    pub clicks: usize,
    /// Failures at the current span level.
    pub errors: u32,
    /// Mean of the achieved spans, rounded to 2 decimal places.
    pub mean_span: f64,
    /// Population standard deviation of the achieved spans, rounded to
    /// 2 decimal places.
    pub std_span: f64,
}

impl Participant {
    /// Starting span for every trial.
    pub const INITIAL_SPAN: u32 = 2;
    /// Failures at one span level that end the trial.
    pub const MAX_ERRORS: u32 = 2;

    /// Creates a participant, rejecting identifiers outside
    /// `1..=max_participants`.
    pub fn new(id: u32, max_participants: u32) -> Result<Self, ExperimentError> {
        if !(1..=max_participants).contains(&id) {
            return Err(ExperimentError::InvalidParticipantId {
                id,
                max: max_participants,
            });
        }
        Ok(Self {
            id,
            current_trial: 1,
            spans: Vec::new(),
            span: Self::INITIAL_SPAN,
            clicks: 0,
            errors: 0,
            mean_span: 0.0,
            std_span: 0.0,
        })
    }

    /// Length of the next sequence to test: one more than the last
    /// confirmed span.
    #[must_use]
    pub fn next_span_length(&self) -> usize {
        self.span as usize + 1
    }

    /// Feeds one scored attempt into the staircase.
    ///
    /// `sequence_length` is the length of the attempt just scored and
    /// `n_boxes` the total block count, whose completion wins the trial.
    pub fn record_attempt(
        &mut self,
        correct: bool,
        sequence_length: usize,
        n_boxes: usize,
    ) -> AttemptOutcome {
        if correct {
            self.errors = 0;
            self.span = sequence_length as u32;
            if sequence_length == n_boxes {
                AttemptOutcome::Won
            } else {
                AttemptOutcome::Advance
            }
        } else {
            self.errors += 1;
            if self.errors >= Self::MAX_ERRORS {
                AttemptOutcome::SpanExhausted
            } else {
                AttemptOutcome::Retry
            }
        }
    }

    /// Records the achieved span for the current trial and refreshes the
    /// summary statistics. Appends at most once per trial.
    pub fn finalize_trial(&mut self) {
        if (self.spans.len() as u32) < self.current_trial {
            self.spans.push(self.span);
        }

        let n = self.spans.len() as f64;
        let mean = f64::from(self.spans.iter().sum::<u32>()) / n;
        self.mean_span = round2(mean);
        let variance = self
            .spans
            .iter()
            .map(|&s| (f64::from(s) - self.mean_span).powi(2))
            .sum::<f64>()
            / n;
        self.std_span = round2(variance.sqrt());
    }

    /// Starts the next trial: valid only after the previous one ended and
    /// while trials remain.
    pub fn advance_trial(&mut self, max_trials: u32) -> Result<(), ExperimentError> {
        if self.current_trial >= max_trials {
            return Err(ExperimentError::TrialLimitReached { max: max_trials });
        }
        self.current_trial += 1;
        self.span = Self::INITIAL_SPAN;
        self.errors = 0;
        Ok(())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round2(2.666_666), 2.67);
        assert_eq!(round2(0.471_404), 0.47);
        assert_eq!(round2(2.0), 2.0);
    }
}
