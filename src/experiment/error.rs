use thiserror::Error;

/// Errors surfaced by the experiment core.
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// The placement parameters cannot fit the requested number of blocks.
    #[error(
        "could not place {placed} of {requested} blocks within {attempts} attempts; \
         box count, margin, minimum distance and canvas size are mutually infeasible"
    )]
    LayoutInfeasible {
        requested: usize,
        placed: usize,
        attempts: usize,
    },

    /// Participant identifier outside the configured range.
    #[error("participant id {id} outside 1..={max}")]
    InvalidParticipantId { id: u32, max: u32 },

    /// Attempt to advance past the configured trial limit.
    #[error("trial limit of {max} reached")]
    TrialLimitReached { max: u32 },

    /// The result row could not be appended.
    #[error("could not write result file: {0}")]
    Report(#[from] std::io::Error),
}
