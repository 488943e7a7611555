//! Append-only result sink.

use crate::experiment::error::ExperimentError;
use crate::experiment::participant::Participant;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Appends one result row for a finished session:
/// `id,"[span, span, ...]",mean,std`.
///
/// The file is created if absent. Callers invoke this at most once per
/// participant session, on quit or at the natural end.
pub fn append_result(path: &Path, participant: &Participant) -> Result<(), ExperimentError> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    writeln!(
        file,
        "{},\"{}\",{},{}",
        participant.id,
        format_spans(&participant.spans),
        participant.mean_span,
        participant.std_span,
    )?;
    Ok(())
}

/// Formats the span history as a bracketed list: `[2, 3, 3]`.
#[must_use]
pub fn format_spans(spans: &[u32]) -> String {
    let inner = spans
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}
