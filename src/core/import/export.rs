//! Per-row results table for download

use super::batch::BatchView;
use super::decoder::encode_line;
use super::types::{SubmissionState, ValidationOutcome};

pub const RESULTS_HEADER: [&str; 6] = ["line", "identifier", "role", "validation", "status", "detail"];

/// One line per batch row, in file order, after a header line
pub fn export_results(view: &BatchView, delimiter: char) -> String {
    let mut out = encode_line(RESULTS_HEADER, delimiter);
    out.push('\n');

    for row in view.snapshot() {
        let (validation, detail) = match (&row.outcome, &row.state) {
            (ValidationOutcome::Invalid(reasons), _) => ("invalid", reasons.join("; ")),
            (ValidationOutcome::Valid, SubmissionState::Failed(failure)) => {
                ("valid", failure.message.clone())
            }
            (ValidationOutcome::Valid, _) => ("valid", String::new()),
        };

        let line = row.record.line.to_string();
        out.push_str(&encode_line(
            [
                line.as_str(),
                row.record.identifier.as_str(),
                row.record.role.as_str(),
                validation,
                row.state.name(),
                detail.as_str(),
            ],
            delimiter,
        ));
        out.push('\n');
    }

    out
}
