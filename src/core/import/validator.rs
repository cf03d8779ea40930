//! Row validation
//!
//! Every rule runs against every row, so a row reports all of its problems
//! at once. Reasons keep rule order and never repeat.

use super::decoder::Column;
use super::types::{RawRow, Record, ValidationOutcome};

pub const IDENTIFIER_REQUIRED: &str = "identifier required";
pub const ROLE_REQUIRED: &str = "role required";
pub const IDENTIFIER_NOT_EMAIL: &str = "identifier must be an email address";

type Rule = fn(&Record) -> Option<&'static str>;

const RULES: [Rule; 3] = [identifier_present, role_present, identifier_is_email_shaped];

fn identifier_present(record: &Record) -> Option<&'static str> {
    record.identifier.is_empty().then_some(IDENTIFIER_REQUIRED)
}

fn role_present(record: &Record) -> Option<&'static str> {
    record.role.is_empty().then_some(ROLE_REQUIRED)
}

// Structural check only; an empty identifier is already reported above.
fn identifier_is_email_shaped(record: &Record) -> Option<&'static str> {
    (!record.identifier.is_empty() && !record.identifier.contains('@'))
        .then_some(IDENTIFIER_NOT_EMAIL)
}

impl From<&RawRow> for Record {
    fn from(row: &RawRow) -> Self {
        let optional = |column: Column| {
            let value = row.field(column);
            (!value.is_empty()).then(|| value.to_string())
        };

        Record {
            line: row.line,
            identifier: row.field(Column::Identifier).to_string(),
            role: row.field(Column::Role).to_string(),
            group_ref: optional(Column::GroupRef),
            metadata: optional(Column::Metadata),
        }
    }
}

/// Apply every rule to one record
pub fn check(record: &Record) -> ValidationOutcome {
    let mut reasons: Vec<String> = Vec::new();
    for rule in RULES {
        if let Some(reason) = rule(record) {
            if !reasons.iter().any(|existing| existing == reason) {
                reasons.push(reason.to_string());
            }
        }
    }

    if reasons.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid(reasons)
    }
}

/// Build and validate a record for each row, preserving order
pub fn validate(rows: &[RawRow]) -> Vec<(Record, ValidationOutcome)> {
    rows.iter()
        .map(|row| {
            let record = Record::from(row);
            let outcome = check(&record);
            (record, outcome)
        })
        .collect()
}
