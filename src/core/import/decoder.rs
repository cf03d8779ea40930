//! Delimited text decoding
//!
//! Line 1 is the header. Header names are matched case-insensitively against
//! the known column aliases; the identifier and role columns are mandatory.
//! Double quotes group a field so metadata JSON can contain the delimiter.

use super::types::{DecodeError, RawRow};
use tracing::debug;

/// Logical columns understood by the importer, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Identifier,
    Role,
    GroupRef,
    Metadata,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Identifier,
        Column::Role,
        Column::GroupRef,
        Column::Metadata,
    ];

    pub const REQUIRED: [Column; 2] = [Column::Identifier, Column::Role];

    /// Name reported in errors
    pub fn canonical_name(self) -> &'static str {
        match self {
            Column::Identifier => "identifier",
            Column::Role => "role",
            Column::GroupRef => "group_ref",
            Column::Metadata => "metadata",
        }
    }

    /// Header spellings accepted for this column (lowercase)
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Identifier => &["identifier", "user_email", "email"],
            Column::Role => &["role", "user_role"],
            Column::GroupRef => &["group_ref", "groupref", "teams", "team_id"],
            Column::Metadata => &["metadata"],
        }
    }

    /// Position of this column inside [`RawRow::fields`]
    pub fn position(self) -> usize {
        self as usize
    }

    fn from_header(name: &str) -> Option<Column> {
        let name = name.trim().to_ascii_lowercase();
        Column::ALL
            .into_iter()
            .find(|column| column.aliases().contains(&name.as_str()))
    }
}

impl RawRow {
    /// Field for a logical column; empty when the line was short
    pub fn field(&self, column: Column) -> &str {
        self.fields
            .get(column.position())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Decode `raw_text` into rows, in file order
pub fn decode(raw_text: &str, delimiter: char) -> Result<Vec<RawRow>, DecodeError> {
    let text = raw_text.strip_prefix('\u{feff}').unwrap_or(raw_text);
    let mut lines = text.lines().enumerate();

    let (_, header_line) = lines.next().ok_or(DecodeError::MissingHeader)?;
    let header = split_line(header_line, delimiter, 1)?;

    // Source position of every logical column present in the header
    let mut positions: [Option<usize>; 4] = [None; 4];
    for (source_index, name) in header.iter().enumerate() {
        if let Some(column) = Column::from_header(name) {
            let slot = &mut positions[column.position()];
            if slot.is_none() {
                *slot = Some(source_index);
            }
        }
    }

    let missing: Vec<String> = Column::REQUIRED
        .into_iter()
        .filter(|column| positions[column.position()].is_none())
        .map(|column| column.canonical_name().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DecodeError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for (offset, line) in lines {
        let line_number = offset + 1;
        if line.trim().is_empty() {
            continue;
        }

        let source = split_line(line, delimiter, line_number)?;
        let fields = positions
            .iter()
            .map(|position| {
                position
                    .and_then(|index| source.get(index))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();

        rows.push(RawRow {
            line: line_number,
            fields,
        });
    }

    debug!("Decoded {} data rows", rows.len());
    Ok(rows)
}

/// Split one line into fields
///
/// A field is quoted only when its first non-blank character is `"`; the
/// quoted text is kept verbatim with `""` standing for one quote. Anywhere
/// else a quote is an ordinary character. Unquoted fields are trimmed.
fn split_line(line: &str, delimiter: char, line_number: usize) -> Result<Vec<String>, DecodeError> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars
            .peek()
            .is_some_and(|&c| c != delimiter && c.is_whitespace())
        {
            chars.next();
        }

        let field = if chars.next_if_eq(&'"').is_some() {
            let mut value = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                if c != '"' {
                    value.push(c);
                } else if chars.next_if_eq(&'"').is_some() {
                    value.push('"');
                } else {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(DecodeError::Malformed {
                    line: line_number,
                    reason: "unterminated quoted field".to_string(),
                });
            }

            // Text between the closing quote and the delimiter is kept as-is
            let trailing = take_until(&mut chars, delimiter);
            value.push_str(trailing.trim_end());
            value
        } else {
            take_until(&mut chars, delimiter).trim_end().to_string()
        };
        fields.push(field);

        if chars.next().is_none() {
            break;
        }
    }

    Ok(fields)
}

fn take_until<I>(chars: &mut std::iter::Peekable<I>, delimiter: char) -> String
where
    I: Iterator<Item = char>,
{
    let mut out = String::new();
    while let Some(c) = chars.next_if(|&c| c != delimiter) {
        out.push(c);
    }
    out
}

/// Quote a field when it would not survive [`decode`] unchanged
pub fn encode_field(field: &str, delimiter: char) -> String {
    let needs_quotes = field.contains(delimiter)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
        || field.trim() != field;

    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Join fields into one delimited line (no terminator)
pub fn encode_line<I, S>(fields: I, delimiter: char) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| encode_field(field.as_ref(), delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}
