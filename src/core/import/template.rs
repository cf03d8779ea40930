//! Downloadable import template

use super::decoder::encode_line;

/// Header written to the template, using the LiteLLM UI column names
pub const TEMPLATE_HEADER: [&str; 4] = ["user_email", "user_role", "teams", "metadata"];

const EXAMPLE_ROW: [&str; 4] = [
    "john.doe@example.com",
    "internal_user",
    "team-alpha",
    r#"{"department": "engineering"}"#,
];

/// Header plus one example row, newline terminated
pub fn template(delimiter: char) -> String {
    let mut out = encode_line(TEMPLATE_HEADER, delimiter);
    out.push('\n');
    out.push_str(&encode_line(EXAMPLE_ROW, delimiter));
    out.push('\n');
    out
}
