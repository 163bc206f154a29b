pub mod classify;
pub mod dates;
pub mod fields;
pub mod merge;
pub mod records;

pub use classify::*;
pub use dates::*;
pub use fields::*;
pub use merge::*;
pub use records::*;

use crate::models::CHECK_MARKS;

/// Collapse runs of whitespace into single spaces and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lower-cased, whitespace-collapsed form used for label and header matching.
pub fn normalize_label(text: &str) -> String {
    clean_text(text).to_lowercase()
}

/// Template cells ship with bracketed hints like "[Post title]" that mean
/// "not filled in yet". Titles only need the opening bracket.
pub fn is_placeholder(text: &str) -> bool {
    text.trim_start().starts_with('[')
}

/// A whole value wrapped in square brackets.
pub fn is_bracketed(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 2 && text.starts_with('[') && text.ends_with(']')
}

/// Trimmed value with placeholder lines removed. A hint such as
/// "[Add photo link]" can carry a hyperlink folded in as its own line; the
/// link survives, the hint does not.
pub fn unless_placeholder(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_bracketed(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop every square bracket, not just an enclosing pair.
pub fn strip_brackets(text: &str) -> String {
    text.replace(['[', ']'], "").trim().to_string()
}

/// A day column counts as ticked only for the exact check marks.
pub fn is_checked(text: &str) -> bool {
    let value = text.trim().to_lowercase();
    CHECK_MARKS.contains(&value.as_str())
}

/// Trimmed cell text, empty when the row is too short.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|s| s.trim()).unwrap_or("")
}
