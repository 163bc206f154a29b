use std::collections::HashMap;

use super::normalize_label;

/// Canonical fields a header cell can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Date,
    Time,
    Type,
    Status,
    Hashtags,
    Notes,
    Caption,
    PhotoLinks,
    Link,
    Interaction,
    Account,
    Platform,
    DailyGoal,
}

/// Substring marker → field, checked against every lower-cased header cell.
/// One header can satisfy several markers ("Date/Time", "Photo Links").
pub const HEADER_RULES: &[(&str, Field)] = &[
    ("title", Field::Title),
    ("date", Field::Date),
    ("time", Field::Time),
    ("type", Field::Type),
    ("status", Field::Status),
    ("hashtag", Field::Hashtags),
    ("note", Field::Notes),
    ("caption", Field::Caption),
    ("photo", Field::PhotoLinks),
    ("link", Field::Link),
    ("url", Field::Link),
    ("media", Field::Link),
    ("interaction", Field::Interaction),
    ("interactive", Field::Interaction),
    ("account", Field::Account),
    ("platform", Field::Platform),
    ("goal", Field::DailyGoal),
];

/// Column index per canonical field for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    columns: HashMap<Field, usize>,
}

impl FieldMap {
    /// Scan headers left to right; a later header wins for the same field.
    pub fn from_header(header: &[String]) -> Self {
        Self::with_rules(header, HEADER_RULES)
    }

    pub fn with_rules(header: &[String], rules: &[(&str, Field)]) -> Self {
        let mut columns = HashMap::new();

        for (index, text) in header.iter().enumerate() {
            let label = normalize_label(text);
            if label.is_empty() {
                continue;
            }
            for (marker, field) in rules {
                if label.contains(marker) {
                    columns.insert(*field, index);
                }
            }
        }

        Self { columns }
    }

    pub fn column(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }

    /// Trimmed value of `field` in `row`, if the field is mapped and in bounds.
    pub fn value<'a>(&self, row: &'a [String], field: Field) -> Option<&'a str> {
        self.column(field)
            .and_then(|index| row.get(index))
            .map(|text| text.trim())
    }

    /// Trimmed value or empty string.
    pub fn text(&self, row: &[String], field: Field) -> String {
        self.value(row, field).unwrap_or("").to_string()
    }

    /// Photo links take precedence; a generic link column is the fallback.
    pub fn media_column(&self) -> Option<usize> {
        self.column(Field::PhotoLinks)
            .or_else(|| self.column(Field::Link))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
