use serde::{Deserialize, Serialize};

/// One table as exported by the document reader: rows of trimmed cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row; merged cells can leave rows ragged.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.rows.iter().all(Vec::is_empty)
    }

    /// Body rows, i.e. everything after the header.
    pub fn body(&self) -> &[Vec<String>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableCategory {
    Config,
    Schedule,
    Stories,
    Interactions,
    DetailBlock,
    Unknown,
}

impl TableCategory {
    pub fn key(&self) -> &'static str {
        match self {
            TableCategory::Config => "config",
            TableCategory::Schedule => "schedule",
            TableCategory::Stories => "stories",
            TableCategory::Interactions => "interactions",
            TableCategory::DetailBlock => "detail_block",
            TableCategory::Unknown => "unknown",
        }
    }
}

/// Tables sorted into their roles. Singletons keep the first table that
/// matched; detail blocks keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedTables {
    pub config: Option<RawTable>,
    pub schedule: Option<RawTable>,
    pub stories: Option<RawTable>,
    pub interactions: Option<RawTable>,
    pub detail_blocks: Vec<RawTable>,
}
