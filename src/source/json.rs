use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{fold_links, TableSource};
use crate::error::{Result, ScheduleError};
use crate::models::RawTable;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellExport {
    Text(String),
    Linked {
        #[serde(default)]
        text: String,
        #[serde(default)]
        links: Vec<String>,
    },
    Empty,
}

impl CellExport {
    fn into_text(self) -> String {
        match self {
            CellExport::Text(text) => text.trim().to_string(),
            CellExport::Linked { text, links } => fold_links(&text, &links),
            CellExport::Empty => String::new(),
        }
    }
}

type TableExport = Vec<Vec<CellExport>>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotExport {
    Wrapped { tables: Vec<TableExport> },
    Bare(Vec<TableExport>),
}

/// Parse the reader's JSON export: a list of tables (optionally wrapped as
/// `{"tables": [...]}`), each a list of rows of cells. A cell is a string,
/// `null`, or `{"text": "...", "links": ["..."]}`.
pub fn parse_snapshot(json: &str) -> Result<Vec<RawTable>> {
    let export: SnapshotExport = serde_json::from_str(json)?;
    let tables = match export {
        SnapshotExport::Wrapped { tables } => tables,
        SnapshotExport::Bare(tables) => tables,
    };

    Ok(tables
        .into_iter()
        .map(|rows| {
            RawTable::new(
                rows.into_iter()
                    .map(|row| row.into_iter().map(CellExport::into_text).collect())
                    .collect(),
            )
        })
        .collect())
}

/// Table snapshot written to disk by the document reader.
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for JsonSnapshot {
    fn load_tables(&self) -> Result<Vec<RawTable>> {
        if !self.path.is_file() {
            return Err(ScheduleError::MissingInput(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let tables = parse_snapshot(&content)?;
        info!("Found {} tables in {}", tables.len(), self.path.display());
        Ok(tables)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
