use std::path::PathBuf;
use thiserror::Error;

/// Failures of the collaborators around the pipeline. Parsing itself never
/// fails: unreadable cells and tables are skipped instead.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Input not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed table snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
