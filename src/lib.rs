//! Extraction engine for social media content schedules.
//!
//! Tables exported from a hand-edited schedule document are classified by
//! shape, mapped to canonical fields, merged by title, and normalized into
//! dated, media-resolved records for a renderer to consume.

pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod parsers;
pub mod report;
pub mod source;

pub use error::{Result, ScheduleError};
pub use report::{default_output_path, ContentSchedule, ReportOptions, ReportPayload};
