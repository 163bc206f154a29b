use ::config::{Config as Layers, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

const CONFIG_FILE_STEM: &str = "content-schedule";
const ENV_PREFIX: &str = "CONTENT_SCHEDULE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Calendar month to render, in any `parse_month_year` form. Overrides
    /// the month typed into the document.
    pub month: Option<String>,
    /// Year for dates written without one. Defaults to the calendar month's year.
    pub reference_year: Option<i32>,
    pub pretty: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            month: None,
            reference_year: None,
            pretty: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then `content-schedule.{toml,json,yaml}` in the working
    /// directory, then `explicit` (which must exist), then
    /// `CONTENT_SCHEDULE_*` environment variables.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let defaults = Config::default();
        let mut builder = Layers::builder()
            .set_default("pretty", defaults.pretty)?
            .set_default("log_level", defaults.log_level)?
            .add_source(File::with_name(CONFIG_FILE_STEM).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.month, None);
        assert_eq!(config.reference_year, None);
        assert!(config.pretty);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"month": "March 2026", "reference_year": 2026, "pretty": false}}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.month.as_deref(), Some("March 2026"));
        assert_eq!(config.reference_year, Some(2026));
        assert!(!config.pretty);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
