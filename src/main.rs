use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use content_schedule::config::Config;
use content_schedule::source::{JsonSnapshot, TableSource};
use content_schedule::{default_output_path, ContentSchedule, ReportOptions};

/// Turn a content schedule document's table snapshot into a render-ready report.
#[derive(Parser, Debug)]
#[command(name = "content-schedule", version)]
struct Cli {
    /// Table snapshot (JSON) exported from the schedule document
    input: PathBuf,

    /// Report destination; defaults to <input>_report.json
    output: Option<PathBuf>,

    /// Calendar month to render, e.g. "December 2025" or "12/2025"
    #[arg(long)]
    month: Option<String>,

    /// Extra configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write single-line JSON
    #[arg(long)]
    compact: bool,

    /// Log per-table decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging
    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("content_schedule={}", level).parse()?),
        )
        .init();

    info!("Reading: {}", cli.input.display());

    let source = JsonSnapshot::new(&cli.input);
    let tables = source
        .load_tables()
        .with_context(|| format!("Failed to read tables from {}", source.describe()))?;

    let options = ReportOptions {
        month: cli.month.or(config.month),
        reference_year: config.reference_year,
    };
    let schedule = ContentSchedule::from_tables(&tables, &options);

    let payload = schedule.payload();
    let json = if cli.compact || !config.pretty {
        serde_json::to_string(&payload)?
    } else {
        serde_json::to_string_pretty(&payload)?
    };

    let output = cli.output.unwrap_or_else(|| default_output_path(&cli.input));
    fs::write(&output, json)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;

    info!("Report generated: {}", output.display());
    Ok(())
}
