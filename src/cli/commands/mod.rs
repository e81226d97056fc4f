//! CLI command implementations.

pub mod dashboard;
pub mod export;
pub mod report;
pub mod validate;

use anyhow::{Context, Result};
use chrono::Utc;
use radar_config::AppConfig;
use radar_core::types::DateRange;
use radar_signals::SignalEngine;

use crate::cli::SourceArgs;

/// Resolve the requested date range against configured defaults.
pub(crate) fn resolve_range(args: &SourceArgs, config: &AppConfig) -> Result<DateRange> {
    let start = args.start.unwrap_or(config.data.default_start);
    let end = args.end.unwrap_or_else(|| Utc::now().date_naive());
    DateRange::new(start, end).context("Invalid date range")
}

/// Build the signal engine from validated configuration.
pub(crate) fn build_engine(config: &AppConfig) -> Result<SignalEngine> {
    config.validate().context("Invalid configuration")?;
    SignalEngine::new(config.signal).context("Invalid signal parameters")
}
