//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "macro-radar")]
#[command(author, version, about = "Net liquidity vs bitcoin signal dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to logging.level from the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the latest indicators and recent signal history
    Report(ReportArgs),
    /// Open the interactive terminal dashboard
    Dashboard(DashboardArgs),
    /// Export the full signal table as CSV
    Export(ExportArgs),
    /// Validate configuration
    ValidateConfig,
}

/// Where the observations come from and which dates to cover.
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Start date (YYYY-MM-DD), defaults to data.default_start
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Read aligned observations from a CSV file instead of the network
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of recent rows to show
    #[arg(long)]
    pub rows: Option<usize>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Skip the live price lookup
    #[arg(long)]
    pub no_live: bool,
}

#[derive(clap::Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(clap::Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file, defaults to macro_radar_<start>_to_<end>.csv
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
