//! Macro radar CLI application.

mod acquire;
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use radar_config::load_config_or_default;
use radar_monitor::{setup_file_logging, setup_logging};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    // Setup logging
    let log_level = match cli.log_level {
        Some(level) => level.as_str().to_string(),
        None => config.logging.level.clone(),
    };
    let json_logs = cli.json_logs || config.logging.format == "json";

    // The dashboard owns the terminal, so its logs always go to a file
    let _guard = match &cli.command {
        Commands::Dashboard(_) => {
            let file = config.logging.dashboard_file();
            Some(
                setup_file_logging(&log_level, json_logs, Path::new(file))
                    .with_context(|| format!("Failed to open log file {}", file))?,
            )
        }
        _ => {
            setup_logging(&log_level, json_logs);
            None
        }
    };

    // Execute command
    match cli.command {
        Commands::Report(args) => cli::commands::report::run(args, &config).await,
        Commands::Dashboard(args) => cli::commands::dashboard::run(args, &config).await,
        Commands::Export(args) => cli::commands::export::run(args, &config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
