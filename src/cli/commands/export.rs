//! Export command implementation.

use anyhow::{Context, Result};
use radar_config::AppConfig;
use radar_data::{default_file_name, export_csv};
use std::path::PathBuf;

use super::{build_engine, resolve_range};
use crate::acquire::Acquisition;
use crate::cli::ExportArgs;

pub async fn run(args: ExportArgs, config: &AppConfig) -> Result<()> {
    let engine = build_engine(config)?;
    let range = resolve_range(&args.source, config)?;
    let mut acquisition = Acquisition::new(config, args.source.data.as_deref(), false)?;

    let observations = acquisition
        .load(range)
        .await
        .context("Failed to load market data")?;
    let table = engine.calculate(&observations);

    let path = args
        .out
        .unwrap_or_else(|| PathBuf::from(default_file_name(&range)));
    export_csv(&path, &table).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}
