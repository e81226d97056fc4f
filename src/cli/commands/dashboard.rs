//! Dashboard command implementation.

use anyhow::{Context, Result};
use radar_config::AppConfig;
use radar_data::{default_file_name, export_csv};
use radar_monitor::{Dashboard, DashboardAction, DashboardState};
use radar_signals::SignalEngine;
use std::path::Path;
use tokio::runtime::Handle;
use tracing::{info, warn};

use super::{build_engine, resolve_range};
use crate::acquire::Acquisition;
use crate::cli::DashboardArgs;

pub async fn run(args: DashboardArgs, config: &AppConfig) -> Result<()> {
    let engine = build_engine(config)?;
    let range = resolve_range(&args.source, config)?;
    let live_price = config.dashboard.live_price;
    let mut acquisition = Acquisition::new(config, args.source.data.as_deref(), live_price)?;

    let observations = acquisition
        .load(range)
        .await
        .context("Failed to load market data")?;
    let table = engine.calculate(&observations);
    let quote = acquisition.live_quote().await;

    let mut state = DashboardState::new(table, quote, range, &config.data.ticker)
        .with_recent_rows(config.dashboard.recent_rows);
    state.push_message(format!("Loaded {} rows for {}", state.table.len(), range));

    let dashboard = Dashboard::new(config.dashboard.refresh_ms);
    let export_dir = Path::new(&config.dashboard.export_dir);
    let handle = Handle::current();

    // The dashboard loop blocks; refreshes re-enter the runtime from it
    tokio::task::block_in_place(|| {
        dashboard.run(&mut state, |action, state| match action {
            DashboardAction::Refresh => {
                handle.block_on(refresh(&mut acquisition, &engine, state));
            }
            DashboardAction::Export => export(export_dir, state),
        })
    })?;

    info!("Dashboard closed");
    Ok(())
}

async fn refresh(acquisition: &mut Acquisition, engine: &SignalEngine, state: &mut DashboardState) {
    match acquisition.refresh(state.range).await {
        Ok(observations) => {
            state.table = engine.calculate(&observations);
            state.quote = acquisition.live_quote().await;
            state.push_message(format!("Refreshed {} rows", state.table.len()));
        }
        Err(e) => {
            warn!(error = %e, "Refresh failed");
            state.push_message(format!("Refresh failed: {}", e));
        }
    }
}

fn export(dir: &Path, state: &mut DashboardState) {
    let path = dir.join(default_file_name(&state.range));
    match export_csv(&path, &state.table) {
        Ok(()) => state.push_message(format!("Exported to {}", path.display())),
        Err(e) => {
            warn!(error = %e, "Export failed");
            state.push_message(format!("Export failed: {}", e));
        }
    }
}
