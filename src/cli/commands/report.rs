//! Report command implementation.

use anyhow::{Context, Result};
use radar_config::AppConfig;
use radar_monitor::{render_report, RecentRow, Summary};
use serde_json::json;
use tracing::info;

use super::{build_engine, resolve_range};
use crate::acquire::Acquisition;
use crate::cli::ReportArgs;

pub async fn run(args: ReportArgs, config: &AppConfig) -> Result<()> {
    let engine = build_engine(config)?;
    let range = resolve_range(&args.source, config)?;
    let live_price = config.dashboard.live_price && !args.no_live;
    let mut acquisition = Acquisition::new(config, args.source.data.as_deref(), live_price)?;

    info!("Loading market data for {}", range);
    let observations = acquisition
        .load(range)
        .await
        .context("Failed to load market data")?;

    let table = engine.calculate(&observations);
    let Some(latest) = table.latest() else {
        anyhow::bail!("No observations in {}", range);
    };

    let quote = acquisition.live_quote().await;
    let summary = Summary::new(latest, quote);
    let counts = table.signal_counts();
    let recent = RecentRow::recent(&table, args.rows.unwrap_or(config.dashboard.recent_rows));

    match args.output.as_str() {
        "json" => {
            let distribution: serde_json::Map<String, serde_json::Value> = counts
                .iter()
                .map(|(signal, n)| (signal.code().to_string(), json!(n)))
                .collect();
            let report = json!({
                "ticker": config.data.ticker,
                "start": range.start(),
                "end": range.end(),
                "rows": table.len(),
                "summary": summary,
                "signal_counts": distribution,
                "recent": recent,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print!("{}", render_report(&config.data.ticker, &summary, &counts, &recent));
        }
    }

    Ok(())
}
