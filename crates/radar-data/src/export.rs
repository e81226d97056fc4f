//! CSV export of the derived signal table.

use csv::Writer;
use radar_core::error::DataError;
use radar_core::types::{DateRange, SignalTable};
use std::io::Write;
use std::path::Path;
use tracing::info;

const HEADER: [&str; 7] = [
    "date",
    "net_liquidity",
    "asset_price",
    "liquidity_sma20",
    "price_sma20",
    "rolling_correlation",
    "signal",
];

/// Default export file name for a range.
pub fn default_file_name(range: &DateRange) -> String {
    format!("macro_radar_{}.csv", range)
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write the full table as CSV. Undefined statistics are empty cells.
pub fn write_csv<W: Write>(writer: W, table: &SignalTable) -> Result<(), DataError> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(HEADER)
        .map_err(|e| DataError::Parse(e.to_string()))?;

    for row in table.iter() {
        csv.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.net_liquidity.to_string(),
            row.asset_price.to_string(),
            optional(row.liquidity_sma20),
            optional(row.price_sma20),
            optional(row.rolling_correlation),
            row.signal.code().to_string(),
        ])
        .map_err(|e| DataError::Parse(e.to_string()))?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the table to a file.
pub fn export_csv(path: &Path, table: &SignalTable) -> Result<(), DataError> {
    let file = std::fs::File::create(path)?;
    write_csv(file, table)?;
    info!(path = %path.display(), rows = table.len(), "Exported signal table");
    Ok(())
}
