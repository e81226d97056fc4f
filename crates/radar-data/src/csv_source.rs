//! CSV data source.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use radar_core::error::DataError;
use radar_core::types::{DateRange, Observation};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "DATE")]
    date: String,
    #[serde(alias = "Net_Liquidity", alias = "liquidity")]
    net_liquidity: f64,
    #[serde(alias = "BTC_Price", alias = "price", alias = "Close", alias = "close")]
    asset_price: f64,
}

/// Offline source of already aligned observations.
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all observations, sorted by date.
    pub fn load_all(&self) -> Result<Vec<Observation>, DataError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let observations = read_observations(reader)?;
        info!(path = %self.path.display(), rows = observations.len(), "Loaded observations from CSV");
        Ok(observations)
    }

    /// Load observations within `range`.
    pub fn load_range(&self, range: DateRange) -> Result<Vec<Observation>, DataError> {
        let observations: Vec<Observation> = self
            .load_all()?
            .into_iter()
            .filter(|o| range.contains(o.date))
            .collect();

        if observations.is_empty() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(observations)
    }
}

fn read_observations<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<Vec<Observation>, DataError> {
    let mut observations = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;
        let date = parse_date(&record.date)?;
        observations.push(Observation::new(date, record.net_liquidity, record.asset_price));
    }

    // Sort by date, later duplicates replace earlier ones
    observations.sort_by_key(|o| o.date);
    observations.dedup_by(|later, earlier| {
        if later.date == earlier.date {
            *earlier = *later;
            true
        } else {
            false
        }
    });

    Ok(observations)
}

/// Parse the date formats seen in exported tables.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let trimmed = date_str.trim();
    // Exports from dataframe tools may carry a midnight time component
    let date_part = trimmed.split([' ', 'T']).next().unwrap_or(trimmed);

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_part, format) {
            return Ok(d);
        }
    }

    Err(DataError::Parse(format!("Could not parse date: {}", date_str)))
}
