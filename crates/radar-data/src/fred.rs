//! FRED balance sheet source.

use async_trait::async_trait;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use futures::future::try_join_all;
use radar_core::error::DataError;
use radar_core::traits::MacroSource;
use radar_core::types::{DateRange, MacroObservation};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::align::forward_fill_join;

/// Public CSV download endpoint, no API key required.
pub const FRED_GRAPH_URL: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";

/// Series identifiers making up net liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FredSeries {
    /// Central bank total assets
    pub total_assets: String,
    /// Treasury general account
    pub treasury_general_account: String,
    /// Overnight reverse repo usage
    pub reverse_repo: String,
}

impl Default for FredSeries {
    fn default() -> Self {
        Self {
            total_assets: "WALCL".to_string(),
            treasury_general_account: "WTREGEN".to_string(),
            reverse_repo: "RRPONTSYD".to_string(),
        }
    }
}

impl FredSeries {
    fn ids(&self) -> [&str; 3] {
        [
            self.total_assets.as_str(),
            self.treasury_general_account.as_str(),
            self.reverse_repo.as_str(),
        ]
    }
}

/// FRED data source.
pub struct FredSource {
    client: Client,
    base_url: String,
    series: FredSeries,
}

impl FredSource {
    /// Create a FRED source against the given endpoint.
    pub fn new(base_url: &str, series: FredSeries, timeout: Duration) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            series,
        })
    }

    /// Create a source for the default series on the public endpoint.
    pub fn with_defaults(timeout: Duration) -> Result<Self, DataError> {
        Self::new(FRED_GRAPH_URL, FredSeries::default(), timeout)
    }

    /// Download one series as `(date, value)` pairs.
    async fn fetch_series(
        &self,
        id: &str,
        range: DateRange,
    ) -> Result<Vec<(NaiveDate, Option<f64>)>, DataError> {
        let params = [
            ("id", id.to_string()),
            ("cosd", range.start().format("%Y-%m-%d").to_string()),
            ("coed", range.end().format("%Y-%m-%d").to_string()),
        ];

        let resp = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::Http(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(DataError::SeriesNotFound(id.to_string()));
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(DataError::Api(format!("{}: {}", status, text)));
        }

        let body = resp.text().await.map_err(|e| DataError::Http(e.to_string()))?;
        let points = parse_series_csv(&body)?;
        debug!(series = id, points = points.len(), "Fetched FRED series");

        Ok(points
            .into_iter()
            .filter(|(date, _)| range.contains(*date))
            .collect())
    }
}

#[async_trait]
impl MacroSource for FredSource {
    async fn fetch_macro(&self, range: DateRange) -> Result<Vec<MacroObservation>, DataError> {
        let ids = self.series.ids();
        let fetches = ids.iter().map(|id| self.fetch_series(id, range));
        let series = try_join_all(fetches).await?;

        let rows: Vec<MacroObservation> = forward_fill_join(&series)
            .into_iter()
            .map(|(date, values)| MacroObservation {
                date,
                total_assets: values[0],
                treasury_general_account: values[1],
                reverse_repo: values[2],
            })
            .collect();

        info!(rows = rows.len(), %range, "Loaded balance sheet series");
        Ok(rows)
    }

    fn name(&self) -> &str {
        "fred"
    }
}

/// Parse a two-column `date,value` FRED CSV. `.` marks a missing value.
pub(crate) fn parse_series_csv(body: &str) -> Result<Vec<(NaiveDate, Option<f64>)>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut points = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| DataError::Parse(e.to_string()))?;
        let (Some(date), Some(value)) = (record.get(0), record.get(1)) else {
            return Err(DataError::Parse(format!(
                "Expected date,value columns, got {} fields",
                record.len()
            )));
        };

        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| DataError::Parse(format!("Invalid date '{}': {}", date, e)))?;

        let value = match value.trim() {
            "." | "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .map_err(|e| DataError::Parse(format!("Invalid value '{}': {}", raw, e)))?,
            ),
        };

        points.push((date, value));
    }

    Ok(points)
}
