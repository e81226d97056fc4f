//! Yahoo Finance daily close source.

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate};
use radar_core::error::DataError;
use radar_core::traits::PriceSource;
use radar_core::types::{DateRange, PricePoint};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Public chart API host.
pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com";

const USER_AGENT: &str = "Mozilla/5.0 (compatible; macro-radar/0.1)";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo Finance data source.
pub struct YahooSource {
    client: Client,
    base_url: String,
}

impl YahooSource {
    /// Create a Yahoo source against the given host.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DataError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a source on the public host.
    pub fn with_defaults(timeout: Duration) -> Result<Self, DataError> {
        Self::new(YAHOO_CHART_URL, timeout)
    }
}

#[async_trait]
impl PriceSource for YahooSource {
    async fn fetch_closes(
        &self,
        ticker: &str,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, DataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);

        // period2 is exclusive, so extend one day to include `end`
        let period1 = midnight_timestamp(range.start());
        let after_end = range.end().checked_add_days(Days::new(1)).unwrap_or(range.end());
        let period2 = midnight_timestamp(after_end);
        let params = [
            ("period1", period1.to_string()),
            ("period2", period2.to_string()),
            ("interval", "1d".to_string()),
            ("events", "history".to_string()),
        ];

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| DataError::Http(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(DataError::SeriesNotFound(ticker.to_string()));
        }
        if !status.is_success() {
            return Err(DataError::Api(format!("{}: {}", status, body)));
        }

        let points: Vec<PricePoint> = parse_chart(&body)?
            .into_iter()
            .filter(|p| range.contains(p.date))
            .collect();
        debug!(ticker, points = points.len(), "Fetched daily closes");

        Ok(points)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

fn midnight_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Parse a v8 chart payload into daily closes, oldest first.
///
/// Null closes are skipped. When several bars fall on the same UTC date the
/// last one wins.
pub(crate) fn parse_chart(body: &str) -> Result<Vec<PricePoint>, DataError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| DataError::Parse(e.to_string()))?;

    if let Some(err) = response.chart.error {
        return Err(DataError::Api(format!("{}: {}", err.code, err.description)));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(DataError::NoDataAvailable);
    };

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
            close
                .filter(|c| c.is_finite())
                .map(|close| PricePoint { date, close })
        })
        .collect();

    points.sort_by_key(|p| p.date);
    let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
    for point in points {
        match deduped.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => deduped.push(point),
        }
    }

    Ok(deduped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_parse_chart() {
        // 2024-01-01, 2024-01-02, 2024-01-03 00:00 UTC
        let body = r#"{"chart":{"result":[{
            "meta":{"symbol":"BTC-USD"},
            "timestamp":[1704067200,1704153600,1704240000],
            "indicators":{"quote":[{"close":[44167.33,null,42848.17]}]}
        }],"error":null}}"#;

        let points = parse_chart(body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], PricePoint { date: d(1), close: 44167.33 });
        assert_eq!(points[1].date, d(3));
    }

    #[test]
    fn test_parse_chart_same_day_keeps_last() {
        // Daily bar plus an intraday bar for the same date
        let body = r#"{"chart":{"result":[{
            "timestamp":[1704067200,1704100000],
            "indicators":{"quote":[{"close":[100.0,105.0]}]}
        }],"error":null}}"#;

        let points = parse_chart(body).unwrap();
        assert_eq!(points, vec![PricePoint { date: d(1), close: 105.0 }]);
    }

    #[test]
    fn test_parse_chart_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(matches!(parse_chart(body), Err(DataError::Api(_))));
    }

    #[test]
    fn test_parse_chart_empty_result() {
        let body = r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse_chart(body).unwrap().is_empty());
        assert!(matches!(
            parse_chart(r#"{"chart":{"result":[],"error":null}}"#),
            Err(DataError::NoDataAvailable)
        ));
    }

    #[test]
    fn test_midnight_timestamp() {
        assert_eq!(midnight_timestamp(d(1)), 1704067200);
    }
}
