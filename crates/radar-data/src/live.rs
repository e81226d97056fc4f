//! Latest-price probe.

use chrono::{NaiveDate, Utc};
use radar_core::traits::PriceSource;
use radar_core::types::{DateRange, LiveQuote};
use tracing::warn;

/// Looks up the most recent close and its change versus the prior close.
///
/// Failures degrade to an empty quote; callers fall back to the last
/// historical price.
pub struct LivePriceProbe<P> {
    source: P,
    ticker: String,
    lookback_days: i64,
}

impl<P: PriceSource> LivePriceProbe<P> {
    /// Create a probe looking back five days.
    pub fn new(source: P, ticker: impl Into<String>) -> Self {
        Self {
            source,
            ticker: ticker.into(),
            lookback_days: 5,
        }
    }

    /// Override how many days of history are requested.
    pub fn with_lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = days;
        self
    }

    /// Probe as of today (UTC).
    pub async fn probe_now(&self) -> LiveQuote {
        self.probe(Utc::now().date_naive()).await
    }

    /// Probe as of `today`.
    pub async fn probe(&self, today: NaiveDate) -> LiveQuote {
        let range = DateRange::trailing_days(today, self.lookback_days);
        match self.source.fetch_closes(&self.ticker, range).await {
            Ok(points) => {
                let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
                LiveQuote::from_closes(&closes)
            }
            Err(e) => {
                warn!(ticker = %self.ticker, error = %e, "Live price probe failed");
                LiveQuote::default()
            }
        }
    }
}
