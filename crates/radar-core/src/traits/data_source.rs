//! Data source trait definitions.

use crate::error::DataError;
use crate::types::{DateRange, MacroObservation, PricePoint};
use async_trait::async_trait;

/// Source of central bank balance sheet series.
#[async_trait]
pub trait MacroSource: Send + Sync {
    /// Fetch forward-filled, gap-dropped balance sheet rows.
    ///
    /// # Arguments
    /// * `range` - Inclusive date range
    ///
    /// # Returns
    /// Rows ordered from oldest to newest, one per date on which every
    /// series has a (possibly carried-forward) value
    async fn fetch_macro(&self, range: DateRange) -> Result<Vec<MacroObservation>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}

/// Source of daily asset closes.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch daily closes for a ticker.
    ///
    /// # Arguments
    /// * `ticker` - Asset ticker, e.g. `BTC-USD`
    /// * `range` - Inclusive date range
    ///
    /// # Returns
    /// Closes ordered from oldest to newest
    async fn fetch_closes(&self, ticker: &str, range: DateRange)
        -> Result<Vec<PricePoint>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
