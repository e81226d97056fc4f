//! Cached market data acquisition.

use radar_core::error::DataError;
use radar_core::traits::{MacroSource, PriceSource};
use radar_core::types::{DateRange, Observation};
use std::time::Duration;
use tracing::{debug, info};

use crate::align::join_on_date;
use crate::cache::FetchCache;

/// Fetches and aligns macro and price series, caching the aligned table per
/// date range.
pub struct MarketDataService<M, P> {
    macro_source: M,
    price_source: P,
    ticker: String,
    cache: FetchCache<DateRange, Vec<Observation>>,
}

impl<M: MacroSource, P: PriceSource> MarketDataService<M, P> {
    /// Create a service over the given sources and cache.
    pub fn new(
        macro_source: M,
        price_source: P,
        ticker: impl Into<String>,
        cache: FetchCache<DateRange, Vec<Observation>>,
    ) -> Self {
        Self {
            macro_source,
            price_source,
            ticker: ticker.into(),
            cache,
        }
    }

    /// Create a service with a fresh cache of the given time-to-live.
    pub fn with_ttl(macro_source: M, price_source: P, ticker: impl Into<String>, ttl: Duration) -> Self {
        Self::new(macro_source, price_source, ticker, FetchCache::new(ttl))
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Aligned observations for `range`, served from cache while fresh.
    pub async fn load(&mut self, range: DateRange) -> Result<Vec<Observation>, DataError> {
        if let Some(cached) = self.cache.get(&range) {
            debug!(%range, rows = cached.len(), "Serving observations from cache");
            return Ok(cached.clone());
        }

        let observations = self.fetch(range).await?;
        self.cache.insert(range, observations.clone());
        Ok(observations)
    }

    /// Drop every cached range and fetch `range` again.
    pub async fn refresh(&mut self, range: DateRange) -> Result<Vec<Observation>, DataError> {
        self.invalidate();
        self.load(range).await
    }

    /// Drop every cached range.
    pub fn invalidate(&mut self) {
        info!("Invalidating market data cache");
        self.cache.invalidate_all();
    }

    async fn fetch(&self, range: DateRange) -> Result<Vec<Observation>, DataError> {
        let macro_rows = self.macro_source.fetch_macro(range).await?;
        let prices = self.price_source.fetch_closes(&self.ticker, range).await?;

        let observations = join_on_date(&macro_rows, &prices);
        if observations.is_empty() {
            return Err(DataError::NoDataAvailable);
        }

        info!(
            rows = observations.len(),
            macro_source = self.macro_source.name(),
            price_source = self.price_source.name(),
            "Aligned market data"
        );
        Ok(observations)
    }
}
