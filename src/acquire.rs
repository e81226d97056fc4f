//! Selection between network and file acquisition.

use anyhow::{Context, Result};
use radar_config::AppConfig;
use radar_core::error::DataError;
use radar_core::types::{DateRange, LiveQuote, Observation};
use radar_data::{CsvDataSource, FredSource, LivePriceProbe, MarketDataService, YahooSource};
use std::path::Path;
use tracing::info;

/// Source of aligned observations for the commands.
pub enum Acquisition {
    Remote {
        service: MarketDataService<FredSource, YahooSource>,
        probe: Option<LivePriceProbe<YahooSource>>,
    },
    File(CsvDataSource),
}

impl Acquisition {
    /// Build from configuration, or from a CSV file when one is given.
    pub fn new(config: &AppConfig, data: Option<&Path>, live_price: bool) -> Result<Self> {
        if let Some(path) = data {
            let source = CsvDataSource::new(path)
                .with_context(|| format!("Data file '{}' is not readable", path.display()))?;
            info!(path = %path.display(), "Using offline observations");
            return Ok(Self::File(source));
        }

        let settings = &config.data;
        let timeout = settings.request_timeout();
        let fred = FredSource::new(&settings.fred_url, settings.fred_series.clone(), timeout)?;
        let yahoo = YahooSource::new(&settings.price_url, timeout)?;
        let service = MarketDataService::with_ttl(fred, yahoo, &settings.ticker, config.cache.ttl());

        let probe = if live_price {
            let source = YahooSource::new(&settings.price_url, timeout)?;
            Some(LivePriceProbe::new(source, &settings.ticker))
        } else {
            None
        };

        Ok(Self::Remote { service, probe })
    }

    /// Observations for `range`, cached when fetched remotely.
    pub async fn load(&mut self, range: DateRange) -> Result<Vec<Observation>, DataError> {
        match self {
            Self::Remote { service, .. } => service.load(range).await,
            Self::File(source) => source.load_range(range),
        }
    }

    /// Drop cached data and load `range` again.
    pub async fn refresh(&mut self, range: DateRange) -> Result<Vec<Observation>, DataError> {
        match self {
            Self::Remote { service, .. } => service.refresh(range).await,
            Self::File(source) => source.load_range(range),
        }
    }

    /// Latest quote, empty when probing is disabled or fails.
    pub async fn live_quote(&self) -> LiveQuote {
        match self {
            Self::Remote { probe: Some(probe), .. } => probe.probe_now().await,
            _ => LiveQuote::default(),
        }
    }
}
