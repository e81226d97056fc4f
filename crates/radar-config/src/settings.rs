//! Configuration structures.

use chrono::NaiveDate;
use radar_core::RadarError;
use radar_data::FredSeries;
use radar_signals::SignalParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub signal: SignalParams,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

impl AppConfig {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), RadarError> {
        self.signal.validate()?;

        if self.data.ticker.trim().is_empty() {
            return Err(RadarError::Config("data.ticker must not be empty".into()));
        }
        if self.data.request_timeout_secs == 0 {
            return Err(RadarError::Config(
                "data.request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.dashboard.recent_rows == 0 {
            return Err(RadarError::Config(
                "dashboard.recent_rows must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "macro-radar".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Log file used by the dashboard when none is configured.
pub const DEFAULT_LOG_FILE: &str = "logs/macro-radar.log";

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Log file used while the dashboard owns the terminal
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: Some(DEFAULT_LOG_FILE.to_string()),
        }
    }
}

impl LoggingConfig {
    /// File the dashboard logs to. Never the terminal, which it owns.
    pub fn dashboard_file(&self) -> &str {
        self.file.as_deref().unwrap_or(DEFAULT_LOG_FILE)
    }
}

/// Data provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub fred_url: String,
    pub fred_series: FredSeries,
    pub price_url: String,
    pub ticker: String,
    /// Start date used when none is given on the command line
    pub default_start: NaiveDate,
    pub request_timeout_secs: u64,
}

impl DataSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            fred_url: radar_data::FRED_GRAPH_URL.to_string(),
            fred_series: FredSeries::default(),
            price_url: radar_data::YAHOO_CHART_URL.to_string(),
            ticker: "BTC-USD".to_string(),
            default_start: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default(),
            request_timeout_secs: 30,
        }
    }
}

/// Raw fetch cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_secs: u64,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

/// Dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Input poll interval
    pub refresh_ms: u64,
    /// Rows shown in the recent signal table
    pub recent_rows: usize,
    /// Directory for CSV exports triggered from the dashboard
    pub export_dir: String,
    /// Query the latest price on load
    pub live_price: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_ms: 250,
            recent_rows: 30,
            export_dir: ".".to_string(),
            live_price: true,
        }
    }
}
