//! Data acquisition for the macro radar.
//!
//! Fetches central bank balance sheet series from FRED and daily closes from
//! Yahoo Finance, aligns them on a shared date index, and caches the aligned
//! table for a configurable time-to-live. Also provides the live price probe
//! and CSV import/export.

mod align;
mod cache;
mod csv_source;
mod export;
mod fred;
mod live;
mod service;
mod yahoo;

pub use align::{forward_fill_join, join_on_date};
pub use cache::FetchCache;
pub use csv_source::CsvDataSource;
pub use export::{default_file_name, export_csv, write_csv};
pub use fred::{FredSeries, FredSource, FRED_GRAPH_URL};
pub use live::LivePriceProbe;
pub use service::MarketDataService;
pub use yahoo::{YahooSource, YAHOO_CHART_URL};

