//! Error types for the macro radar.

use chrono::NaiveDate;
use thiserror::Error;

/// Top-level radar error.
#[derive(Error, Debug)]
pub enum RadarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Data acquisition errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Series not found: {0}")]
    SeriesNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Signal engine errors.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Result type alias for radar operations.
pub type RadarResult<T> = Result<T, RadarError>;
