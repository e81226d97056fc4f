//! Core types and traits for the macro radar.
//!
//! This crate provides the foundational building blocks including:
//! - Time-series types (Observation, SignalRow, SignalTable)
//! - The categorical liquidity/price Signal
//! - Core traits for indicators and data sources

pub mod types;
pub mod traits;
pub mod error;

pub use error::{RadarError, RadarResult};
pub use types::*;
pub use traits::*;
