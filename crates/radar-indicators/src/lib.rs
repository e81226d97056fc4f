//! Trailing-window indicators with SIMD optimization.
//!
//! This crate provides the statistics behind the liquidity signal:
//! - Simple moving average over a single series
//! - Rolling Pearson correlation between two aligned series
//!
//! The correlation kernel has a SIMD implementation used by default and a
//! scalar reference kept for verification and benchmarking.

pub mod correlation;
pub mod moving_average;
pub mod simd;

pub use correlation::RollingCorrelation;
pub use moving_average::Sma;
