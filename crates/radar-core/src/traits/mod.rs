//! Core traits for the macro radar.

mod data_source;
mod indicator;

pub use data_source::{MacroSource, PriceSource};
pub use indicator::{Indicator, PairIndicator};
