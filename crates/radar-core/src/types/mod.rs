//! Core data types for the macro radar.

mod observation;
mod range;
mod signal;

pub use observation::{LiveQuote, MacroObservation, Observation, PricePoint};
pub use range::DateRange;
pub use signal::{Signal, SignalRow, SignalTable};
