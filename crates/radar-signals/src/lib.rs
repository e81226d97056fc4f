//! Liquidity/price signal engine.
//!
//! Augments an aligned liquidity/price series with trailing moving averages,
//! a rolling correlation and a categorical [`Signal`](radar_core::Signal) per
//! row. The engine is a pure function over its input: no I/O, no state kept
//! between calls.

mod classify;
mod engine;

pub use classify::{classify, TrendState};
pub use engine::{SignalEngine, SignalParams};
