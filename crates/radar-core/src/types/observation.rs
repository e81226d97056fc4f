//! Raw observation types produced by data acquisition.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One aligned row of the input table: net liquidity and asset close for a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date, unique and strictly increasing across a table
    pub date: NaiveDate,
    /// Net liquidity in billions
    pub net_liquidity: f64,
    /// Closing price of the tracked asset
    pub asset_price: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, net_liquidity: f64, asset_price: f64) -> Self {
        Self {
            date,
            net_liquidity,
            asset_price,
        }
    }
}

/// Forward-filled central bank balance sheet components for a date.
///
/// Units follow the source series: total assets and the treasury account are
/// reported in millions, reverse repo usage in billions. The net liquidity
/// formula mixes them as published and scales by 1000.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroObservation {
    pub date: NaiveDate,
    pub total_assets: f64,
    pub treasury_general_account: f64,
    pub reverse_repo: f64,
}

impl MacroObservation {
    /// `(total_assets - treasury_general_account - reverse_repo) / 1000`
    #[inline]
    pub fn net_liquidity(&self) -> f64 {
        (self.total_assets - self.treasury_general_account - self.reverse_repo) / 1000.0
    }
}

/// Daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Most recent close and change versus the prior observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveQuote {
    /// Latest close, if any observation was available
    pub price: Option<f64>,
    /// Percentage change versus the previous close
    pub change_pct: Option<f64>,
}

impl LiveQuote {
    /// Build a quote from closes ordered oldest to newest.
    pub fn from_closes(closes: &[f64]) -> Self {
        match closes {
            [] => Self::default(),
            [only] => Self {
                price: Some(*only),
                change_pct: Some(0.0),
            },
            [.., prev, last] => Self {
                price: Some(*last),
                change_pct: (*prev != 0.0).then(|| (last - prev) / prev * 100.0),
            },
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.price.is_some()
    }
}
