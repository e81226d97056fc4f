//! Liquidity/price signal types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DateRange, Observation};

/// Joint trend state of liquidity and price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    /// Liquidity and price above trend with high correlation
    StrongLong,
    /// Price above trend while liquidity is not
    Divergence,
    /// Liquidity above trend while price is not
    BuyOpportunity,
    /// Neither of the above
    Neutral,
}

impl Signal {
    /// All signals in priority order.
    pub const ALL: [Signal; 4] = [
        Signal::StrongLong,
        Signal::Divergence,
        Signal::BuyOpportunity,
        Signal::Neutral,
    ];

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Signal::StrongLong => "STRONG_LONG",
            Signal::Divergence => "DIVERGENCE",
            Signal::BuyOpportunity => "BUY_OPPORTUNITY",
            Signal::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::StrongLong => "STRONG LONG",
            Signal::Divergence => "DIVERGENCE (Risk)",
            Signal::BuyOpportunity => "BUY OPPORTUNITY",
            Signal::Neutral => "NEUTRAL",
        };
        f.write_str(label)
    }
}

/// An observation augmented with trailing statistics and its signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub net_liquidity: f64,
    pub asset_price: f64,
    /// Trailing mean of net liquidity, absent during warm-up
    pub liquidity_sma20: Option<f64>,
    /// Trailing mean of the asset price, absent during warm-up
    pub price_sma20: Option<f64>,
    /// Trailing Pearson correlation, absent during warm-up or on zero variance
    pub rolling_correlation: Option<f64>,
    pub signal: Signal,
}

impl SignalRow {
    /// The raw observation this row was derived from.
    pub fn observation(&self) -> Observation {
        Observation::new(self.date, self.net_liquidity, self.asset_price)
    }
}

/// Ordered table of signal rows, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalTable {
    rows: Vec<SignalRow>,
}

impl SignalTable {
    pub fn new(rows: Vec<SignalRow>) -> Self {
        Self { rows }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, oldest first.
    pub fn rows(&self) -> &[SignalRow] {
        &self.rows
    }

    /// The most recent row.
    pub fn latest(&self) -> Option<&SignalRow> {
        self.rows.last()
    }

    /// The last `n` rows, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &SignalRow> {
        let start = self.rows.len().saturating_sub(n);
        self.rows[start..].iter().rev()
    }

    /// Rows whose date falls within `range`.
    pub fn within(&self, range: &DateRange) -> &[SignalRow] {
        let lo = self.rows.partition_point(|r| r.date < range.start());
        let hi = self.rows.partition_point(|r| r.date <= range.end());
        &self.rows[lo..hi.max(lo)]
    }

    /// Rows dated on or after `start`.
    pub fn since(&self, start: NaiveDate) -> &[SignalRow] {
        let lo = self.rows.partition_point(|r| r.date < start);
        &self.rows[lo..]
    }

    /// Number of rows per signal, in priority order.
    pub fn signal_counts(&self) -> [(Signal, usize); 4] {
        Signal::ALL.map(|s| (s, self.rows.iter().filter(|r| r.signal == s).count()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignalRow> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<SignalRow> {
        self.rows
    }
}

impl FromIterator<SignalRow> for SignalTable {
    fn from_iter<T: IntoIterator<Item = SignalRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, signal: Signal) -> SignalRow {
        SignalRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            net_liquidity: 6000.0 + day as f64,
            asset_price: 40_000.0 + day as f64,
            liquidity_sma20: None,
            price_sma20: None,
            rolling_correlation: None,
            signal,
        }
    }

    fn table() -> SignalTable {
        (1..=10)
            .map(|d| {
                let s = if d % 2 == 0 { Signal::Neutral } else { Signal::Divergence };
                row(d, s)
            })
            .collect()
    }

    #[test]
    fn test_signal_labels() {
        assert_eq!(Signal::StrongLong.to_string(), "STRONG LONG");
        assert_eq!(Signal::Divergence.to_string(), "DIVERGENCE (Risk)");
        assert_eq!(Signal::BuyOpportunity.code(), "BUY_OPPORTUNITY");
        assert_eq!(
            serde_json::to_string(&Signal::StrongLong).unwrap(),
            "\"STRONG_LONG\""
        );
    }

    #[test]
    fn test_recent_is_newest_first() {
        let table = table();
        let days: Vec<u32> = table.recent(3).map(|r| chrono::Datelike::day(&r.date)).collect();
        assert_eq!(days, vec![10, 9, 8]);

        // Asking for more than exists returns everything
        assert_eq!(table.recent(100).count(), 10);
    }

    #[test]
    fn test_within_range() {
        let table = table();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .unwrap();
        let rows = table.within(&range);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, range.start());

        let since = table.since(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
        assert_eq!(since.len(), 2);
    }

    #[test]
    fn test_signal_counts() {
        let counts = table().signal_counts();
        assert_eq!(counts[0], (Signal::StrongLong, 0));
        assert_eq!(counts[1], (Signal::Divergence, 5));
        assert_eq!(counts[3], (Signal::Neutral, 5));
    }
}
