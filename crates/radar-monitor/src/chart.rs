//! Chart range selection and series scaling.

use chrono::{Months, NaiveDate};
use radar_core::types::SignalRow;

/// Visible window of the time-series chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartRange {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    ThreeYears,
    FiveYears,
    #[default]
    All,
}

impl ChartRange {
    /// All ranges in selector order.
    pub const ALL: [ChartRange; 8] = [
        ChartRange::OneMonth,
        ChartRange::ThreeMonths,
        ChartRange::SixMonths,
        ChartRange::OneYear,
        ChartRange::TwoYears,
        ChartRange::ThreeYears,
        ChartRange::FiveYears,
        ChartRange::All,
    ];

    /// Map selector keys `1`..`8` to a range.
    pub fn from_key(key: char) -> Option<Self> {
        let index = key.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartRange::OneMonth => "1M",
            ChartRange::ThreeMonths => "3M",
            ChartRange::SixMonths => "6M",
            ChartRange::OneYear => "1Y",
            ChartRange::TwoYears => "2Y",
            ChartRange::ThreeYears => "3Y",
            ChartRange::FiveYears => "5Y",
            ChartRange::All => "ALL",
        }
    }

    fn months(&self) -> Option<u32> {
        match self {
            ChartRange::OneMonth => Some(1),
            ChartRange::ThreeMonths => Some(3),
            ChartRange::SixMonths => Some(6),
            ChartRange::OneYear => Some(12),
            ChartRange::TwoYears => Some(24),
            ChartRange::ThreeYears => Some(36),
            ChartRange::FiveYears => Some(60),
            ChartRange::All => None,
        }
    }

    /// First visible date when the newest row is dated `latest`.
    pub fn start_for(&self, latest: NaiveDate) -> Option<NaiveDate> {
        self.months()
            .and_then(|m| latest.checked_sub_months(Months::new(m)))
    }

    /// The tail of `rows` inside this range.
    pub fn visible<'a>(&self, rows: &'a [SignalRow]) -> &'a [SignalRow] {
        let Some(latest) = rows.last() else {
            return rows;
        };
        match self.start_for(latest.date) {
            Some(start) => &rows[rows.partition_point(|r| r.date < start)..],
            None => rows,
        }
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo == hi {
        [lo - 1.0, hi + 1.0]
    } else {
        [lo, hi]
    }
}

/// Chart points with price rescaled onto the liquidity axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub liquidity: Vec<(f64, f64)>,
    pub price: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub liquidity_bounds: [f64; 2],
    pub price_bounds: [f64; 2],
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

impl ChartSeries {
    /// Build chart points, `None` for an empty slice.
    pub fn build(rows: &[SignalRow]) -> Option<Self> {
        let first = rows.first()?;
        let last = rows.last()?;

        let liquidity_bounds = bounds(rows.iter().map(|r| r.net_liquidity));
        let price_bounds = bounds(rows.iter().map(|r| r.asset_price));
        let liq_span = liquidity_bounds[1] - liquidity_bounds[0];
        let price_span = price_bounds[1] - price_bounds[0];

        let x = |date: NaiveDate| (date - first.date).num_days() as f64;

        let liquidity = rows.iter().map(|r| (x(r.date), r.net_liquidity)).collect();
        let price = rows
            .iter()
            .map(|r| {
                let fraction = (r.asset_price - price_bounds[0]) / price_span;
                (x(r.date), liquidity_bounds[0] + fraction * liq_span)
            })
            .collect();

        Some(Self {
            liquidity,
            price,
            x_bounds: [0.0, x(last.date).max(1.0)],
            liquidity_bounds,
            price_bounds,
            first_date: first.date,
            last_date: last.date,
        })
    }

    /// Liquidity value at a fraction of the vertical axis.
    pub fn liquidity_at(&self, fraction: f64) -> f64 {
        self.liquidity_bounds[0] + fraction * (self.liquidity_bounds[1] - self.liquidity_bounds[0])
    }

    /// Price value at a fraction of the vertical axis.
    pub fn price_at(&self, fraction: f64) -> f64 {
        self.price_bounds[0] + fraction * (self.price_bounds[1] - self.price_bounds[0])
    }

    /// Date at the middle of the horizontal axis.
    pub fn mid_date(&self) -> NaiveDate {
        self.first_date + (self.last_date - self.first_date) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use radar_core::types::Signal;

    fn rows(n: i64) -> Vec<SignalRow> {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        (0..n)
            .map(|i| SignalRow {
                date: base + Duration::days(i),
                net_liquidity: 6000.0 + i as f64,
                asset_price: 10_000.0 + 100.0 * i as f64,
                liquidity_sma20: None,
                price_sma20: None,
                rolling_correlation: None,
                signal: Signal::Neutral,
            })
            .collect()
    }

    #[test]
    fn test_from_key() {
        assert_eq!(ChartRange::from_key('1'), Some(ChartRange::OneMonth));
        assert_eq!(ChartRange::from_key('8'), Some(ChartRange::All));
        assert_eq!(ChartRange::from_key('0'), None);
        assert_eq!(ChartRange::from_key('9'), None);
        assert_eq!(ChartRange::from_key('x'), None);
    }

    #[test]
    fn test_visible_tail() {
        let rows = rows(800);
        let latest = rows.last().unwrap().date;

        let month = ChartRange::OneMonth.visible(&rows);
        assert_eq!(month.first().unwrap().date, latest.checked_sub_months(Months::new(1)).unwrap());
        assert_eq!(ChartRange::All.visible(&rows).len(), 800);
        assert_eq!(ChartRange::FiveYears.visible(&rows).len(), 800);
        assert!(ChartRange::OneYear.visible(&[]).is_empty());
    }

    #[test]
    fn test_price_scaled_onto_liquidity_axis() {
        let series = ChartSeries::build(&rows(11)).unwrap();

        assert_eq!(series.liquidity_bounds, [6000.0, 6010.0]);
        assert_eq!(series.price_bounds, [10_000.0, 11_000.0]);
        assert_eq!(series.price[0].1, 6000.0);
        assert!((series.price[10].1 - 6010.0).abs() < 1e-9);
        assert!((series.price[5].1 - 6005.0).abs() < 1e-9);
        assert_eq!(series.x_bounds, [0.0, 10.0]);
        assert!((series.price_at(0.5) - 10_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_bounds_are_padded() {
        let series = ChartSeries::build(&rows(1)).unwrap();
        assert_eq!(series.liquidity_bounds, [5999.0, 6001.0]);
        assert_eq!(series.x_bounds, [0.0, 1.0]);
        assert!(ChartSeries::build(&[]).is_none());
    }
}
