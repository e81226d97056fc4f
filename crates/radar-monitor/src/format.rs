//! Display formatting for dashboard and report values.

use chrono::NaiveDate;
use radar_core::types::{LiveQuote, Signal, SignalRow, SignalTable};
use serde::Serialize;

/// Insert thousands separators into a run of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$1,234.56` style currency with the given number of decimals.
pub fn format_currency(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "nan".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, format!(".{}", f)),
        None => (fixed.as_str(), String::new()),
    };
    format!("{}${}{}", sign, group_thousands(int_part), frac_part)
}

/// Asset price, whole currency units.
pub fn format_price(value: f64) -> String {
    format_currency(value, 0)
}

/// Net liquidity in billions, e.g. `$6,123.45 B`.
pub fn format_liquidity(value: f64, spaced: bool) -> String {
    let unit = if spaced { " B" } else { "B" };
    format!("{}{}", format_currency(value, 2), unit)
}

/// Correlation to two decimals, `nan` when undefined.
pub fn format_correlation(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => "nan".to_string(),
    }
}

/// Signed percentage change, e.g. `+1.23%`.
pub fn format_change(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

/// The four headline indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub date: NaiveDate,
    /// Whether `price` came from the live probe
    pub live: bool,
    pub price: f64,
    pub change_pct: Option<f64>,
    pub net_liquidity: f64,
    pub correlation: Option<f64>,
    pub signal: Signal,
}

impl Summary {
    /// Build from the latest row, preferring the live quote when available.
    pub fn new(latest: &SignalRow, quote: LiveQuote) -> Self {
        let (live, price, change_pct) = match quote.price {
            Some(price) => (true, price, quote.change_pct),
            None => (false, latest.asset_price, None),
        };
        Self {
            date: latest.date,
            live,
            price,
            change_pct,
            net_liquidity: latest.net_liquidity,
            correlation: latest.rolling_correlation,
            signal: latest.signal,
        }
    }

    pub fn price_label(&self, ticker: &str) -> String {
        let asset = ticker.split('-').next().unwrap_or(ticker);
        if self.live {
            format!("{} Price (Live)", asset)
        } else {
            format!("{} Price", asset)
        }
    }

    pub fn price_text(&self) -> String {
        format_price(self.price)
    }

    pub fn change_text(&self) -> Option<String> {
        self.change_pct.map(format_change)
    }

    pub fn liquidity_text(&self) -> String {
        format_liquidity(self.net_liquidity, true)
    }

    pub fn correlation_text(&self) -> String {
        format_correlation(self.correlation)
    }
}

/// One formatted line of the recent-signal table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentRow {
    pub date: String,
    pub price: String,
    pub net_liquidity: String,
    pub correlation: String,
    pub signal: Signal,
}

impl RecentRow {
    pub fn from_row(row: &SignalRow) -> Self {
        Self {
            date: row.date.format("%Y-%m-%d").to_string(),
            price: format_price(row.asset_price),
            net_liquidity: format_liquidity(row.net_liquidity, false),
            correlation: format_correlation(row.rolling_correlation),
            signal: row.signal,
        }
    }

    /// The last `n` rows of a table, newest first.
    pub fn recent(table: &SignalTable, n: usize) -> Vec<Self> {
        table.recent(n).map(Self::from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> SignalRow {
        SignalRow {
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            net_liquidity: 6123.4567,
            asset_price: 66_123.7,
            liquidity_sma20: Some(6100.0),
            price_sma20: Some(64_000.0),
            rolling_correlation: Some(0.8349),
            signal: Signal::StrongLong,
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(66_123.7, 0), "$66,124");
        assert_eq!(format_currency(1_234_567.891, 2), "$1,234,567.89");
        assert_eq!(format_currency(999.0, 0), "$999");
        assert_eq!(format_currency(-1234.5, 2), "-$1,234.50");
        assert_eq!(format_currency(f64::NAN, 2), "nan");
    }

    #[test]
    fn test_format_fields() {
        assert_eq!(format_liquidity(6123.4567, true), "$6,123.46 B");
        assert_eq!(format_liquidity(6123.4567, false), "$6,123.46B");
        assert_eq!(format_correlation(Some(0.8349)), "0.83");
        assert_eq!(format_correlation(None), "nan");
        assert_eq!(format_change(1.234), "+1.23%");
        assert_eq!(format_change(-0.5), "-0.50%");
    }

    #[test]
    fn test_summary_prefers_live_quote() {
        let live = Summary::new(
            &row(),
            LiveQuote {
                price: Some(67_000.0),
                change_pct: Some(1.5),
            },
        );
        assert!(live.live);
        assert_eq!(live.price_text(), "$67,000");
        assert_eq!(live.change_text().as_deref(), Some("+1.50%"));
        assert_eq!(live.price_label("BTC-USD"), "BTC Price (Live)");

        let fallback = Summary::new(&row(), LiveQuote::default());
        assert!(!fallback.live);
        assert_eq!(fallback.price_text(), "$66,124");
        assert!(fallback.change_text().is_none());
        assert_eq!(fallback.price_label("BTC-USD"), "BTC Price");
        assert_eq!(fallback.liquidity_text(), "$6,123.46 B");
        assert_eq!(fallback.correlation_text(), "0.83");
    }

    #[test]
    fn test_recent_rows() {
        let mut second = row();
        second.date = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap();
        second.rolling_correlation = None;
        let table = SignalTable::new(vec![row(), second]);

        let recent = RecentRow::recent(&table, 30);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, "2024-05-18");
        assert_eq!(recent[0].correlation, "nan");
        assert_eq!(recent[1].price, "$66,124");
        assert_eq!(recent[1].net_liquidity, "$6,123.46B");
    }
}
