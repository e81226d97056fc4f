//! Plain-text report.

use radar_core::types::Signal;

use crate::format::{RecentRow, Summary};

/// Render the headline indicators, signal distribution and recent rows.
pub fn render_report(
    ticker: &str,
    summary: &Summary,
    counts: &[(Signal, usize)],
    recent: &[RecentRow],
) -> String {
    let mut s = String::new();

    s.push_str("═══════════════════════════════════════════════════════════════════════\n");
    s.push_str("                            MACRO RADAR                                \n");
    s.push_str("═══════════════════════════════════════════════════════════════════════\n\n");

    s.push_str(&format!("INDICATORS (as of {})\n", summary.date));
    s.push_str("───────────────────────────────────────────────────────────────────────\n");
    let price = match summary.change_text() {
        Some(change) => format!("{} ({})", summary.price_text(), change),
        None => summary.price_text(),
    };
    s.push_str(&format!("  {:<21}{}\n", format!("{}:", summary.price_label(ticker)), price));
    s.push_str(&format!("  {:<21}{}\n", "Net Liquidity:", summary.liquidity_text()));
    s.push_str(&format!("  {:<21}{}\n", "Correlation:", summary.correlation_text()));
    s.push_str(&format!("  {:<21}{}\n", "Signal:", summary.signal));
    s.push('\n');

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    s.push_str("SIGNAL DISTRIBUTION\n");
    s.push_str("───────────────────────────────────────────────────────────────────────\n");
    for (signal, n) in counts {
        let pct = if total == 0 { 0.0 } else { *n as f64 / total as f64 * 100.0 };
        s.push_str(&format!("  {:<21}{:>6}  ({:.1}%)\n", format!("{}:", signal), n, pct));
    }
    s.push('\n');

    s.push_str("RECENT SIGNAL HISTORY\n");
    s.push_str("───────────────────────────────────────────────────────────────────────\n");
    s.push_str(&format!(
        "  {:<12}{:>12}{:>16}{:>13}  {}\n",
        "Date", "Price", "Net Liquidity", "Correlation", "Signal"
    ));
    for row in recent {
        s.push_str(&format!(
            "  {:<12}{:>12}{:>16}{:>13}  {}\n",
            row.date, row.price, row.net_liquidity, row.correlation, row.signal
        ));
    }

    s.push_str("═══════════════════════════════════════════════════════════════════════\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use radar_core::types::{LiveQuote, SignalRow, SignalTable};

    #[test]
    fn test_render_report() {
        let row = SignalRow {
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            net_liquidity: 6100.0,
            asset_price: 65_000.0,
            liquidity_sma20: Some(6000.0),
            price_sma20: Some(63_000.0),
            rolling_correlation: Some(0.61),
            signal: Signal::StrongLong,
        };
        let table = SignalTable::new(vec![row]);
        let summary = Summary::new(&row, LiveQuote::default());
        let report = render_report(
            "BTC-USD",
            &summary,
            &table.signal_counts(),
            &RecentRow::recent(&table, 30),
        );

        assert!(report.contains("as of 2024-05-17"));
        assert!(report.contains("BTC Price:"));
        assert!(report.contains("$65,000"));
        assert!(report.contains("$6,100.00 B"));
        assert!(report.contains("STRONG LONG:"));
        assert!(report.contains("(100.0%)"));
        assert!(report.contains("$6,100.00B"));
    }
}
