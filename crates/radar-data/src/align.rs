//! Date alignment of raw series.

use chrono::NaiveDate;
use radar_core::types::{MacroObservation, Observation, PricePoint};
use std::collections::{BTreeMap, HashMap};

/// Outer-join series on date, forward-fill gaps, and drop rows that are still
/// missing a value in any series.
///
/// Returns one row per surviving date, values in input series order.
pub fn forward_fill_join(series: &[Vec<(NaiveDate, Option<f64>)>]) -> Vec<(NaiveDate, Vec<f64>)> {
    let width = series.len();
    let mut table: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();

    for (col, points) in series.iter().enumerate() {
        for (date, value) in points {
            let row = table.entry(*date).or_insert_with(|| vec![None; width]);
            if value.is_some() {
                row[col] = *value;
            }
        }
    }

    let mut last: Vec<Option<f64>> = vec![None; width];
    table
        .into_iter()
        .filter_map(|(date, row)| {
            for (carried, value) in last.iter_mut().zip(row) {
                if value.is_some() {
                    *carried = value;
                }
            }
            let complete: Option<Vec<f64>> = last.iter().copied().collect();
            complete.map(|values| (date, values))
        })
        .collect()
}

/// Inner-join macro rows and closes on date.
pub fn join_on_date(macro_rows: &[MacroObservation], prices: &[PricePoint]) -> Vec<Observation> {
    let closes: HashMap<NaiveDate, f64> = prices.iter().map(|p| (p.date, p.close)).collect();

    macro_rows
        .iter()
        .filter_map(|m| {
            closes
                .get(&m.date)
                .map(|close| Observation::new(m.date, m.net_liquidity(), *close))
        })
        .collect()
}
