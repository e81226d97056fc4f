//! Trailing-window signal engine.

use radar_core::error::SignalError;
use radar_core::traits::{Indicator, PairIndicator};
use radar_core::types::{Observation, SignalRow, SignalTable};
use radar_indicators::{RollingCorrelation, Sma};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{classify, TrendState};

/// Window lengths and threshold for the signal engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    /// Moving average window for both series
    pub ma_window: usize,
    /// Rolling correlation window
    pub correlation_window: usize,
    /// Correlation above which the trend is considered confirmed
    pub correlation_threshold: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            ma_window: 20,
            correlation_window: 30,
            correlation_threshold: 0.5,
        }
    }
}

impl SignalParams {
    /// Validate window lengths and threshold.
    pub fn validate(&self) -> Result<(), SignalError> {
        if self.ma_window == 0 {
            return Err(SignalError::InvalidParams(
                "Moving average window must be greater than 0".into(),
            ));
        }
        if self.correlation_window < 2 {
            return Err(SignalError::InvalidParams(
                "Correlation window must be at least 2".into(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.correlation_threshold) {
            return Err(SignalError::InvalidParams(format!(
                "Correlation threshold {} outside [-1, 1]",
                self.correlation_threshold
            )));
        }
        Ok(())
    }
}

/// Computes moving averages, rolling correlation and a signal for every row.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    params: SignalParams,
    sma: Sma,
    correlation: RollingCorrelation,
}

impl SignalEngine {
    /// Create an engine with validated parameters.
    pub fn new(params: SignalParams) -> Result<Self, SignalError> {
        params.validate()?;
        Ok(Self {
            params,
            sma: Sma::new(params.ma_window),
            correlation: RollingCorrelation::new(params.correlation_window),
        })
    }

    pub fn params(&self) -> &SignalParams {
        &self.params
    }

    /// Augment each observation with its trailing statistics and signal.
    ///
    /// Output has the same length and order as the input. Every statistic for
    /// row `i` is computed from rows `..=i` only.
    pub fn calculate(&self, observations: &[Observation]) -> SignalTable {
        let liquidity: Vec<f64> = observations.iter().map(|o| o.net_liquidity).collect();
        let prices: Vec<f64> = observations.iter().map(|o| o.asset_price).collect();

        let liquidity_sma = self.sma.calculate_aligned(&liquidity);
        let price_sma = self.sma.calculate_aligned(&prices);
        let correlation = self.correlation.calculate_pair(&liquidity, &prices);

        let table: SignalTable = observations
            .iter()
            .zip(liquidity_sma)
            .zip(price_sma)
            .zip(correlation)
            .map(|(((obs, liq_sma), px_sma), corr)| {
                let state = TrendState::evaluate(
                    obs.net_liquidity,
                    liq_sma,
                    obs.asset_price,
                    px_sma,
                    corr,
                    self.params.correlation_threshold,
                );
                SignalRow {
                    date: obs.date,
                    net_liquidity: obs.net_liquidity,
                    asset_price: obs.asset_price,
                    liquidity_sma20: liq_sma,
                    price_sma20: px_sma,
                    rolling_correlation: corr,
                    signal: classify(state),
                }
            })
            .collect();

        if let Some(latest) = table.latest() {
            debug!(
                rows = table.len(),
                date = %latest.date,
                signal = %latest.signal,
                "Signal table calculated"
            );
        }

        table
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        let params = SignalParams::default();
        Self {
            params,
            sma: Sma::new(params.ma_window),
            correlation: RollingCorrelation::new(params.correlation_window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use radar_core::Signal;

    fn series(n: usize, f: impl Fn(usize) -> (f64, f64)) -> Vec<Observation> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let (liq, px) = f(i);
                Observation::new(base + Duration::days(i as i64), liq, px)
            })
            .collect()
    }

    fn wavy(n: usize) -> Vec<Observation> {
        series(n, |i| {
            let t = i as f64;
            (6000.0 + (t * 0.4).sin() * 150.0 + t, 40_000.0 + (t * 0.3).cos() * 2_000.0)
        })
    }

    #[test]
    fn test_preserves_length_and_order() {
        let input = wavy(60);
        let table = SignalEngine::default().calculate(&input);

        assert_eq!(table.len(), input.len());
        for (row, obs) in table.iter().zip(&input) {
            assert_eq!(row.observation(), *obs);
        }
    }

    #[test]
    fn test_moving_average_warmup() {
        let input = wavy(50);
        let table = SignalEngine::default().calculate(&input);
        let rows = table.rows();

        assert!(rows[..19].iter().all(|r| r.liquidity_sma20.is_none()));
        assert!(rows[..19].iter().all(|r| r.price_sma20.is_none()));

        for i in 19..rows.len() {
            let window = &input[i - 19..=i];
            let liq_mean = window.iter().map(|o| o.net_liquidity).sum::<f64>() / 20.0;
            let px_mean = window.iter().map(|o| o.asset_price).sum::<f64>() / 20.0;
            assert!((rows[i].liquidity_sma20.unwrap() - liq_mean).abs() < 1e-9);
            assert!((rows[i].price_sma20.unwrap() - px_mean).abs() < 1e-9);
        }
    }

    #[test]
    fn test_correlation_warmup_and_bounds() {
        let table = SignalEngine::default().calculate(&wavy(80));
        let rows = table.rows();

        assert!(rows[..29].iter().all(|r| r.rolling_correlation.is_none()));
        for row in &rows[29..] {
            let r = row.rolling_correlation.expect("defined from row 29");
            assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_idempotent() {
        let input = wavy(70);
        let engine = SignalEngine::default();
        assert_eq!(engine.calculate(&input), engine.calculate(&input));
    }

    #[test]
    fn test_no_look_ahead() {
        let input = wavy(70);
        let engine = SignalEngine::default();
        let full = engine.calculate(&input);

        for k in [1, 19, 20, 29, 30, 45, 69] {
            let truncated = engine.calculate(&input[..k]);
            assert_eq!(truncated.rows(), &full.rows()[..k], "k={}", k);
        }
    }

    #[test]
    fn test_constant_liquidity_never_strong_long() {
        let input = series(35, |i| (100.0, 50.0 + i as f64));
        let table = SignalEngine::default().calculate(&input);

        assert!(table.iter().all(|r| r.rolling_correlation.is_none()));
        assert!(table.iter().all(|r| r.signal != Signal::StrongLong));
        // Price above its average with liquidity flat reads as divergence
        assert_eq!(table.rows()[34].signal, Signal::Divergence);
    }

    #[test]
    fn test_lockstep_rise_is_strong_long() {
        let input = series(40, |i| {
            let liq = 100.0 + i as f64;
            (liq, 2.0 * liq)
        });
        let table = SignalEngine::default().calculate(&input);
        let rows = table.rows();

        // Both averages exceeded but correlation still warming up
        for row in &rows[19..29] {
            assert_eq!(row.signal, Signal::Neutral);
        }
        for row in &rows[29..] {
            assert!((row.rolling_correlation.unwrap() - 1.0).abs() < 1e-9);
            assert_eq!(row.signal, Signal::StrongLong);
        }
    }

    #[test]
    fn test_single_row() {
        let input = series(1, |_| (6000.0, 42_000.0));
        let table = SignalEngine::default().calculate(&input);

        assert_eq!(table.len(), 1);
        let row = table.latest().unwrap();
        assert!(row.liquidity_sma20.is_none());
        assert!(row.price_sma20.is_none());
        assert!(row.rolling_correlation.is_none());
        assert_eq!(row.signal, Signal::Neutral);
    }

    #[test]
    fn test_falling_liquidity_rising_price_is_divergence() {
        let input = series(40, |i| (6000.0 - 10.0 * i as f64, 30_000.0 + 250.0 * i as f64));
        let table = SignalEngine::default().calculate(&input);

        for row in &table.rows()[19..] {
            assert_eq!(row.signal, Signal::Divergence);
        }
    }

    #[test]
    fn test_rising_liquidity_falling_price_is_buy_opportunity() {
        let input = series(40, |i| (6000.0 + 10.0 * i as f64, 30_000.0 - 250.0 * i as f64));
        let table = SignalEngine::default().calculate(&input);

        assert_eq!(table.latest().unwrap().signal, Signal::BuyOpportunity);
    }

    #[test]
    fn test_empty_input() {
        assert!(SignalEngine::default().calculate(&[]).is_empty());
    }

    #[test]
    fn test_params_validation() {
        assert!(SignalParams::default().validate().is_ok());

        let zero = SignalParams { ma_window: 0, ..Default::default() };
        assert!(SignalEngine::new(zero).is_err());

        let short = SignalParams { correlation_window: 1, ..Default::default() };
        assert!(short.validate().is_err());

        let threshold = SignalParams { correlation_threshold: 1.5, ..Default::default() };
        assert!(threshold.validate().is_err());
    }

    #[test]
    fn test_custom_params() {
        let params = SignalParams {
            ma_window: 5,
            correlation_window: 10,
            correlation_threshold: 0.9,
        };
        let engine = SignalEngine::new(params).unwrap();
        let table = engine.calculate(&wavy(20));

        assert!(table.rows()[4].liquidity_sma20.is_some());
        assert!(table.rows()[8].rolling_correlation.is_none());
        assert!(table.rows()[9].rolling_correlation.is_some());
    }
}
