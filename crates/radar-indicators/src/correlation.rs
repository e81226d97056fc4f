//! Rolling correlation between two series.

use radar_core::traits::PairIndicator;

use crate::simd::pearson_simd;

/// Rolling Pearson correlation over a trailing window.
///
/// A window whose inputs have zero variance yields `None` rather than zero.
#[derive(Debug, Clone)]
pub struct RollingCorrelation {
    period: usize,
}

impl RollingCorrelation {
    /// Create a rolling correlation with the specified window.
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self { period }
    }
}

impl PairIndicator for RollingCorrelation {
    type Output = f64;

    fn calculate_pair(&self, x: &[f64], y: &[f64]) -> Vec<Option<f64>> {
        let len = x.len().min(y.len());
        (0..len)
            .map(|i| {
                let end = i + 1;
                if end < self.period {
                    return None;
                }
                let start = end - self.period;
                pearson_simd(&x[start..end], &y[start..end])
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "CORR"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warmup_and_alignment() {
        let corr = RollingCorrelation::new(30);
        let x: Vec<f64> = (0..40).map(|i| (i as f64 * 0.5).sin()).collect();
        let y: Vec<f64> = (0..40).map(|i| (i as f64 * 0.5).cos()).collect();
        let result = corr.calculate_pair(&x, &y);

        assert_eq!(result.len(), 40);
        assert!(result[..29].iter().all(Option::is_none));
        for value in result[29..].iter() {
            let r = value.expect("defined after warm-up");
            assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_matches_window_kernel() {
        let corr = RollingCorrelation::new(5);
        let x = vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 8.0];
        let y = vec![2.0, 1.0, 4.0, 3.0, 7.0, 5.0, 9.0];
        let result = corr.calculate_pair(&x, &y);

        let expected = crate::simd::pearson(&x[2..7], &y[2..7]).unwrap();
        assert!((result[6].unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_flat_liquidity_never_correlates() {
        let corr = RollingCorrelation::new(30);
        let liquidity = vec![6123.45; 60];
        let prices: Vec<f64> = (0..60).map(|i| 40_000.0 + 25.0 * i as f64).collect();

        assert!(corr.calculate_pair(&liquidity, &prices).iter().all(Option::is_none));
    }

    #[test]
    fn test_mismatched_lengths() {
        let corr = RollingCorrelation::new(2);
        assert!(corr.validate_pair(&[1.0, 2.0], &[1.0]).is_err());
        assert_eq!(corr.calculate_pair(&[1.0, 2.0, 3.0], &[1.0, 2.0]).len(), 2);
    }
}
