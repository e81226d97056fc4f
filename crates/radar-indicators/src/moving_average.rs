//! Moving average indicators.

use radar_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        data.windows(self.period)
            .map(|w| w.iter().sum::<f64>() / period_f64)
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[1] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[2] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let data = vec![1.0, 2.0, 3.0];
        let result = sma.calculate(&data);

        assert!(result.is_empty());
    }

    #[test]
    fn test_sma_aligned_twenty() {
        let sma = Sma::new(20);
        let data: Vec<f64> = (1..=25).map(|i| i as f64).collect();
        let result = sma.calculate_aligned(&data);

        assert_eq!(result.len(), 25);
        assert!(result[..19].iter().all(Option::is_none));
        // mean(1..=20) = 10.5
        assert!((result[19].unwrap() - 10.5).abs() < 1e-10);
        // mean(6..=25) = 15.5
        assert!((result[24].unwrap() - 15.5).abs() < 1e-10);
    }

    #[test]
    #[should_panic(expected = "Period must be greater than 0")]
    fn test_sma_zero_period() {
        let _ = Sma::new(0);
    }
}
