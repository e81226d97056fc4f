//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for trailing-window indicators over a single series.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for every complete window.
    ///
    /// # Arguments
    /// * `data` - Input series, oldest first
    ///
    /// # Returns
    /// `data.len() - period + 1` values, or nothing if the series is too short
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the window length.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Calculate values aligned with the input, `None` during warm-up.
    fn calculate_aligned(&self, data: &[f64]) -> Vec<Option<Self::Output>> {
        let values = self.calculate(data);
        let warmup = data.len() - values.len();
        std::iter::repeat_with(|| None)
            .take(warmup)
            .chain(values.into_iter().map(Some))
            .collect()
    }

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Trailing-window indicator over two aligned series.
pub trait PairIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate values aligned with the inputs, `None` where undefined.
    ///
    /// Inputs of different length are truncated to the shorter one.
    fn calculate_pair(&self, x: &[f64], y: &[f64]) -> Vec<Option<Self::Output>>;

    /// Get the window length.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that the series line up.
    fn validate_pair(&self, x: &[f64], y: &[f64]) -> Result<(), IndicatorError> {
        if x.len() != y.len() {
            return Err(IndicatorError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        Ok(())
    }
}
