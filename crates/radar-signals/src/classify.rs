//! Row classification.

use radar_core::Signal;

/// Boolean trend predicates for one row.
///
/// Every predicate compared against an undefined statistic is `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrendState {
    /// Net liquidity above its moving average
    pub liquidity_up: bool,
    /// Asset price above its moving average
    pub price_up: bool,
    /// Correlation above the threshold
    pub high_correlation: bool,
}

impl TrendState {
    /// Evaluate the predicates for one row.
    pub fn evaluate(
        net_liquidity: f64,
        liquidity_sma: Option<f64>,
        asset_price: f64,
        price_sma: Option<f64>,
        correlation: Option<f64>,
        correlation_threshold: f64,
    ) -> Self {
        Self {
            liquidity_up: exceeds(net_liquidity, liquidity_sma),
            price_up: exceeds(asset_price, price_sma),
            high_correlation: exceeds_threshold(correlation, correlation_threshold),
        }
    }
}

/// `value > reference`, false when the reference is undefined.
#[inline]
fn exceeds(value: f64, reference: Option<f64>) -> bool {
    matches!(reference, Some(r) if value > r)
}

/// `value > threshold`, false when the value is undefined.
#[inline]
fn exceeds_threshold(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(v) if v > threshold)
}

/// Map trend predicates to a signal. First matching branch wins.
pub fn classify(state: TrendState) -> Signal {
    let TrendState {
        liquidity_up,
        price_up,
        high_correlation,
    } = state;

    if liquidity_up && price_up && high_correlation {
        Signal::StrongLong
    } else if !liquidity_up && price_up {
        Signal::Divergence
    } else if liquidity_up && !price_up {
        Signal::BuyOpportunity
    } else {
        Signal::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(liquidity_up: bool, price_up: bool, high_correlation: bool) -> TrendState {
        TrendState {
            liquidity_up,
            price_up,
            high_correlation,
        }
    }

    #[test]
    fn test_priority_chain() {
        assert_eq!(classify(state(true, true, true)), Signal::StrongLong);
        assert_eq!(classify(state(true, true, false)), Signal::Neutral);
        assert_eq!(classify(state(false, true, true)), Signal::Divergence);
        assert_eq!(classify(state(false, true, false)), Signal::Divergence);
        assert_eq!(classify(state(true, false, true)), Signal::BuyOpportunity);
        assert_eq!(classify(state(true, false, false)), Signal::BuyOpportunity);
        assert_eq!(classify(state(false, false, true)), Signal::Neutral);
        assert_eq!(classify(state(false, false, false)), Signal::Neutral);
    }

    #[test]
    fn test_undefined_comparisons_are_false() {
        let s = TrendState::evaluate(100.0, None, 50.0, None, None, 0.5);
        assert_eq!(s, TrendState::default());
        assert_eq!(classify(s), Signal::Neutral);
    }

    #[test]
    fn test_threshold_is_strict() {
        let s = TrendState::evaluate(2.0, Some(1.0), 2.0, Some(1.0), Some(0.5), 0.5);
        assert!(!s.high_correlation);
        assert_eq!(classify(s), Signal::Neutral);

        let s = TrendState::evaluate(2.0, Some(1.0), 2.0, Some(1.0), Some(0.51), 0.5);
        assert_eq!(classify(s), Signal::StrongLong);
    }

    #[test]
    fn test_equal_to_average_is_not_up() {
        let s = TrendState::evaluate(1.0, Some(1.0), 3.0, Some(2.0), Some(0.9), 0.5);
        assert!(!s.liquidity_up);
        assert_eq!(classify(s), Signal::Divergence);
    }
}
