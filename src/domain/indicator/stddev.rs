//! Mean and standard deviation helpers.
//!
//! Bollinger Bands use the population form (divides by N). [`sample_stddev`]
//! divides by N-1 and backs the volatility strategy and the Sharpe ratio.

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Sample standard deviation; 0 when fewer than two values.
pub fn sample_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

pub(crate) fn population_stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / values.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn sample_stddev_known() {
        // mean 5, squared deviations sum 32, n-1 = 7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((sample_stddev(&values) - expected).abs() < 1e-12);
    }

    #[test]
    fn sample_stddev_single_value_is_zero() {
        assert_eq!(sample_stddev(&[42.0]), 0.0);
        assert_eq!(sample_stddev(&[]), 0.0);
    }

    #[test]
    fn population_stddev_known() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_stddev(&values) - 2.0).abs() < 1e-12);
        assert_eq!(population_stddev(&[10.0; 5]), 0.0);
        assert_eq!(population_stddev(&[]), 0.0);
    }
}
