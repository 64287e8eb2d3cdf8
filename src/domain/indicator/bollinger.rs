//! Bollinger Bands.
//!
//! - Middle: SMA over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the population standard deviation. Default period=20,
//! multiplier=2.0. Warmup: first (period-1) closes are `None`.

use crate::domain::indicator::stddev::population_stddev;
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

pub fn calculate_bollinger(closes: &[f64], period: usize, stddev_mult: f64) -> BollingerBands {
    let mut upper = Vec::with_capacity(closes.len());
    let mut middle = Vec::with_capacity(closes.len());
    let mut lower = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        if period == 0 || i + 1 < period {
            upper.push(None);
            middle.push(None);
            lower.push(None);
            continue;
        }
        let window = &closes[i + 1 - period..=i];
        let mid = window.iter().sum::<f64>() / period as f64;
        let sd = population_stddev(window);
        upper.push(Some(mid + stddev_mult * sd));
        middle.push(Some(mid));
        lower.push(Some(mid - stddev_mult * sd));
    }

    BollingerBands {
        upper: IndicatorSeries {
            indicator_type: IndicatorType::BollingerUpper {
                period,
                stddev_mult,
            },
            values: upper,
        },
        middle: IndicatorSeries {
            indicator_type: IndicatorType::BollingerMiddle {
                period,
                stddev_mult,
            },
            values: middle,
        },
        lower: IndicatorSeries {
            indicator_type: IndicatorType::BollingerLower {
                period,
                stddev_mult,
            },
            values: lower,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_warmup() {
        let bands = calculate_bollinger(&[1.0, 2.0, 3.0, 4.0], 3, 2.0);
        assert!(bands.upper.values[1].is_none());
        assert!(bands.lower.values[1].is_none());
        assert!(bands.middle.values[2].is_some());
    }

    #[test]
    fn bollinger_known_values() {
        let closes = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bands = calculate_bollinger(&closes, 8, 2.0);
        // mean 5, population stddev 2
        assert!((bands.middle.values[7].unwrap() - 5.0).abs() < 1e-12);
        assert!((bands.upper.values[7].unwrap() - 9.0).abs() < 1e-12);
        assert!((bands.lower.values[7].unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bollinger_flat_prices_collapse() {
        let bands = calculate_bollinger(&[100.0; 5], 3, 2.0);
        for i in 2..5 {
            assert_eq!(bands.upper.values[i], Some(100.0));
            assert_eq!(bands.lower.values[i], Some(100.0));
        }
    }

    #[test]
    fn bollinger_fractional_multiplier() {
        let closes = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bands = calculate_bollinger(&closes, 8, 2.555);
        assert!((bands.upper.values[7].unwrap() - 10.11).abs() < 1e-12);
        assert!((bands.lower.values[7].unwrap() + 0.11).abs() < 1e-12);
        assert_eq!(
            bands.upper.indicator_type,
            IndicatorType::BollingerUpper {
                period: 8,
                stddev_mult: 2.555
            }
        );
    }

    #[test]
    fn bollinger_upper_above_lower() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + ((i * 7) % 11) as f64).collect();
        let bands = calculate_bollinger(&closes, 20, 2.0);
        for i in 19..30 {
            assert!(bands.upper.values[i].unwrap() >= bands.lower.values[i].unwrap());
        }
    }
}
