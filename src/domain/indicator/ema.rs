//! Exponential Moving Average.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) values are `None`.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_ema(closes: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values: ema_values(closes.iter().map(|&c| Some(c)), period),
    }
}

/// EMA over a sequence that may start with `None`s. Seeding begins at the
/// first defined value; a `None` after that keeps the running value.
pub(crate) fn ema_values<I>(input: I, period: usize) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let input: Vec<Option<f64>> = input.into_iter().collect();
    if period == 0 {
        return vec![None; input.len()];
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut values = Vec::with_capacity(input.len());
    let mut seen = 0usize;
    let mut sum = 0.0;
    let mut ema: Option<f64> = None;

    for value in input {
        let Some(v) = value else {
            values.push(None);
            continue;
        };
        match ema {
            Some(prev) => {
                let next = v * k + prev * (1.0 - k);
                ema = Some(next);
                values.push(ema);
            }
            None => {
                seen += 1;
                sum += v;
                if seen == period {
                    ema = Some(sum / period as f64);
                }
                values.push(ema);
            }
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_warmup() {
        let series = calculate_ema(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert!(series.values[0].is_none());
        assert!(series.values[1].is_none());
        assert!(series.values[2].is_some());
        assert!(series.values[4].is_some());
    }

    #[test]
    fn ema_seed_is_sma() {
        let series = calculate_ema(&[10.0, 20.0, 30.0], 3);
        let expected_sma = (10.0 + 20.0 + 30.0) / 3.0;
        assert!((series.values[2].unwrap() - expected_sma).abs() < f64::EPSILON);
    }

    #[test]
    fn ema_recursive_calculation() {
        let series = calculate_ema(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);

        let k = 2.0 / 4.0;
        let sma = 20.0;
        let ema_3 = 40.0 * k + sma * (1.0 - k);
        let ema_4 = 50.0 * k + ema_3 * (1.0 - k);

        assert!((series.values[3].unwrap() - ema_3).abs() < f64::EPSILON);
        assert!((series.values[4].unwrap() - ema_4).abs() < f64::EPSILON);
    }

    #[test]
    fn ema_equal_prices() {
        let series = calculate_ema(&[100.0; 5], 3);
        for v in series.values.iter().skip(2) {
            assert!((v.unwrap() - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn ema_leading_none_input() {
        let values = ema_values(vec![None, None, Some(2.0), Some(4.0), Some(6.0)], 2);
        assert_eq!(values[..3], [None, None, None]);
        assert_eq!(values[3], Some(3.0));
        // k = 2/3: 6*2/3 + 3/3 = 5
        assert!((values[4].unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn ema_period_0() {
        let series = calculate_ema(&[10.0, 20.0], 0);
        assert!(series.values.iter().all(Option::is_none));
    }
}
