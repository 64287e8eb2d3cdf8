//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]). Warmup: first (n-1) closes are `None`.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_sma(closes: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 {
        return IndicatorSeries::empty(IndicatorType::Sma(period), closes.len());
    }

    let values = (0..closes.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                let window = &closes[i + 1 - period..=i];
                Some(window.iter().sum::<f64>() / period as f64)
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}
