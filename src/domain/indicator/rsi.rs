//! RSI (Relative Strength Index).
//!
//! Simple trailing averages of the last `n` price changes:
//! - avg_gain = mean(max(ΔC, 0)), avg_loss = mean(max(-ΔC, 0))
//! - RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! - avg_loss == 0 → 100, else avg_gain == 0 → 0
//!
//! Warmup: the first `n` closes are `None` (n changes are needed).

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || closes.len() < 2 {
        return IndicatorSeries::empty(IndicatorType::Rsi(period), closes.len());
    }

    let mut values = vec![None; closes.len()];
    for (i, slot) in values.iter_mut().enumerate().skip(period) {
        let mut gains = 0.0;
        let mut losses = 0.0;
        for j in (i + 1 - period)..=i {
            let change = closes[j] - closes[j - 1];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }
        *slot = Some(rsi_from_averages(
            gains / period as f64,
            losses / period as f64,
        ));
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
