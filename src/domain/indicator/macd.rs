//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//!
//! Warmup: line from slow - 1, signal from slow - 1 + signal - 1.

use crate::domain::indicator::ema::ema_values;
use crate::domain::indicator::{calculate_ema, IndicatorSeries, IndicatorType};

#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub line: IndicatorSeries,
    pub signal: IndicatorSeries,
}

pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdLines {
    let line_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };
    let signal_type = IndicatorType::MacdSignal {
        fast,
        slow,
        signal: signal_period,
    };

    if fast == 0 || slow == 0 || signal_period == 0 {
        return MacdLines {
            line: IndicatorSeries::empty(line_type, closes.len()),
            signal: IndicatorSeries::empty(signal_type, closes.len()),
        };
    }

    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);

    let line: Vec<Option<f64>> = ema_fast
        .values
        .iter()
        .zip(&ema_slow.values)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();
    let signal = ema_values(line.iter().copied(), signal_period);

    MacdLines {
        line: IndicatorSeries {
            indicator_type: line_type,
            values: line,
        },
        signal: IndicatorSeries {
            indicator_type: signal_type,
            values: signal,
        },
    }
}
