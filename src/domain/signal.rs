//! Independent signal strategies.
//!
//! Every function receives the price history observable at the current step
//! (closes `0..=i`) and never looks past its last element. Short histories
//! resolve to [`SignalDecision::Hold`] or a volatility of 0.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::indicator::{mean, sample_stddev};

/// Default momentum threshold, in percent.
pub const DEFAULT_MOMENTUM_THRESHOLD_PCT: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDecision {
    Buy,
    Sell,
    Hold,
}

impl SignalDecision {
    /// Buy → +1, Hold → 0, Sell → -1.
    pub fn vote(&self) -> f64 {
        match self {
            SignalDecision::Buy => 1.0,
            SignalDecision::Hold => 0.0,
            SignalDecision::Sell => -1.0,
        }
    }
}

impl fmt::Display for SignalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDecision::Buy => write!(f, "buy"),
            SignalDecision::Sell => write!(f, "sell"),
            SignalDecision::Hold => write!(f, "hold"),
        }
    }
}

/// Percent change from `prev` to `curr`; 0 when `prev` is 0.
pub fn pct_change(curr: f64, prev: f64) -> f64 {
    if prev == 0.0 {
        0.0
    } else {
        (curr - prev) / prev * 100.0
    }
}

/// Mean of the last `window` values, or of all values when fewer exist.
pub fn moving_average(data: &[f64], window: usize) -> f64 {
    if window == 0 || data.len() < window {
        mean(data)
    } else {
        mean(&data[data.len() - window..])
    }
}

/// Average of the two most recent percent changes against `threshold_pct`.
pub fn momentum_signal(prices: &[f64], threshold_pct: f64) -> SignalDecision {
    let [.., p0, p1, p2] = prices else {
        return SignalDecision::Hold;
    };
    let avg = (pct_change(*p1, *p0) + pct_change(*p2, *p1)) / 2.0;
    if avg > threshold_pct {
        SignalDecision::Buy
    } else if avg < -threshold_pct {
        SignalDecision::Sell
    } else {
        SignalDecision::Hold
    }
}

/// Short/long moving-average cross between the previous and latest step.
pub fn ma_crossover_signal(prices: &[f64], short: usize, long: usize) -> SignalDecision {
    if prices.len() < long + 1 {
        return SignalDecision::Hold;
    }
    let prev = &prices[..prices.len() - 1];
    let prev_diff = moving_average(prev, short) - moving_average(prev, long);
    let now_diff = moving_average(prices, short) - moving_average(prices, long);

    if prev_diff <= 0.0 && now_diff > 0.0 {
        SignalDecision::Buy
    } else if prev_diff >= 0.0 && now_diff < 0.0 {
        SignalDecision::Sell
    } else {
        SignalDecision::Hold
    }
}

/// Sample standard deviation of the last `window` prices. 0 until at least
/// `max(window, 2)` prices are available.
pub fn volatility(prices: &[f64], window: usize) -> f64 {
    if prices.len() < window.max(2) {
        return 0.0;
    }
    sample_stddev(&prices[prices.len() - window..])
}
