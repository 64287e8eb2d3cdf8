//! Weighted-vote combination of the signal strategies.
//!
//! score = w_momentum·momentum_vote + w_ma·ma_vote − w_volatility·vol_factor
//!
//! where vol_factor = volatility / avg_price over the long window. The final
//! decision compares the score against the configured buy/sell thresholds.

use serde::{Deserialize, Serialize};

use super::indicator::mean;
use super::signal::{
    ma_crossover_signal, momentum_signal, volatility, SignalDecision,
    DEFAULT_MOMENTUM_THRESHOLD_PCT,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    pub momentum: f64,
    pub ma: f64,
    /// Applied as a penalty: larger values push the score down.
    pub volatility: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        EnsembleWeights {
            momentum: 0.5,
            ma: 0.4,
            volatility: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleThresholds {
    pub buy: f64,
    pub sell: f64,
}

impl Default for EnsembleThresholds {
    fn default() -> Self {
        EnsembleThresholds {
            buy: 0.25,
            sell: -0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleConfig {
    pub weights: EnsembleWeights,
    pub thresholds: EnsembleThresholds,
    pub momentum_threshold_pct: f64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        EnsembleConfig {
            weights: EnsembleWeights::default(),
            thresholds: EnsembleThresholds::default(),
            momentum_threshold_pct: DEFAULT_MOMENTUM_THRESHOLD_PCT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleDetails {
    pub momentum_vote: f64,
    pub ma_vote: f64,
    pub vol_factor: f64,
    pub avg_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleResult {
    pub momentum: SignalDecision,
    pub ma_crossover: SignalDecision,
    pub volatility: f64,
    pub score: f64,
    pub decision: SignalDecision,
    pub details: EnsembleDetails,
}

/// Evaluates every strategy on `prices` and combines them.
pub fn evaluate(
    prices: &[f64],
    ma_short: usize,
    ma_long: usize,
    config: &EnsembleConfig,
) -> EnsembleResult {
    let momentum = momentum_signal(prices, config.momentum_threshold_pct);
    let ma_crossover = ma_crossover_signal(prices, ma_short, ma_long);
    let vol = volatility(prices, ma_long);

    let avg_price = if prices.is_empty() {
        1.0
    } else if prices.len() >= ma_long {
        mean(&prices[prices.len() - ma_long..])
    } else {
        mean(prices)
    };
    let vol_factor = if avg_price > 0.0 { vol / avg_price } else { 0.0 };

    let momentum_vote = momentum.vote();
    let ma_vote = ma_crossover.vote();
    let weights = &config.weights;
    let score =
        weights.momentum * momentum_vote + weights.ma * ma_vote - weights.volatility * vol_factor;

    EnsembleResult {
        momentum,
        ma_crossover,
        volatility: vol,
        score,
        decision: decide(score, &config.thresholds),
        details: EnsembleDetails {
            momentum_vote,
            ma_vote,
            vol_factor,
            avg_price,
        },
    }
}

pub fn decide(score: f64, thresholds: &EnsembleThresholds) -> SignalDecision {
    if score > thresholds.buy {
        SignalDecision::Buy
    } else if score < thresholds.sell {
        SignalDecision::Sell
    } else {
        SignalDecision::Hold
    }
}
