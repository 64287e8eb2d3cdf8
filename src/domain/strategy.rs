//! Signal policy selection.
//!
//! The simulator asks a [`SignalPolicy`] for a decision at each step. The set
//! of policies is closed and chosen by configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ensemble::{self, EnsembleConfig, EnsembleResult};
use super::indicator::{IndicatorFrame, IndicatorKind, IndicatorParams, IndicatorRow};
use super::signal::SignalDecision;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalPolicy {
    /// Buy when short MA > long MA and RSI < 70; sell when short MA < long MA
    /// and RSI > 30.
    IndicatorThreshold,
    /// Weighted vote of momentum, MA crossover and volatility.
    #[default]
    Ensemble,
}

impl SignalPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            SignalPolicy::IndicatorThreshold => "indicator_threshold",
            SignalPolicy::Ensemble => "ensemble",
        }
    }

    /// Decision at step `index`, using only closes `0..=index` and frame
    /// values that were genuinely computed by then.
    pub fn decide(
        &self,
        history: &[f64],
        frame: &IndicatorFrame,
        index: usize,
        params: &IndicatorParams,
        ensemble_config: &EnsembleConfig,
    ) -> SignalDecision {
        match self {
            SignalPolicy::IndicatorThreshold => {
                const REQUIRED: [IndicatorKind; 3] =
                    [IndicatorKind::MaShort, IndicatorKind::MaLong, IndicatorKind::Rsi];
                if !frame.is_warm(&REQUIRED, index) {
                    return SignalDecision::Hold;
                }
                frame
                    .row(index)
                    .map(|row| indicator_threshold_signal(&row))
                    .unwrap_or(SignalDecision::Hold)
            }
            SignalPolicy::Ensemble => {
                evaluate_ensemble(history, params, ensemble_config).decision
            }
        }
    }
}

impl fmt::Display for SignalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indicator_threshold" | "threshold" | "simple" => Ok(SignalPolicy::IndicatorThreshold),
            "ensemble" | "weighted" => Ok(SignalPolicy::Ensemble),
            other => Err(format!(
                "unknown signal policy '{}', expected 'ensemble' or 'indicator_threshold'",
                other
            )),
        }
    }
}

pub fn indicator_threshold_signal(row: &IndicatorRow) -> SignalDecision {
    if row.ma_short > row.ma_long && row.rsi < RSI_OVERBOUGHT {
        SignalDecision::Buy
    } else if row.ma_short < row.ma_long && row.rsi > RSI_OVERSOLD {
        SignalDecision::Sell
    } else {
        SignalDecision::Hold
    }
}

/// Ensemble result for a raw price history, using the configured MA windows.
pub fn evaluate_ensemble(
    history: &[f64],
    params: &IndicatorParams,
    config: &EnsembleConfig,
) -> EnsembleResult {
    ensemble::evaluate(history, params.ma_short, params.ma_long, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::PriceSeries;

    fn row(ma_short: f64, ma_long: f64, rsi: f64) -> IndicatorRow {
        IndicatorRow {
            ma_short,
            ma_long,
            rsi,
            macd: 0.0,
            macd_signal: 0.0,
            bb_high: 0.0,
            bb_low: 0.0,
        }
    }

    #[test]
    fn threshold_buy() {
        assert_eq!(indicator_threshold_signal(&row(11.0, 10.0, 50.0)), SignalDecision::Buy);
    }

    #[test]
    fn threshold_overbought_blocks_buy() {
        assert_eq!(indicator_threshold_signal(&row(11.0, 10.0, 75.0)), SignalDecision::Hold);
    }

    #[test]
    fn threshold_sell() {
        assert_eq!(indicator_threshold_signal(&row(9.0, 10.0, 50.0)), SignalDecision::Sell);
    }

    #[test]
    fn threshold_oversold_blocks_sell() {
        assert_eq!(indicator_threshold_signal(&row(9.0, 10.0, 25.0)), SignalDecision::Hold);
    }

    #[test]
    fn threshold_equal_mas_hold() {
        assert_eq!(indicator_threshold_signal(&row(10.0, 10.0, 50.0)), SignalDecision::Hold);
    }

    #[test]
    fn policy_from_str() {
        assert_eq!("ensemble".parse::<SignalPolicy>(), Ok(SignalPolicy::Ensemble));
        assert_eq!(
            "Indicator_Threshold".parse::<SignalPolicy>(),
            Ok(SignalPolicy::IndicatorThreshold)
        );
        assert!("martingale".parse::<SignalPolicy>().is_err());
    }

    #[test]
    fn policy_display_round_trips() {
        for policy in [SignalPolicy::Ensemble, SignalPolicy::IndicatorThreshold] {
            assert_eq!(policy.to_string().parse::<SignalPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn threshold_policy_holds_before_warmup() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let series = PriceSeries::new(closes).unwrap();
        let params = IndicatorParams {
            ma_short: 2,
            ma_long: 5,
            rsi_period: 3,
            ..IndicatorParams::default()
        };
        let frame = IndicatorFrame::compute(&series, &params);
        let ensemble = EnsembleConfig::default();
        let policy = SignalPolicy::IndicatorThreshold;

        // filled values show short > long from index 0, but nothing is warm
        for i in 0..4 {
            let decision = policy.decide(series.history(i), &frame, i, &params, &ensemble);
            assert_eq!(decision, SignalDecision::Hold, "index {}", i);
        }
    }
}
