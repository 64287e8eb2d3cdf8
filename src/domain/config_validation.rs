//! Configuration validation.
//!
//! Runs before any simulation work. Every failure names the INI section and
//! key it corresponds to.

use crate::domain::backtest::BacktestConfig;
use crate::domain::ensemble::EnsembleConfig;
use crate::domain::error::QuantsimError;
use crate::domain::indicator::IndicatorParams;

pub fn validate_backtest_config(config: &BacktestConfig) -> Result<(), QuantsimError> {
    validate_initial_capital(config)?;
    validate_fee(config)?;
    validate_stop_loss(config)?;
    validate_take_profit(config)?;
    validate_fixed_size(config)?;
    validate_periods_per_year(config)?;
    validate_indicator_params(&config.indicators)?;
    validate_ensemble_config(&config.ensemble)?;
    Ok(())
}

fn validate_initial_capital(config: &BacktestConfig) -> Result<(), QuantsimError> {
    if !config.initial_capital.is_finite() || config.initial_capital <= 0.0 {
        return Err(QuantsimError::invalid(
            "backtest",
            "initial_capital",
            "initial_capital must be positive",
        ));
    }
    Ok(())
}

fn validate_fee(config: &BacktestConfig) -> Result<(), QuantsimError> {
    if !(0.0..1.0).contains(&config.fee_pct) {
        return Err(QuantsimError::invalid(
            "backtest",
            "fee_pct",
            "fee_pct must be in [0, 1)",
        ));
    }
    Ok(())
}

fn validate_stop_loss(config: &BacktestConfig) -> Result<(), QuantsimError> {
    match config.stop_loss {
        Some(sl) if !(sl > 0.0 && sl < 1.0) => Err(QuantsimError::invalid(
            "backtest",
            "stop_loss",
            "stop_loss must be a fraction in (0, 1)",
        )),
        _ => Ok(()),
    }
}

fn validate_take_profit(config: &BacktestConfig) -> Result<(), QuantsimError> {
    match config.take_profit {
        Some(tp) if !(tp > 0.0 && tp.is_finite()) => Err(QuantsimError::invalid(
            "backtest",
            "take_profit",
            "take_profit must be a positive fraction",
        )),
        _ => Ok(()),
    }
}

fn validate_fixed_size(config: &BacktestConfig) -> Result<(), QuantsimError> {
    match config.fixed_size {
        Some(f) if !(f > 0.0 && f <= 1.0) => Err(QuantsimError::invalid(
            "backtest",
            "fixed_size",
            "fixed_size must be in (0, 1]",
        )),
        _ => Ok(()),
    }
}

fn validate_periods_per_year(config: &BacktestConfig) -> Result<(), QuantsimError> {
    if !config.periods_per_year.is_finite() || config.periods_per_year <= 0.0 {
        return Err(QuantsimError::invalid(
            "backtest",
            "periods_per_year",
            "periods_per_year must be positive",
        ));
    }
    Ok(())
}

pub fn validate_indicator_params(params: &IndicatorParams) -> Result<(), QuantsimError> {
    let positive = [
        ("ma_short", params.ma_short),
        ("rsi_period", params.rsi_period),
        ("macd_fast", params.macd_fast),
        ("macd_signal", params.macd_signal),
        ("bb_period", params.bb_period),
    ];
    for (key, value) in positive {
        if value == 0 {
            return Err(QuantsimError::invalid(
                "indicators",
                key,
                format!("{} must be positive", key),
            ));
        }
    }
    if params.ma_long <= params.ma_short {
        return Err(QuantsimError::invalid(
            "indicators",
            "ma_long",
            "ma_long must be greater than ma_short",
        ));
    }
    if params.macd_slow <= params.macd_fast {
        return Err(QuantsimError::invalid(
            "indicators",
            "macd_slow",
            "macd_slow must be greater than macd_fast",
        ));
    }
    if !params.bb_mult.is_finite() || params.bb_mult < 0.0 {
        return Err(QuantsimError::invalid(
            "indicators",
            "bb_mult",
            "bb_mult must be non-negative",
        ));
    }
    Ok(())
}

pub fn validate_ensemble_config(config: &EnsembleConfig) -> Result<(), QuantsimError> {
    let weights = [
        ("weight_momentum", config.weights.momentum),
        ("weight_ma", config.weights.ma),
        ("weight_volatility", config.weights.volatility),
    ];
    for (key, value) in weights {
        if !value.is_finite() {
            return Err(QuantsimError::invalid(
                "ensemble",
                key,
                format!("{} must be finite", key),
            ));
        }
    }
    let thresholds = &config.thresholds;
    if !thresholds.buy.is_finite() || !thresholds.sell.is_finite() {
        return Err(QuantsimError::invalid(
            "ensemble",
            "buy_threshold",
            "thresholds must be finite",
        ));
    }
    if thresholds.sell > thresholds.buy {
        return Err(QuantsimError::invalid(
            "ensemble",
            "sell_threshold",
            "sell_threshold must not exceed buy_threshold",
        ));
    }
    if !config.momentum_threshold_pct.is_finite() || config.momentum_threshold_pct < 0.0 {
        return Err(QuantsimError::invalid(
            "ensemble",
            "momentum_threshold_pct",
            "momentum_threshold_pct must be non-negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ensemble::EnsembleThresholds;

    fn assert_invalid_key(result: Result<(), QuantsimError>, expected: &str) {
        match result {
            Err(QuantsimError::ConfigInvalid { key, .. }) => assert_eq!(key, expected),
            other => panic!("expected ConfigInvalid for {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_backtest_config(&BacktestConfig::default()).is_ok());
    }

    #[test]
    fn rejects_non_positive_capital() {
        let config = BacktestConfig {
            initial_capital: 0.0,
            ..BacktestConfig::default()
        };
        assert_invalid_key(validate_backtest_config(&config), "initial_capital");
    }

    #[test]
    fn rejects_negative_fee() {
        let config = BacktestConfig {
            fee_pct: -0.01,
            ..BacktestConfig::default()
        };
        assert_invalid_key(validate_backtest_config(&config), "fee_pct");
    }

    #[test]
    fn rejects_fee_of_one() {
        let config = BacktestConfig {
            fee_pct: 1.0,
            ..BacktestConfig::default()
        };
        assert_invalid_key(validate_backtest_config(&config), "fee_pct");
    }

    #[test]
    fn rejects_out_of_range_fractions() {
        let config = BacktestConfig {
            stop_loss: Some(1.5),
            ..BacktestConfig::default()
        };
        assert_invalid_key(validate_backtest_config(&config), "stop_loss");

        let config = BacktestConfig {
            take_profit: Some(-0.1),
            ..BacktestConfig::default()
        };
        assert_invalid_key(validate_backtest_config(&config), "take_profit");

        let config = BacktestConfig {
            fixed_size: Some(0.0),
            ..BacktestConfig::default()
        };
        assert_invalid_key(validate_backtest_config(&config), "fixed_size");

        let config = BacktestConfig {
            fixed_size: Some(1.0),
            ..BacktestConfig::default()
        };
        assert!(validate_backtest_config(&config).is_ok());
    }

    #[test]
    fn rejects_short_window_not_below_long() {
        let mut config = BacktestConfig::default();
        config.indicators.ma_short = 20;
        config.indicators.ma_long = 20;
        assert_invalid_key(validate_backtest_config(&config), "ma_long");
    }

    #[test]
    fn rejects_zero_windows() {
        let mut config = BacktestConfig::default();
        config.indicators.rsi_period = 0;
        assert_invalid_key(validate_backtest_config(&config), "rsi_period");
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let mut config = BacktestConfig::default();
        config.ensemble.thresholds = EnsembleThresholds {
            buy: -0.5,
            sell: 0.5,
        };
        assert_invalid_key(validate_backtest_config(&config), "sell_threshold");
    }

    #[test]
    fn rejects_nan_weight() {
        let mut config = BacktestConfig::default();
        config.ensemble.weights.ma = f64::NAN;
        assert_invalid_key(validate_backtest_config(&config), "weight_ma");
    }

    #[test]
    fn rejects_zero_periods_per_year() {
        let config = BacktestConfig {
            periods_per_year: 0.0,
            ..BacktestConfig::default()
        };
        assert_invalid_key(validate_backtest_config(&config), "periods_per_year");
    }
}
