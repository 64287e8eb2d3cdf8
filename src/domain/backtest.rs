//! Backtest engine and event loop.
//!
//! [`BacktestConfig`] holds every parameter of a run. [`run_backtest`] walks
//! the price series once, in order, and produces a [`BacktestReport`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config_validation::validate_backtest_config;
use super::ensemble::{EnsembleConfig, EnsembleResult};
use super::error::QuantsimError;
use super::execution::{self, ExecutionConfig};
use super::indicator::{IndicatorFrame, IndicatorParams};
use super::metrics::{self, Metrics, TRADING_DAYS_PER_YEAR};
use super::portfolio::Portfolio;
use super::position::{Trade, TradeReason};
use super::price_series::PriceSeries;
use super::signal::SignalDecision;
use super::strategy::{evaluate_ensemble, SignalPolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub fee_pct: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub fixed_size: Option<f64>,
    pub policy: SignalPolicy,
    pub indicators: IndicatorParams,
    pub ensemble: EnsembleConfig,
    pub periods_per_year: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: 1000.0,
            fee_pct: 0.001,
            stop_loss: None,
            take_profit: None,
            fixed_size: None,
            policy: SignalPolicy::default(),
            indicators: IndicatorParams::default(),
            ensemble: EnsembleConfig::default(),
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl BacktestConfig {
    pub fn execution_config(&self) -> ExecutionConfig {
        ExecutionConfig {
            fee_pct: self.fee_pct,
            fixed_size: self.fixed_size,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub initial_capital: f64,
    pub final_value: f64,
    pub equity_curve: Vec<f64>,
    pub trades: Vec<Trade>,
    pub trade_pnls: Vec<f64>,
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl BacktestReport {
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }
}

/// Runs one simulation over `series`.
///
/// Each step: forced exits (stop-loss, then take-profit), then the policy
/// decision, then the valuation at the step's close. A position closed by a
/// forced exit may be re-entered on the same step.
pub fn run_backtest(
    series: &PriceSeries,
    config: &BacktestConfig,
) -> Result<BacktestReport, QuantsimError> {
    validate_backtest_config(config)?;

    if series.is_empty() {
        info!("empty price series, nothing to simulate");
        return Ok(BacktestReport {
            initial_capital: config.initial_capital,
            final_value: config.initial_capital,
            equity_curve: Vec::new(),
            trades: Vec::new(),
            trade_pnls: Vec::new(),
            metrics: Metrics::default(),
        });
    }

    let frame = IndicatorFrame::compute(series, &config.indicators);
    let exec = config.execution_config();
    let mut portfolio = Portfolio::new(config.initial_capital);

    info!(
        steps = series.len(),
        policy = %config.policy,
        initial_capital = config.initial_capital,
        "starting backtest"
    );

    for (index, &price) in series.closes().iter().enumerate() {
        let timestamp = series.timestamp(index);
        step(
            &mut portfolio,
            series,
            &frame,
            config,
            &exec,
            index,
            price,
            timestamp,
        );
    }

    let last_price = series.last().unwrap_or(0.0);
    let final_value = metrics::round_to(portfolio.total_equity(last_price), 6);
    let metrics = Metrics::compute(
        &portfolio.equity_curve,
        config.initial_capital,
        &portfolio.trade_pnls,
        config.periods_per_year,
    );

    info!(
        final_value,
        trades = portfolio.trades.len(),
        total_return_pct = metrics.total_return_pct,
        "backtest complete"
    );

    Ok(BacktestReport {
        initial_capital: config.initial_capital,
        final_value,
        equity_curve: portfolio.equity_curve,
        trades: portfolio.trades,
        trade_pnls: portfolio.trade_pnls,
        metrics,
    })
}

/// Ensemble result for a raw price list, as of its last element.
pub fn evaluate_signal(
    prices: &[f64],
    config: &BacktestConfig,
) -> Result<EnsembleResult, QuantsimError> {
    validate_backtest_config(config)?;
    let series = PriceSeries::new(prices.to_vec())?;
    Ok(evaluate_ensemble(
        series.closes(),
        &config.indicators,
        &config.ensemble,
    ))
}

#[allow(clippy::too_many_arguments)]
fn step(
    portfolio: &mut Portfolio,
    series: &PriceSeries,
    frame: &IndicatorFrame,
    config: &BacktestConfig,
    exec: &ExecutionConfig,
    index: usize,
    price: f64,
    timestamp: Option<DateTime<Utc>>,
) {
    if let Some(reason) = execution::check_exit_triggers(portfolio, price, exec) {
        execution::exit_long(portfolio, price, index, timestamp, reason, exec);
    }

    let decision = config.policy.decide(
        series.history(index),
        frame,
        index,
        &config.indicators,
        &config.ensemble,
    );
    debug!(step = index, price, %decision, "signal");

    match decision {
        SignalDecision::Buy => {
            execution::enter_long(portfolio, price, index, timestamp, exec);
        }
        SignalDecision::Sell => {
            execution::exit_long(portfolio, price, index, timestamp, TradeReason::Signal, exec);
        }
        SignalDecision::Hold => {}
    }

    let equity = portfolio.total_equity(price);
    portfolio.record_equity(equity);
}
