//! Performance metrics over an equity curve and realized trade P&Ls.
//!
//! Output precision is fixed so reports compare exactly:
//! return and CAGR to 6 decimals, Sharpe and drawdown to 4, win rate to 2.

use serde::{Deserialize, Serialize};

use super::indicator::{mean, sample_stddev};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Lower bound on the CAGR horizon, in years.
const MIN_YEARS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub total_return_pct: f64,
    pub cagr_pct: f64,
    pub sharpe: f64,
    pub max_drawdown_pct: f64,
    pub win_rate_pct: f64,
}

impl Metrics {
    pub fn compute(
        equity_curve: &[f64],
        initial_capital: f64,
        trade_pnls: &[f64],
        periods_per_year: f64,
    ) -> Self {
        let Some(&last) = equity_curve.last() else {
            return Metrics {
                win_rate_pct: round_to(win_rate(trade_pnls), 2),
                ..Metrics::default()
            };
        };

        let growth = if initial_capital > 0.0 {
            last / initial_capital
        } else {
            1.0
        };
        let total_return = (growth - 1.0) * 100.0;

        let years = equity_curve.len() as f64 / periods_per_year;
        let cagr = if years > 0.0 {
            (growth.powf(1.0 / years.max(MIN_YEARS)) - 1.0) * 100.0
        } else {
            0.0
        };

        Metrics {
            total_return_pct: round_to(total_return, 6),
            cagr_pct: round_to(saturate(cagr), 6),
            sharpe: round_to(sharpe_ratio(equity_curve, periods_per_year), 4),
            max_drawdown_pct: round_to(max_drawdown(equity_curve) * 100.0, 4),
            win_rate_pct: round_to(win_rate(trade_pnls), 2),
        }
    }
}

/// Period-over-period fractional changes; the first entry is 0.
pub fn step_returns(equity_curve: &[f64]) -> Vec<f64> {
    if equity_curve.is_empty() {
        return Vec::new();
    }
    let mut returns = Vec::with_capacity(equity_curve.len());
    returns.push(0.0);
    returns.extend(equity_curve.windows(2).map(|w| {
        let (prev, curr) = (w[0], w[1]);
        if prev == 0.0 { 0.0 } else { (curr - prev) / prev }
    }));
    returns
}

/// mean / sample stddev of step returns, annualized. 0 when the stddev is 0.
pub fn sharpe_ratio(equity_curve: &[f64], periods_per_year: f64) -> f64 {
    let returns = step_returns(equity_curve);
    let sd = sample_stddev(&returns);
    if sd == 0.0 || !sd.is_finite() {
        return 0.0;
    }
    mean(&returns) / sd * periods_per_year.sqrt()
}

/// Minimum of (value − running_max) / running_max; a fraction ≤ 0.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    let mut running_max = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &value in equity_curve {
        running_max = running_max.max(value);
        if running_max > 0.0 {
            worst = worst.min((value - running_max) / running_max);
        }
    }
    worst
}

/// Percentage of closed trades with P&L > 0; breakeven counts as a loss.
pub fn win_rate(trade_pnls: &[f64]) -> f64 {
    let wins = trade_pnls.iter().filter(|&&p| p > 0.0).count();
    let losses = trade_pnls.len() - wins;
    wins as f64 / (wins + losses).max(1) as f64 * 100.0
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Overflow saturates at the largest finite value, keeping the sign.
fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}
