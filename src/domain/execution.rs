//! Trade execution: entries, exits, fees and stop/take-profit triggers.
//!
//! Fees are a fraction of the traded amount. On entry the fee reduces the
//! quantity received; on exit it reduces the proceeds.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::portfolio::Portfolio;
use super::position::{Position, Trade, TradeKind, TradeReason};

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    /// Fee fraction in [0, 1).
    pub fee_pct: f64,
    /// Fraction of cash deployed per entry; `None` deploys all cash.
    pub fixed_size: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            fee_pct: 0.0,
            fixed_size: None,
            stop_loss: None,
            take_profit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryResult {
    Entered { quantity: f64, spend: f64 },
    AlreadyHolding,
    InsufficientCapital,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExitResult {
    Exited { proceeds: f64, pnl: f64 },
    NoPosition,
}

/// Opens a long position at `price`.
///
/// spend = cash × fixed_size (or all cash), quantity = spend / price × (1 − fee).
pub fn enter_long(
    portfolio: &mut Portfolio,
    price: f64,
    step_index: usize,
    timestamp: Option<DateTime<Utc>>,
    config: &ExecutionConfig,
) -> EntryResult {
    if portfolio.position.is_some() {
        return EntryResult::AlreadyHolding;
    }
    if portfolio.cash <= 0.0 || price <= 0.0 {
        return EntryResult::InsufficientCapital;
    }

    let spend = match config.fixed_size {
        Some(fraction) => portfolio.cash * fraction,
        None => portfolio.cash,
    };
    let quantity = (spend / price) * (1.0 - config.fee_pct);
    if quantity <= 0.0 || !quantity.is_finite() {
        return EntryResult::InsufficientCapital;
    }

    portfolio.cash = (portfolio.cash - spend).max(0.0);
    portfolio.position = Some(Position {
        quantity,
        entry_price: price,
        entry_index: step_index,
        committed_cash: spend,
    });
    portfolio.record_trade(Trade {
        kind: TradeKind::Buy,
        price,
        step_index,
        quantity,
        reason: TradeReason::Signal,
        timestamp,
    });
    debug!(step = step_index, price, quantity, spend, "entered long");

    EntryResult::Entered { quantity, spend }
}

/// Closes the open position at `price` and records its realized P&L
/// against the cash committed on entry.
pub fn exit_long(
    portfolio: &mut Portfolio,
    price: f64,
    step_index: usize,
    timestamp: Option<DateTime<Utc>>,
    reason: TradeReason,
    config: &ExecutionConfig,
) -> ExitResult {
    let Some(position) = portfolio.position.take() else {
        return ExitResult::NoPosition;
    };

    let proceeds = position.quantity * price * (1.0 - config.fee_pct);
    let pnl = proceeds - position.committed_cash;
    portfolio.cash += proceeds;
    portfolio.record_pnl(pnl);
    portfolio.record_trade(Trade {
        kind: TradeKind::Sell,
        price,
        step_index,
        quantity: position.quantity,
        reason,
        timestamp,
    });
    debug!(step = step_index, price, proceeds, pnl, %reason, "exited long");

    ExitResult::Exited { proceeds, pnl }
}

/// Stop-loss is checked before take-profit.
pub fn check_exit_triggers(
    portfolio: &Portfolio,
    price: f64,
    config: &ExecutionConfig,
) -> Option<TradeReason> {
    let position = portfolio.position.as_ref()?;
    if position.should_stop_loss(price, config.stop_loss) {
        Some(TradeReason::StopLoss)
    } else if position.should_take_profit(price, config.take_profit) {
        Some(TradeReason::TakeProfit)
    } else {
        None
    }
}
