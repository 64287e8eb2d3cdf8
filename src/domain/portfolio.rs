//! Portfolio state and equity tracking.
//!
//! The portfolio is either all cash or holding a single long position.

use serde::Serialize;

use super::position::{Position, Trade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioState {
    AllCash,
    Holding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub cash: f64,
    pub initial_capital: f64,
    pub position: Option<Position>,
    pub trades: Vec<Trade>,
    pub trade_pnls: Vec<f64>,
    pub equity_curve: Vec<f64>,
}

impl Portfolio {
    pub fn new(initial_capital: f64) -> Self {
        Portfolio {
            cash: initial_capital,
            initial_capital,
            position: None,
            trades: Vec::new(),
            trade_pnls: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    pub fn state(&self) -> PortfolioState {
        if self.position.is_some() {
            PortfolioState::Holding
        } else {
            PortfolioState::AllCash
        }
    }

    pub fn quantity(&self) -> f64 {
        self.position.as_ref().map_or(0.0, |p| p.quantity)
    }

    pub fn record_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub fn record_pnl(&mut self, pnl: f64) {
        self.trade_pnls.push(pnl);
    }

    pub fn record_equity(&mut self, equity: f64) {
        self.equity_curve.push(equity);
    }

    /// cash + quantity × price
    pub fn total_equity(&self, price: f64) -> f64 {
        self.cash
            + self
                .position
                .as_ref()
                .map_or(0.0, |p| p.market_value(price))
    }
}
