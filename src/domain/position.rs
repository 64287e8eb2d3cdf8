//! Open position and trade log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A long position. At most one is open at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub quantity: f64,
    pub entry_price: f64,
    pub entry_index: usize,
    /// Cash spent to open the position, fee included. Cost basis for P&L.
    pub committed_cash: f64,
}

impl Position {
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    /// `stop_loss` is a fraction below entry, e.g. 0.05.
    pub fn should_stop_loss(&self, price: f64, stop_loss: Option<f64>) -> bool {
        match stop_loss {
            Some(sl) if sl > 0.0 => price <= self.entry_price * (1.0 - sl),
            _ => false,
        }
    }

    /// `take_profit` is a fraction above entry, e.g. 0.10.
    pub fn should_take_profit(&self, price: f64, take_profit: Option<f64>) -> bool {
        match take_profit {
            Some(tp) if tp > 0.0 => price >= self.entry_price * (1.0 + tp),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    Buy,
    Sell,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Buy => write!(f, "buy"),
            TradeKind::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeReason {
    Signal,
    StopLoss,
    TakeProfit,
}

impl fmt::Display for TradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeReason::Signal => write!(f, "signal"),
            TradeReason::StopLoss => write!(f, "stop_loss"),
            TradeReason::TakeProfit => write!(f, "take_profit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub kind: TradeKind,
    pub price: f64,
    pub step_index: usize,
    pub quantity: f64,
    pub reason: TradeReason,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_position() -> Position {
        Position {
            quantity: 10.0,
            entry_price: 100.0,
            entry_index: 3,
            committed_cash: 1000.0,
        }
    }

    #[test]
    fn market_value() {
        let pos = sample_position();
        assert!((pos.market_value(110.0) - 1100.0).abs() < f64::EPSILON);
        assert_eq!(pos.market_value(0.0), 0.0);
    }

    #[test]
    fn stop_loss_triggered() {
        let pos = sample_position();
        assert!(pos.should_stop_loss(94.0, Some(0.05)));
        assert!(!pos.should_stop_loss(96.0, Some(0.05)));
    }

    #[test]
    fn stop_loss_disabled() {
        let pos = sample_position();
        assert!(!pos.should_stop_loss(0.0, None));
        assert!(!pos.should_stop_loss(0.0, Some(0.0)));
    }

    #[test]
    fn take_profit_triggered() {
        let pos = sample_position();
        assert!(pos.should_take_profit(111.0, Some(0.10)));
        assert!(!pos.should_take_profit(109.0, Some(0.10)));
    }

    #[test]
    fn take_profit_disabled() {
        let pos = sample_position();
        assert!(!pos.should_take_profit(1_000_000.0, None));
    }

    #[test]
    fn trade_serializes_flat() {
        let trade = Trade {
            kind: TradeKind::Sell,
            price: 94.0,
            step_index: 7,
            quantity: 10.0,
            reason: TradeReason::StopLoss,
            timestamp: None,
        };
        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["kind"], "sell");
        assert_eq!(json["reason"], "stop_loss");
        assert_eq!(json["step_index"], 7);
        assert!(json.get("timestamp").is_none());
    }
}
