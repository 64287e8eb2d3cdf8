//! Technical indicator implementations.
//!
//! Each calculator takes a slice of closes and returns an [`IndicatorSeries`]
//! aligned 1:1 with the input. Indices where the rolling window is not yet
//! full carry `None`; [`frame::IndicatorFrame`] owns the fill policy.

pub mod bollinger;
pub mod ema;
pub mod frame;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use bollinger::{calculate_bollinger, BollingerBands};
pub use ema::calculate_ema;
pub use frame::{IndicatorFrame, IndicatorKind, IndicatorParams, IndicatorRow, NEUTRAL_RSI};
pub use macd::{calculate_macd, MacdLines};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stddev::{mean, sample_stddev};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    MacdSignal {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    BollingerUpper {
        period: usize,
        stddev_mult: f64,
    },
    BollingerMiddle {
        period: usize,
        stddev_mult: f64,
    },
    BollingerLower {
        period: usize,
        stddev_mult: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn empty(indicator_type: IndicatorType, len: usize) -> Self {
        IndicatorSeries {
            indicator_type,
            values: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Index of the first computed value, if any.
    pub fn first_valid(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::MacdSignal { fast, slow, signal } => {
                write!(f, "MACD_SIGNAL({},{},{})", fast, slow, signal)
            }
            IndicatorType::BollingerUpper {
                period,
                stddev_mult,
            } => write!(f, "BB_UPPER({},{})", period, stddev_mult),
            IndicatorType::BollingerMiddle {
                period,
                stddev_mult,
            } => write!(f, "BB_MIDDLE({},{})", period, stddev_mult),
            IndicatorType::BollingerLower {
                period,
                stddev_mult,
            } => write!(f, "BB_LOWER({},{})", period, stddev_mult),
        }
    }
}
