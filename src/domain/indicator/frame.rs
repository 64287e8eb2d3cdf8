//! Indicator frame: every indicator the engine uses, aligned to the series.
//!
//! Columns are computed independently (in parallel), then gap-filled once:
//! back-fill from the first computed value, then forward-fill. A column with
//! no computed value at all gets a constant fallback. The index of the first
//! genuinely computed value is kept so callers can refuse to act on filled
//! values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::indicator::{
    calculate_bollinger, calculate_macd, calculate_rsi, calculate_sma, IndicatorSeries,
};
use crate::domain::price_series::PriceSeries;

/// RSI used when the series is too short to compute any value.
pub const NEUTRAL_RSI: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub ma_short: usize,
    pub ma_long: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_period: usize,
    pub bb_mult: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        IndicatorParams {
            ma_short: 5,
            ma_long: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_mult: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorKind {
    MaShort,
    MaLong,
    Rsi,
    Macd,
    MacdSignal,
    BbHigh,
    BbLow,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 7] = [
        IndicatorKind::MaShort,
        IndicatorKind::MaLong,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::MacdSignal,
        IndicatorKind::BbHigh,
        IndicatorKind::BbLow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::MaShort => "ma_short",
            IndicatorKind::MaLong => "ma_long",
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::Macd => "macd",
            IndicatorKind::MacdSignal => "macd_signal",
            IndicatorKind::BbHigh => "bb_high",
            IndicatorKind::BbLow => "bb_low",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub ma_short: f64,
    pub ma_long: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub bb_high: f64,
    pub bb_low: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Column {
    values: Vec<f64>,
    warmup: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    len: usize,
    columns: BTreeMap<IndicatorKind, Column>,
}

impl IndicatorFrame {
    pub fn compute(series: &PriceSeries, params: &IndicatorParams) -> Self {
        let closes = series.closes();

        let ((ma_short, ma_long), (rsi, (macd, bands))) = rayon::join(
            || {
                rayon::join(
                    || calculate_sma(closes, params.ma_short),
                    || calculate_sma(closes, params.ma_long),
                )
            },
            || {
                rayon::join(
                    || calculate_rsi(closes, params.rsi_period),
                    || {
                        rayon::join(
                            || {
                                calculate_macd(
                                    closes,
                                    params.macd_fast,
                                    params.macd_slow,
                                    params.macd_signal,
                                )
                            },
                            || calculate_bollinger(closes, params.bb_period, params.bb_mult),
                        )
                    },
                )
            },
        );

        let price_mean = series.mean();
        let mut columns = BTreeMap::new();
        columns.insert(IndicatorKind::MaShort, fill(&ma_short, price_mean));
        columns.insert(IndicatorKind::MaLong, fill(&ma_long, price_mean));
        columns.insert(IndicatorKind::Rsi, fill(&rsi, NEUTRAL_RSI));
        columns.insert(IndicatorKind::Macd, fill(&macd.line, 0.0));
        columns.insert(IndicatorKind::MacdSignal, fill(&macd.signal, 0.0));
        columns.insert(IndicatorKind::BbHigh, fill(&bands.upper, price_mean));
        columns.insert(IndicatorKind::BbLow, fill(&bands.lower, price_mean));

        IndicatorFrame {
            len: closes.len(),
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column(&self, kind: IndicatorKind) -> &[f64] {
        self.columns
            .get(&kind)
            .map(|c| c.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn get(&self, kind: IndicatorKind, index: usize) -> Option<f64> {
        self.column(kind).get(index).copied()
    }

    /// First index whose value was computed rather than filled.
    pub fn warmup(&self, kind: IndicatorKind) -> Option<usize> {
        self.columns.get(&kind).and_then(|c| c.warmup)
    }

    /// True when every listed column holds a computed value at `index`.
    pub fn is_warm(&self, kinds: &[IndicatorKind], index: usize) -> bool {
        kinds
            .iter()
            .all(|&k| matches!(self.warmup(k), Some(w) if index >= w))
    }

    pub fn row(&self, index: usize) -> Option<IndicatorRow> {
        Some(IndicatorRow {
            ma_short: self.get(IndicatorKind::MaShort, index)?,
            ma_long: self.get(IndicatorKind::MaLong, index)?,
            rsi: self.get(IndicatorKind::Rsi, index)?,
            macd: self.get(IndicatorKind::Macd, index)?,
            macd_signal: self.get(IndicatorKind::MacdSignal, index)?,
            bb_high: self.get(IndicatorKind::BbHigh, index)?,
            bb_low: self.get(IndicatorKind::BbLow, index)?,
        })
    }
}

/// Back-fill then forward-fill in a single pass over the raw values.
fn fill(series: &IndicatorSeries, fallback: f64) -> Column {
    let Some(first) = series.first_valid() else {
        return Column {
            values: vec![fallback; series.len()],
            warmup: None,
        };
    };

    let mut values = Vec::with_capacity(series.len());
    let mut last = series.values[first].unwrap_or(fallback);
    for (i, raw) in series.values.iter().enumerate() {
        match raw {
            Some(v) if i >= first => {
                last = *v;
                values.push(*v);
            }
            _ => values.push(last),
        }
    }

    Column {
        values,
        warmup: Some(first),
    }
}
