#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use quantsim::domain::backtest::BacktestConfig;
use quantsim::domain::error::QuantsimError;
use quantsim::domain::indicator::IndicatorParams;
use quantsim::domain::price_series::{PricePoint, PriceSeries};
use quantsim::domain::strategy::SignalPolicy;
use quantsim::ports::data_port::PriceSource;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory price source keyed by `(symbol, interval)`.
pub struct MockPriceSource {
    pub data: HashMap<(String, String), Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
    pub fetches: RefCell<Vec<(String, String, Option<usize>)>>,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            fetches: RefCell::new(Vec::new()),
        }
    }

    pub fn with_closes(mut self, symbol: &str, interval: &str, closes: &[f64]) -> Self {
        self.data.insert(
            (symbol.to_string(), interval.to_string()),
            make_points(closes),
        );
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PriceSource for MockPriceSource {
    fn fetch(
        &self,
        symbol: &str,
        interval: &str,
        limit: Option<usize>,
    ) -> Result<PriceSeries, QuantsimError> {
        self.fetches
            .borrow_mut()
            .push((symbol.to_string(), interval.to_string(), limit));
        if let Some(reason) = self.errors.get(symbol) {
            return Err(QuantsimError::DataSource {
                reason: reason.clone(),
            });
        }
        let Some(points) = self.data.get(&(symbol.to_string(), interval.to_string())) else {
            return Err(QuantsimError::NoData {
                symbol: symbol.to_string(),
                interval: interval.to_string(),
            });
        };
        let skip = limit.map_or(0, |l| points.len().saturating_sub(l));
        PriceSeries::with_timestamps(points[skip..].to_vec())
    }

    fn list_symbols(&self, interval: &str) -> Result<Vec<String>, QuantsimError> {
        let mut symbols: Vec<String> = self
            .data
            .keys()
            .filter(|(_, i)| i == interval)
            .map(|(s, _)| s.clone())
            .collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn start_time() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

/// Daily points starting at [`start_time`].
pub fn make_points(closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            timestamp: start_time() + Duration::days(i as i64),
            close,
        })
        .collect()
}

/// The ten-bar pattern repeated three times.
pub fn cycle_closes() -> Vec<f64> {
    let base = [100.0, 102.0, 101.0, 105.0, 99.0, 110.0, 108.0, 120.0, 90.0, 95.0];
    base.iter().cycle().take(30).copied().collect()
}

pub fn cycle_series() -> PriceSeries {
    PriceSeries::new(cycle_closes()).unwrap()
}

/// Linear ramp from `start`, moving by `step` per bar.
pub fn ramp(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

pub fn short_window_config(policy: SignalPolicy) -> BacktestConfig {
    BacktestConfig {
        fee_pct: 0.0,
        policy,
        indicators: IndicatorParams {
            ma_short: 2,
            ma_long: 5,
            ..IndicatorParams::default()
        },
        ..BacktestConfig::default()
    }
}
