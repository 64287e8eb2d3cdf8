//! Closing-price series, the shared engine input.
//!
//! Prices are validated once at construction. Everything downstream assumes
//! finite, non-negative closes in chronological order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::QuantsimError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    closes: Vec<f64>,
    timestamps: Option<Vec<DateTime<Utc>>>,
}

impl PriceSeries {
    pub fn new(closes: Vec<f64>) -> Result<Self, QuantsimError> {
        validate_closes(&closes)?;
        Ok(PriceSeries {
            closes,
            timestamps: None,
        })
    }

    /// Builds a series from timestamped points, sorted by timestamp.
    pub fn with_timestamps(mut points: Vec<PricePoint>) -> Result<Self, QuantsimError> {
        points.sort_by_key(|p| p.timestamp);
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        validate_closes(&closes)?;
        Ok(PriceSeries {
            closes,
            timestamps: Some(points.iter().map(|p| p.timestamp).collect()),
        })
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn close(&self, index: usize) -> Option<f64> {
        self.closes.get(index).copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    pub fn timestamp(&self, index: usize) -> Option<DateTime<Utc>> {
        self.timestamps.as_ref().and_then(|ts| ts.get(index).copied())
    }

    /// Closes `0..=index`: everything observable at step `index`.
    pub fn history(&self, index: usize) -> &[f64] {
        let end = (index + 1).min(self.closes.len());
        &self.closes[..end]
    }

    /// Arithmetic mean of all closes, 0 for an empty series.
    pub fn mean(&self) -> f64 {
        if self.closes.is_empty() {
            0.0
        } else {
            self.closes.iter().sum::<f64>() / self.closes.len() as f64
        }
    }
}

fn validate_closes(closes: &[f64]) -> Result<(), QuantsimError> {
    match closes
        .iter()
        .enumerate()
        .find(|(_, c)| !c.is_finite() || **c < 0.0)
    {
        Some((index, &value)) => Err(QuantsimError::InvalidPrice { index, value }),
        None => Ok(()),
    }
}
