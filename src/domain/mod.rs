//! Core domain types and logic: prices, indicators, signals and simulation.

pub mod price_series;
pub mod indicator;
pub mod signal;
pub mod ensemble;
pub mod strategy;
pub mod position;
pub mod portfolio;
pub mod execution;
pub mod backtest;
pub mod metrics;
pub mod config_validation;
pub mod error;
