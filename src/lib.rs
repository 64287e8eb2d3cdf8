//! quantsim — single-asset trading signal engine and backtester.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The [`cli`] module wires them
//! together for the `quantsim` binary.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
