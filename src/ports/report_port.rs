//! Report generation port trait.

use crate::domain::backtest::{BacktestConfig, BacktestReport};
use crate::domain::error::QuantsimError;

/// Port for writing backtest reports.
pub trait ReportPort {
    fn write(
        &self,
        report: &BacktestReport,
        config: &BacktestConfig,
        output_path: &str,
    ) -> Result<(), QuantsimError>;

    /// Renders the report to a string without touching the filesystem.
    fn render(
        &self,
        report: &BacktestReport,
        config: &BacktestConfig,
    ) -> Result<String, QuantsimError>;
}
