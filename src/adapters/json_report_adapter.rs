//! JSON report adapter implementing ReportPort.
//!
//! The document is the flat report object plus the policy that produced it.

use serde::Serialize;

use crate::domain::backtest::{BacktestConfig, BacktestReport};
use crate::domain::error::QuantsimError;
use crate::domain::strategy::SignalPolicy;
use crate::ports::report_port::ReportPort;

#[derive(Serialize)]
struct JsonReport<'a> {
    policy: SignalPolicy,
    #[serde(flatten)]
    report: &'a BacktestReport,
}

#[derive(Debug)]
pub struct JsonReportAdapter {
    pretty: bool,
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(
        &self,
        report: &BacktestReport,
        config: &BacktestConfig,
        output_path: &str,
    ) -> Result<(), QuantsimError> {
        let json = self.render(report, config)?;
        super::write_output(output_path, &json)
    }

    fn render(
        &self,
        report: &BacktestReport,
        config: &BacktestConfig,
    ) -> Result<String, QuantsimError> {
        let doc = JsonReport {
            policy: config.policy,
            report,
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(json)
    }
}
