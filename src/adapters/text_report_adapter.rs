//! Plain-text report adapter implementing ReportPort.
//!
//! Produces the console summary printed by `quantsim backtest`.

use std::fmt::Write as _;

use crate::domain::backtest::{BacktestConfig, BacktestReport};
use crate::domain::error::QuantsimError;
use crate::domain::position::{Trade, TradeKind};
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        report: &BacktestReport,
        config: &BacktestConfig,
        output_path: &str,
    ) -> Result<(), QuantsimError> {
        let text = self.render(report, config)?;
        super::write_output(output_path, &text)
    }

    fn render(
        &self,
        report: &BacktestReport,
        config: &BacktestConfig,
    ) -> Result<String, QuantsimError> {
        Ok(format_report(report, config))
    }
}

pub fn format_report(report: &BacktestReport, config: &BacktestConfig) -> String {
    let m = &report.metrics;
    let mut out = String::new();

    out.push_str("=== Backtest Results ===\n");
    let _ = writeln!(out, "Policy:           {}", config.policy);
    let _ = writeln!(out, "Steps:            {}", report.equity_curve.len());
    let _ = writeln!(out, "Initial Capital:  {:.2}", report.initial_capital);
    let _ = writeln!(out, "Final Value:      {:.2}", report.final_value);
    let _ = writeln!(out, "Total Return:     {:.2}%", m.total_return_pct);
    let _ = writeln!(out, "CAGR:             {:.2}%", m.cagr_pct);
    let _ = writeln!(out, "Sharpe Ratio:     {:.4}", m.sharpe);
    let _ = writeln!(out, "Max Drawdown:     {:.2}%", m.max_drawdown_pct);
    let _ = writeln!(out, "Trades:           {}", report.trade_count());
    let _ = writeln!(out, "Closed Trades:    {}", report.trade_pnls.len());
    let _ = writeln!(out, "Win Rate:         {:.2}%", m.win_rate_pct);

    out.push_str("\n=== Trade Log ===\n");
    out.push_str(&format_trade_log(&report.trades));
    out
}

pub fn format_trade_log(trades: &[Trade]) -> String {
    if trades.is_empty() {
        return "No trades executed.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>6}  {:<4}  {:>12}  {:>14}  {}",
        "#", "Step", "Side", "Price", "Quantity", "Reason"
    );
    for (i, trade) in trades.iter().enumerate() {
        let side = match trade.kind {
            TradeKind::Buy => "BUY",
            TradeKind::Sell => "SELL",
        };
        let _ = write!(
            out,
            "{:>4}  {:>6}  {:<4}  {:>12.4}  {:>14.6}  {}",
            i + 1,
            trade.step_index,
            side,
            trade.price,
            trade.quantity,
            trade.reason
        );
        if let Some(ts) = trade.timestamp {
            let _ = write!(out, "  {}", ts.format("%Y-%m-%d %H:%M:%S"));
        }
        out.push('\n');
    }
    out
}
