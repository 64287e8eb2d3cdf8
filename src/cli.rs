//! Command line interface.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::format_report;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestReport};
use crate::domain::config_validation::validate_backtest_config;
use crate::domain::ensemble::{EnsembleConfig, EnsembleThresholds, EnsembleWeights};
use crate::domain::error::QuantsimError;
use crate::domain::indicator::IndicatorParams;
use crate::domain::strategy::SignalPolicy;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceSource;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_SYMBOL: &str = "BTCUSDT";
pub const DEFAULT_INTERVAL: &str = "1d";
pub const DEFAULT_LIMIT: usize = 500;

#[derive(Parser, Debug)]
#[command(name = "quantsim", about = "Trading signal engine and backtester")]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over a CSV price file
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Directory holding `{symbol}_{interval}.csv` files
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        interval: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        /// ensemble | indicator_threshold
        #[arg(long)]
        policy: Option<String>,
        /// Write the JSON report here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate the ensemble signal for a comma-separated price list
    Signal {
        #[arg(long)]
        prices: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols with data for an interval
    ListSymbols {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long, default_value = DEFAULT_INTERVAL)]
        interval: String,
    },
}

/// Where to read prices from, after CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub path: PathBuf,
    pub symbol: String,
    pub interval: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Default)]
pub struct DataOverrides {
    pub path: Option<PathBuf>,
    pub symbol: Option<String>,
    pub interval: Option<String>,
    pub limit: Option<usize>,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Backtest {
            config,
            data,
            symbol,
            interval,
            limit,
            policy,
            output,
        } => {
            let overrides = DataOverrides {
                path: data,
                symbol,
                interval,
                limit,
            };
            run_backtest(&config, overrides, policy.as_deref(), output.as_deref())
        }
        Command::Signal { prices, config } => run_signal(&prices, config.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { data, interval } => run_list_symbols(&data, &interval),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, QuantsimError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

fn run_backtest(
    config_path: &Path,
    overrides: DataOverrides,
    policy_override: Option<&str>,
    output_path: Option<&Path>,
) -> Result<(), QuantsimError> {
    let adapter = load_config(config_path)?;
    let mut bt_config = build_backtest_config(&adapter)?;
    if let Some(policy) = policy_override {
        bt_config.policy = parse_policy(policy)?;
    }
    if let Err(e) = validate_backtest_config(&bt_config) {
        warn!(error = %e, "configuration rejected");
        return Err(e);
    }

    let settings = build_data_settings(&adapter, overrides)?;
    let source = CsvAdapter::new(settings.path.clone());
    let report = run_backtest_pipeline(&source, &settings, &bt_config)?;

    print!("{}", format_report(&report, &bt_config));

    if let Some(path) = output_path {
        let path_str = path.to_string_lossy();
        JsonReportAdapter::new().write(&report, &bt_config, &path_str)?;
        eprintln!("\nReport written to: {}", path.display());
    }
    Ok(())
}

/// Fetches prices from `source` and runs the engine over them.
pub fn run_backtest_pipeline(
    source: &dyn PriceSource,
    settings: &DataSettings,
    config: &BacktestConfig,
) -> Result<BacktestReport, QuantsimError> {
    info!(
        symbol = %settings.symbol,
        interval = %settings.interval,
        limit = ?settings.limit,
        "fetching prices"
    );
    let series = source.fetch(&settings.symbol, &settings.interval, settings.limit)?;
    if series.is_empty() {
        return Err(QuantsimError::NoData {
            symbol: settings.symbol.clone(),
            interval: settings.interval.clone(),
        });
    }
    backtest_engine::run_backtest(&series, config)
}

fn run_signal(prices: &str, config_path: Option<&Path>) -> Result<(), QuantsimError> {
    let config = match config_path {
        Some(path) => build_backtest_config(&load_config(path)?)?,
        None => BacktestConfig::default(),
    };
    let prices = parse_prices(prices)?;
    let result = backtest_engine::evaluate_signal(&prices, &config)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), QuantsimError> {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = load_config(config_path)?;
    let config = build_backtest_config(&adapter)?;
    if let Err(e) = validate_backtest_config(&config) {
        warn!(error = %e, "configuration rejected");
        return Err(e);
    }
    let settings = build_data_settings(&adapter, DataOverrides::default())?;

    eprintln!("  Policy:     {}", config.policy);
    eprintln!("  Capital:    {:.2}", config.initial_capital);
    eprintln!("  Fee:        {}", config.fee_pct);
    eprintln!(
        "  MA windows: {}/{}",
        config.indicators.ma_short, config.indicators.ma_long
    );
    eprintln!(
        "  Data:       {}/{}_{}.csv",
        settings.path.display(),
        settings.symbol,
        settings.interval
    );
    eprintln!("\nConfiguration is valid.");
    Ok(())
}

fn run_list_symbols(data_path: &Path, interval: &str) -> Result<(), QuantsimError> {
    let adapter = CsvAdapter::new(data_path.to_path_buf());
    let symbols = adapter.list_symbols(interval)?;

    if symbols.is_empty() {
        eprintln!("No symbols found for interval {}", interval);
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    Ok(())
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, QuantsimError> {
    let defaults = BacktestConfig::default();

    let policy = match adapter.get_string("backtest", "policy") {
        Some(p) if !p.trim().is_empty() => parse_policy(&p)?,
        _ => defaults.policy,
    };

    Ok(BacktestConfig {
        initial_capital: adapter.get_double(
            "backtest",
            "initial_capital",
            defaults.initial_capital,
        )?,
        fee_pct: adapter.get_double("backtest", "fee_pct", defaults.fee_pct)?,
        stop_loss: adapter.get_optional_double("backtest", "stop_loss")?,
        take_profit: adapter.get_optional_double("backtest", "take_profit")?,
        fixed_size: adapter.get_optional_double("backtest", "fixed_size")?,
        policy,
        indicators: build_indicator_params(adapter)?,
        ensemble: build_ensemble_config(adapter)?,
        periods_per_year: adapter.get_double(
            "backtest",
            "periods_per_year",
            defaults.periods_per_year,
        )?,
    })
}

fn build_indicator_params(adapter: &dyn ConfigPort) -> Result<IndicatorParams, QuantsimError> {
    let d = IndicatorParams::default();
    Ok(IndicatorParams {
        ma_short: adapter.get_usize("indicators", "ma_short", d.ma_short)?,
        ma_long: adapter.get_usize("indicators", "ma_long", d.ma_long)?,
        rsi_period: adapter.get_usize("indicators", "rsi_period", d.rsi_period)?,
        macd_fast: adapter.get_usize("indicators", "macd_fast", d.macd_fast)?,
        macd_slow: adapter.get_usize("indicators", "macd_slow", d.macd_slow)?,
        macd_signal: adapter.get_usize("indicators", "macd_signal", d.macd_signal)?,
        bb_period: adapter.get_usize("indicators", "bb_period", d.bb_period)?,
        bb_mult: adapter.get_double("indicators", "bb_mult", d.bb_mult)?,
    })
}

fn build_ensemble_config(adapter: &dyn ConfigPort) -> Result<EnsembleConfig, QuantsimError> {
    let d = EnsembleConfig::default();
    Ok(EnsembleConfig {
        weights: EnsembleWeights {
            momentum: adapter.get_double("ensemble", "weight_momentum", d.weights.momentum)?,
            ma: adapter.get_double("ensemble", "weight_ma", d.weights.ma)?,
            volatility: adapter.get_double(
                "ensemble",
                "weight_volatility",
                d.weights.volatility,
            )?,
        },
        thresholds: EnsembleThresholds {
            buy: adapter.get_double("ensemble", "buy_threshold", d.thresholds.buy)?,
            sell: adapter.get_double("ensemble", "sell_threshold", d.thresholds.sell)?,
        },
        momentum_threshold_pct: adapter.get_double(
            "ensemble",
            "momentum_threshold_pct",
            d.momentum_threshold_pct,
        )?,
    })
}

/// CLI flags win over the `[data]` section, which wins over the defaults.
pub fn build_data_settings(
    adapter: &dyn ConfigPort,
    overrides: DataOverrides,
) -> Result<DataSettings, QuantsimError> {
    let non_blank = |key: &str| {
        adapter
            .get_string("data", key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let path = overrides
        .path
        .or_else(|| non_blank("path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
    let symbol = overrides
        .symbol
        .or_else(|| non_blank("symbol"))
        .unwrap_or_else(|| DEFAULT_SYMBOL.to_string())
        .to_uppercase();
    let interval = overrides
        .interval
        .or_else(|| non_blank("interval"))
        .unwrap_or_else(|| DEFAULT_INTERVAL.to_string());
    let limit = match overrides.limit {
        Some(limit) => limit,
        None => adapter.get_usize("data", "limit", DEFAULT_LIMIT)?,
    };

    // 0 means no limit
    let limit = (limit > 0).then_some(limit);

    Ok(DataSettings {
        path,
        symbol,
        interval,
        limit,
    })
}

pub fn parse_policy(value: &str) -> Result<SignalPolicy, QuantsimError> {
    value
        .parse()
        .map_err(|reason: String| QuantsimError::invalid("backtest", "policy", reason))
}

/// Parses `"100, 101.5,99"` into closes.
pub fn parse_prices(input: &str) -> Result<Vec<f64>, QuantsimError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(index, s)| {
            s.parse::<f64>().map_err(|_| QuantsimError::DataSource {
                reason: format!("cannot parse price #{} '{}'", index + 1, s),
            })
        })
        .collect()
}
