//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::CrossgridError;
use crate::domain::grid::{
    DEFAULT_INITIAL_CAPITAL, DEFAULT_MAX_WINDOW, DEFAULT_TOP_N, OptimizerConfig, grid_search,
};
use crate::domain::rank::{RankedReport, rank_results};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "crossgrid", about = "SMA crossover grid-search backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the grid search and write the ranked report
    Optimize {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// List the symbols present in the price file
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Show the loaded date range for configured symbol(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Optimize {
            config,
            output,
            symbol,
            data,
            year,
        } => run_optimize(
            &config,
            output.as_ref(),
            symbol.as_deref(),
            data.as_ref(),
            year,
        ),
        Command::ListSymbols { config, data } => run_list_symbols(config.as_ref(), data.as_ref()),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CrossgridError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_optimizer_config(
    adapter: &dyn ConfigPort,
) -> Result<OptimizerConfig, CrossgridError> {
    let initial_capital =
        adapter.get_double("optimizer", "initial_capital", DEFAULT_INITIAL_CAPITAL);
    if initial_capital <= 0.0 {
        return Err(CrossgridError::ConfigInvalid {
            section: "optimizer".into(),
            key: "initial_capital".into(),
            reason: "must be positive".into(),
        });
    }

    let max_window = adapter.get_int("optimizer", "max_window", DEFAULT_MAX_WINDOW as i64);
    if max_window < 1 {
        return Err(CrossgridError::ConfigInvalid {
            section: "optimizer".into(),
            key: "max_window".into(),
            reason: "must be at least 1".into(),
        });
    }

    let top_n = adapter.get_int("optimizer", "top_n", DEFAULT_TOP_N as i64);
    if top_n < 1 {
        return Err(CrossgridError::ConfigInvalid {
            section: "optimizer".into(),
            key: "top_n".into(),
            reason: "must be at least 1".into(),
        });
    }

    Ok(OptimizerConfig {
        initial_capital,
        max_window: max_window as usize,
        top_n: top_n as usize,
    })
}

pub fn resolve_symbols(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(s) = symbol_override {
        return vec![s.to_uppercase()];
    }

    if let Some(symbols_str) = config.get_string("data", "symbols") {
        return symbols_str
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    vec![]
}

pub fn resolve_year(
    year_override: Option<i32>,
    config: &dyn ConfigPort,
) -> Result<Option<i32>, CrossgridError> {
    if year_override.is_some() {
        return Ok(year_override);
    }

    match config.get_string("data", "year") {
        Some(s) if !s.trim().is_empty() => {
            s.trim()
                .parse::<i32>()
                .map(Some)
                .map_err(|_| CrossgridError::ConfigInvalid {
                    section: "data".into(),
                    key: "year".into(),
                    reason: "not a valid year".into(),
                })
        }
        _ => Ok(None),
    }
}

fn resolve_prices_path(
    data_override: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, CrossgridError> {
    if let Some(p) = data_override {
        return Ok(p.clone());
    }
    config
        .get_string("data", "prices_path")
        .map(PathBuf::from)
        .ok_or_else(|| CrossgridError::ConfigMissing {
            section: "data".into(),
            key: "prices_path".into(),
        })
}

fn run_optimize(
    config_path: &PathBuf,
    output_override: Option<&PathBuf>,
    symbol_override: Option<&str>,
    data_override: Option<&PathBuf>,
    year_override: Option<i32>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let opt_config = match build_optimizer_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = resolve_symbols(symbol_override, &adapter);
    if symbols.is_empty() {
        eprintln!("error: no symbols configured (set [data] symbols or pass --symbol)");
        return ExitCode::from(2);
    }

    let year = match resolve_year(year_override, &adapter) {
        Ok(y) => y,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let prices_path = match resolve_prices_path(data_override, &adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Loading prices from {}", prices_path.display());
    let data_port = match CsvAdapter::from_file(&prices_path) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("  {} trading days loaded", data_port.day_count());

    let output_path = output_override.cloned().unwrap_or_else(|| {
        adapter
            .get_string("report", "output_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("sma_rank_all.csv"))
    });

    let mut reporter = CsvReportAdapter::new(output_path.clone(), opt_config.initial_capital);
    let mut is_first = true;
    let mut completed = 0usize;

    for symbol in &symbols {
        match run_symbol(&data_port, symbol, year, &opt_config) {
            Ok(report) => {
                if let Err(e) = reporter.append(symbol, &report, is_first) {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
                is_first = false;
                completed += 1;
            }
            Err(e) => {
                eprintln!("warning: skipping {} ({})", symbol, e);
            }
        }
    }

    if completed == 0 {
        eprintln!("error: no symbols produced results");
        return ExitCode::from(5);
    }

    if let Err(e) = reporter.finish() {
        eprintln!("error: failed to write report: {e}");
        return (&e).into();
    }

    eprintln!(
        "\nReport written to: {} ({} of {} symbols)",
        output_path.display(),
        completed,
        symbols.len()
    );
    ExitCode::SUCCESS
}

/// Per-symbol pipeline: fetch, resolve the index window, grid-search, rank,
/// and print the console summary. Failures are per-symbol; the caller skips
/// the symbol and continues.
fn run_symbol(
    data_port: &dyn DataPort,
    symbol: &str,
    year: Option<i32>,
    opt_config: &OptimizerConfig,
) -> Result<RankedReport, CrossgridError> {
    let series = data_port.fetch_prices(symbol)?;
    if series.is_empty() {
        return Err(CrossgridError::NoData {
            symbol: symbol.to_string(),
        });
    }

    let (start_idx, end_idx) = match year {
        Some(y) => series
            .year_window(y)
            .ok_or_else(|| CrossgridError::NoDateWindow {
                symbol: symbol.to_string(),
                year: y,
            })?,
        None => series.full_window(),
    };

    eprintln!("\n==== {} ====", symbol);
    eprintln!(
        "  window: index {} to {} ({} trading days)",
        start_idx,
        end_idx,
        end_idx - start_idx + 1
    );

    let outcome = grid_search(&series, start_idx, end_idx, opt_config);

    if let Some(best) = outcome.best {
        eprintln!(
            "  best pair: short={} long={} final_capital={:.4}",
            best.short, best.long, best.final_capital
        );
    }

    let report = rank_results(outcome.results, opt_config.top_n);

    eprintln!("  rank\tshort\tlong\tfinal\treturn%\ttrades");
    for (i, entry) in report.entries.iter().enumerate() {
        eprintln!(
            "  {}\t{}\t{}\t{:.4}\t{:.4}\t{}",
            i + 1,
            entry.short,
            entry.long,
            entry.final_capital,
            entry.return_pct(opt_config.initial_capital),
            entry.trades,
        );
    }

    Ok(report)
}

fn run_list_symbols(config_path: Option<&PathBuf>, data_override: Option<&PathBuf>) -> ExitCode {
    let prices_path = match (data_override, config_path) {
        (Some(p), _) => p.clone(),
        (None, Some(cfg)) => {
            let adapter = match load_config(cfg) {
                Ok(a) => a,
                Err(code) => return code,
            };
            match resolve_prices_path(None, &adapter) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            }
        }
        (None, None) => {
            eprintln!("error: --config or --data is required for list-symbols");
            return ExitCode::from(1);
        }
    };

    let data_port = match CsvAdapter::from_file(&prices_path) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match data_port.list_symbols() {
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{}", symbol);
            }
            eprintln!("{} symbols found", symbols.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &PathBuf, symbol_override: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let symbols = resolve_symbols(symbol_override, &adapter);
    if symbols.is_empty() {
        eprintln!("error: no symbols configured (set [data] symbols or pass --symbol)");
        return ExitCode::from(2);
    }

    let year = match resolve_year(None, &adapter) {
        Ok(y) => y,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let prices_path = match resolve_prices_path(None, &adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = match CsvAdapter::from_file(&prices_path) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for symbol in &symbols {
        match data_port.fetch_prices(symbol) {
            Ok(series) if series.is_empty() => {
                eprintln!("{}: no data", symbol);
            }
            Ok(series) => {
                let first = series.dates[0];
                let last = series.dates[series.len() - 1];
                match year.and_then(|y| series.year_window(y).map(|w| (y, w))) {
                    Some((y, (s, e))) => println!(
                        "{}: {} days, {} to {} ({} days in {})",
                        symbol,
                        series.len(),
                        first,
                        last,
                        e - s + 1,
                        y
                    ),
                    None => println!("{}: {} days, {} to {}", symbol, series.len(), first, last),
                }
            }
            Err(e) => {
                eprintln!("error querying {}: {}", symbol, e);
            }
        }
    }
    ExitCode::SUCCESS
}
