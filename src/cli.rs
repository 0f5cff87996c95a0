//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_bill_adapter::JsonBillAdapter;
use crate::adapters::paper_exchange::PaperExchange;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::bill::Bill;
use crate::domain::config_validation::{build_replay_config, validate_replay_config};
use crate::domain::error::LedgerError;
use crate::domain::replay::{run_replay, ReplayConfig, ReplayResult};
use crate::domain::trader::FullTrader;
use crate::ports::bill_store_port::BillStorePort;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::{ReportDetail, ReportPort};
use crate::ports::signal_port::SignalPort;

#[derive(Parser, Debug)]
#[command(name = "tradeledger", about = "Trade round-trip ledger and bill analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DetailArg {
    Summary,
    Detail,
    All,
}

impl From<DetailArg> for ReportDetail {
    fn from(arg: DetailArg) -> Self {
        match arg {
            DetailArg::Summary => ReportDetail::Summary,
            DetailArg::Detail => ReportDetail::Detail,
            DetailArg::All => ReportDetail::All,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a signal file against a paper exchange and report the bill
    Replay {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        signals: PathBuf,
        /// Write the recorded bill as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        detail: Option<DetailArg>,
    },
    /// Report on a previously saved bill
    Report {
        #[arg(short, long)]
        bill: PathBuf,
        #[arg(short, long, value_enum, default_value_t = DetailArg::Detail)]
        detail: DetailArg,
    },
    /// Validate a replay configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub async fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Replay {
            config,
            signals,
            output,
            detail,
        } => run_replay_command(&config, &signals, output.as_deref(), detail).await,
        Command::Report { bill, detail } => run_report(&bill, detail.into()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(&e)
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, LedgerError> {
    FileConfigAdapter::from_file(path).map_err(|e| LedgerError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Report detail from `[report] detail`, defaulting to a summary.
pub fn config_detail(config: &dyn ConfigPort) -> ReportDetail {
    match config.get_string("report", "detail").as_deref().map(str::trim) {
        Some("all") => ReportDetail::All,
        Some("detail") => ReportDetail::Detail,
        Some("summary") | None => ReportDetail::Summary,
        Some(other) => {
            warn!(value = other, "unknown [report] detail, using summary");
            ReportDetail::Summary
        }
    }
}

/// Run a replay end to end against a fresh paper exchange.
pub async fn replay_signals(
    config: &ReplayConfig,
    signals: &dyn SignalPort,
) -> Result<ReplayResult, LedgerError> {
    let rows = signals.fetch_signals()?;
    info!(rows = rows.len(), pair = %config.pair, "replaying signals");

    let exchange = Arc::new(PaperExchange::new(config.fee_pct));
    let trader = FullTrader::new(exchange.clone(), config.initial_wallet());

    run_replay(trader, &config.pair, &config.bill_id, &rows, |row| {
        exchange.set_price(row.price)
    })
    .await
}

async fn run_replay_command(
    config_path: &Path,
    signals_path: &Path,
    output_path: Option<&Path>,
    detail: Option<DetailArg>,
) -> Result<(), LedgerError> {
    info!(path = %config_path.display(), "loading config");
    let adapter = load_config(config_path)?;
    let config = build_replay_config(&adapter)?;
    let detail = detail.map(ReportDetail::from).unwrap_or_else(|| config_detail(&adapter));

    let signals = CsvAdapter::new(signals_path.to_path_buf());
    let result = replay_signals(&config, &signals).await?;

    if let Some(path) = output_path {
        JsonBillAdapter::new(path.to_path_buf()).save(&result.bill)?;
    }

    print_report(&result.bill, detail)?;
    for (symbol, amount) in result.wallet.snapshot() {
        println!("wallet {symbol} {amount:.8}");
    }
    Ok(())
}

fn run_report(bill_path: &Path, detail: ReportDetail) -> Result<(), LedgerError> {
    let store = JsonBillAdapter::new(bill_path.to_path_buf());
    let mut bill = store.load()?;
    if bill.id().is_empty() {
        let stem = bill_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        bill = bill.with_id(stem);
    }
    print_report(&bill, detail)
}

fn run_validate(config_path: &Path) -> Result<(), LedgerError> {
    let adapter = load_config(config_path)?;
    validate_replay_config(&adapter)?;
    println!("{}: ok", config_path.display());
    Ok(())
}

fn print_report(bill: &Bill, detail: ReportDetail) -> Result<(), LedgerError> {
    let text = TextReportAdapter::new().render(bill, detail)?;
    print!("{text}");
    Ok(())
}
