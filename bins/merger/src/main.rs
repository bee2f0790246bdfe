//! Cash flow merge tool.
//!
//! Loads security event cash flows exported as a JSON array, merges events
//! reported more than once and prints the result as JSON.
//!
//! Usage: cash-flow-merge <INPUT> [--keep-conflicts] [--compact]

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use broker_report_core::model::SecurityEventCashFlow;
use broker_report_core::report::{DuplicatePolicy, ReportTables};
use broker_report_shared::{AppConfig, AppError, AppResult};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use report::{JsonReport, JsonReportTables};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "cash-flow-merge", version, about = "Merge duplicate security cash flows")]
struct Cli {
    /// JSON file with an array of cash flows.
    input: PathBuf,

    /// Keep duplicates that cannot be merged instead of failing.
    #[arg(long)]
    keep_conflicts: bool,

    /// Print compact JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            let err = AppError::from(err);
            eprintln!("{err}");
            return exit_code(&err);
        }
    };

    // Initialize tracing; logs go to stderr, stdout carries the JSON
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Failed to merge cash flows");
            err.downcast_ref::<AppError>()
                .map_or(ExitCode::FAILURE, exit_code)
        }
    }
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let policy = duplicate_policy(cli, config);
    let report = JsonReport::open(&cli.input)?;
    let cash_flows = merge_report(report, policy)?;

    let json = if config.output.pretty && !cli.compact {
        serde_json::to_string_pretty(&cash_flows)
    } else {
        serde_json::to_string(&cash_flows)
    }
    .context("Failed to serialize cash flows")?;
    println!("{json}");

    Ok(())
}

/// `--keep-conflicts` wins over `merge.strict`.
fn duplicate_policy(cli: &Cli, config: &AppConfig) -> DuplicatePolicy {
    if cli.keep_conflicts {
        DuplicatePolicy::KeepBoth
    } else {
        DuplicatePolicy::from_strict(config.merge.strict)
    }
}

/// Merges the report's duplicate cash flows and validates every merged row.
fn merge_report(
    report: JsonReport,
    policy: DuplicatePolicy,
) -> AppResult<Vec<SecurityEventCashFlow>> {
    let tables = JsonReportTables::new(report, policy)?;
    let table = tables.security_event_cash_flow_table();

    for cash_flow in table.data() {
        cash_flow.validate()?;
    }

    info!(
        report = table.report().name(),
        rows = table.len(),
        ?policy,
        "Merged security cash flows"
    );

    Ok(table.data().to_vec())
}

fn exit_code(err: &AppError) -> ExitCode {
    u8::try_from(err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}
