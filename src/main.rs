use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use trade_journal::analytics;
use trade_journal::config::AnalyticsConfig;
use trade_journal::export;
use trade_journal::ingest;
use trade_journal::report;
use trade_journal::types::Period;

#[derive(Parser)]
#[command(name = "trade-journal")]
#[command(version = "0.1.0")]
#[command(about = "Trading journal analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Analytics configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute analytics over a journal file and print a summary
    Analyze {
        /// Journal file (JSON array of trades)
        #[arg(short, long)]
        trades: PathBuf,

        /// Time window: all, week, month or quarter
        #[arg(short, long, default_value = "all")]
        period: String,

        /// Reference time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,

        /// Print the full analytics bundle as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Export the filtered closed trades as CSV
    Export {
        /// Journal file (JSON array of trades)
        #[arg(short, long)]
        trades: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Time window: all, week, month or quarter
        #[arg(short, long, default_value = "all")]
        period: String,

        /// Reference time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            trades,
            period,
            at,
            json,
        } => run_analyze(&trades, &period, at.as_deref(), json, &config),
        Commands::Export {
            trades,
            output,
            period,
            at,
        } => run_export(&trades, &output, &period, at.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    let config = match path {
        Some(path) => AnalyticsConfig::load(path)?,
        None => AnalyticsConfig::default(),
    };
    config
        .validate()
        .map_err(|errors| anyhow!("invalid configuration: {}", errors.join(", ")))?;
    Ok(config)
}

fn parse_period(s: &str) -> Result<Period> {
    Period::from_str(s).ok_or_else(|| anyhow!("invalid period `{}`; use all, week, month or quarter", s))
}

fn parse_reference_time(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| anyhow!("invalid reference time `{}`; use RFC 3339", raw)),
        None => Ok(Utc::now()),
    }
}

fn run_analyze(
    trades_path: &Path,
    period: &str,
    at: Option<&str>,
    json: bool,
    config: &AnalyticsConfig,
) -> Result<()> {
    let period = parse_period(period)?;
    let reference_time = parse_reference_time(at)?;
    let trades = ingest::load_journal(trades_path)?;

    let bundle = analytics::analyze(&trades, period, reference_time, config);
    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        report::print_summary(&bundle);
    }
    Ok(())
}

fn run_export(trades_path: &Path, output: &Path, period: &str, at: Option<&str>) -> Result<()> {
    let period = parse_period(period)?;
    let reference_time = parse_reference_time(at)?;
    let trades = ingest::load_journal(trades_path)?;

    let mut filtered: Vec<_> = trades
        .iter()
        .filter(|t| t.is_closed() && period.contains(t.timestamp, reference_time))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    info!(
        "exporting {} closed trades for period {}",
        filtered.len(),
        period
    );
    export::export_csv(output, &filtered)
}
