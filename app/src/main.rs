// In app/src/main.rs

use analytics::{PerformanceSummary, PerformanceTracker};
use anyhow::{Context, Result};
use app_config::PairConfig;
use clap::{Parser, Subcommand};
use core_types::{PairId, Symbol};
use engine::{JsonFileStore, PairEngine, StateStore};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::prelude::*;

mod feed;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "A crossover signal engine with a risk-gated position lifecycle."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Feeds each enabled pair's candle file through its engine and prints
    /// a performance summary per pair.
    Run {
        /// Path to the pairs portfolio file.
        #[arg(long, default_value = "config/pairs.toml")]
        pairs: PathBuf,

        /// Directory holding one `<SYMBOL>.csv` candle file per pair.
        #[arg(long)]
        data_dir: PathBuf,

        /// Optional directory for the JSON state snapshots written after
        /// the run.
        #[arg(long)]
        state_dir: Option<PathBuf>,
    },

    /// Loads and risk-validates the pair configs, then exits.
    Validate {
        #[arg(long, default_value = "config/pairs.toml")]
        pairs: PathBuf,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    init_tracing();

    // Parse command-line arguments.
    let cli = Cli::parse();

    tracing::info!("Starting crossover engine");

    match cli.command {
        Commands::Run {
            pairs,
            data_dir,
            state_dir,
        } => run(&pairs, &data_dir, state_dir)?,
        Commands::Validate { pairs } => validate(&pairs)?,
    }

    Ok(())
}

fn init_tracing() {
    // config/base.toml sets the level; fall back to INFO so the binary still
    // runs outside the repository root.
    let level = app_config::load_settings()
        .ok()
        .and_then(|settings| settings.app.log_level.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn validate(pairs_path: &Path) -> Result<()> {
    let config = app_config::load_pairs(pairs_path)?;
    let enabled = config.pair_configs.iter().filter(|p| p.enabled).count();
    tracing::info!(
        total = config.pair_configs.len(),
        enabled,
        "pair configs are valid"
    );
    Ok(())
}

fn run(pairs_path: &Path, data_dir: &Path, state_dir: Option<PathBuf>) -> Result<()> {
    let pairs = app_config::load_pairs(pairs_path)?;
    let store = state_dir.map(JsonFileStore::new);

    let enabled: Vec<&PairConfig> = pairs.pair_configs.iter().filter(|p| p.enabled).collect();
    if enabled.is_empty() {
        anyhow::bail!("No enabled pairs in {}", pairs_path.display());
    }
    tracing::info!(count = enabled.len(), "starting evaluation run");

    // One worker per pair. Pairs own their state exclusively, so they run in
    // parallel; inside a pair the pipeline stays strictly sequential.
    let results: Vec<Result<()>> = enabled
        .into_par_iter()
        .map(|pair| run_pair(pair, data_dir, store.as_ref()))
        .collect();
    for result in results {
        result?;
    }

    Ok(())
}

fn run_pair(pair: &PairConfig, data_dir: &Path, store: Option<&JsonFileStore>) -> Result<()> {
    let path = data_dir.join(format!("{}.csv", pair.symbol));
    let candles = feed::read_candles(&path)
        .with_context(|| format!("loading candles for {}", pair.symbol))?;

    let mut engine = PairEngine::new(Symbol(pair.symbol.clone()), pair.strategy.clone())?;
    for candle in candles {
        match engine.on_candle(candle) {
            Ok(signal) if !signal.is_hold() => {
                tracing::info!(
                    pair = %engine.pair(),
                    action = ?signal.action,
                    confidence = signal.confidence,
                    reason = %signal.reason,
                    "signal"
                );
            }
            Ok(_) => {}
            Err(err) => {
                // One bad sample must not kill the pipeline: report and
                // continue with the next valid candle.
                tracing::warn!(pair = %engine.pair(), error = %err, "skipping candle");
            }
        }
    }

    if let Some(store) = store {
        store.save(engine.pair(), &engine.state())?;
        tracing::info!(pair = %engine.pair(), "state snapshot saved");
    }

    let summary =
        PerformanceTracker::new().summarize(engine.trades(), engine.config(), engine.risk_state());
    print_summary(engine.pair(), &summary);

    Ok(())
}

/// Helper function to print the performance summary in a readable format.
fn print_summary(pair: &PairId, summary: &PerformanceSummary) {
    println!("\n--- Performance Summary: {pair} ---");
    println!("-----------------------------------");
    println!("Positions Opened:      {}", summary.positions_opened);
    println!("Closed Trades:         {}", summary.total_trades);
    println!(
        "Winning / Losing:      {} / {}",
        summary.winning_trades, summary.losing_trades
    );
    println!("Win Rate:              {:.1}%", summary.win_rate * 100.0);
    println!("Net P&L (fraction):    {}", summary.net_pnl_fraction);
    println!("Current Drawdown:      {}", summary.current_drawdown);
    println!("Max Drawdown Limit:    {:.2}", summary.max_drawdown_limit);
    println!("Leverage:              {}x", summary.leverage);
    println!(
        "Position Size:         {:.2}% of equity",
        summary.position_size_fraction * 100.0
    );
    println!("-----------------------------------");
}
