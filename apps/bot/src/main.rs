//! Goldwatch - scheduled Telegram price notifier.
//!
//! One invocation performs one cycle: fetch the latest observation,
//! evaluate the strategy bands and levels, push any realtime signals
//! (or a heartbeat), persist the notify-once state, and exit.

mod config;

use clap::Parser;
use goldwatch_alerts::{CycleOutcome, Notifier, StateStore, TelegramClient};
use goldwatch_feeds::YahooFinance;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Goldwatch CLI
#[derive(Parser, Debug)]
#[command(name = "goldwatch")]
#[command(about = "Band/level price alerting over Telegram", long_about = None)]
struct Args {
    /// Cycle mode: run, status
    #[arg(short, long, default_value = "run")]
    mode: String,

    /// Ticker override (falls back to the SYMBOL env var, then the strategy)
    #[arg(short, long)]
    symbol: Option<String>,

    /// Strategy file path (JSON); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Notify-once state file path
    #[arg(long, default_value = "gold_trend_state.json")]
    state: PathBuf,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Cycle mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Run,
    Status,
}

fn parse_mode(mode: &str) -> Mode {
    match mode.to_lowercase().as_str() {
        "status" => Mode::Status,
        _ => Mode::Run,
    }
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_logging(&args.log_level);

    let token = std::env::var("BOT_TOKEN").unwrap_or_default().trim().to_string();
    let chat_id = std::env::var("CHAT_ID").unwrap_or_default().trim().to_string();
    if token.is_empty() || chat_id.is_empty() {
        error!("BOT_TOKEN and CHAT_ID must be set");
        std::process::exit(2);
    }

    let mut strategy = match config::load_strategy(args.config.as_deref()) {
        Ok(strategy) => strategy,
        Err(e) => {
            error!("Failed to load strategy: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(symbol) = args.symbol.or_else(|| std::env::var("SYMBOL").ok()) {
        strategy.symbol = symbol;
    }
    if let Err(e) = strategy.validate() {
        error!("Invalid strategy: {}", e);
        std::process::exit(1);
    }

    let mode = parse_mode(&args.mode);
    info!("Goldwatch starting...");
    info!("  Mode: {:?}", mode);
    info!("  Symbol: {}", strategy.symbol);
    info!("  State file: {}", args.state.display());

    let notifier = Notifier::new(
        YahooFinance::new(),
        TelegramClient::new(token, chat_id),
        strategy,
        StateStore::new(args.state),
    );

    let result = match mode {
        Mode::Status => notifier.send_status().await,
        Mode::Run => notifier.run_cycle().await,
    };

    match result {
        Ok(CycleOutcome::Signals(count)) => {
            info!("Cycle complete: {} signal block(s) pushed", count)
        }
        Ok(CycleOutcome::Heartbeat) => info!("Cycle complete: heartbeat pushed"),
        Ok(CycleOutcome::Quiet) => info!("Cycle complete: nothing to send"),
        Ok(CycleOutcome::Status) => info!("Status pushed"),
        Err(e) => {
            error!("Cycle failed: {}", e);
            std::process::exit(1);
        }
    }
}
