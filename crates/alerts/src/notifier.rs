//! Cycle orchestration: load state, fetch, evaluate, format, deliver,
//! persist.

use crate::evaluator::evaluate;
use crate::formatter::{self, HEARTBEAT_TITLE, STATUS_TITLE};
use crate::state::{StateError, StateStore};
use crate::telegram::{TelegramClient, TelegramError};
use async_trait::async_trait;
use goldwatch_core::{Observation, StrategyConfig};
use goldwatch_feeds::{FeedError, YahooFinance};
use thiserror::Error;
use tracing::{error, info};

/// Quiet period after which a heartbeat summary goes out (seconds).
pub const HEARTBEAT_QUIET_SECS: i64 = 6 * 3600;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Market data error: {0}")]
    Feed(#[from] FeedError),
    #[error("State error: {0}")]
    State(#[from] StateError),
}

/// Market-data collaborator: one observation per cycle.
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn observe(&self, symbol: &str, lookback_days: u32) -> Result<Observation, FeedError>;
}

#[async_trait]
impl MarketSource for YahooFinance {
    async fn observe(&self, symbol: &str, lookback_days: u32) -> Result<Observation, FeedError> {
        self.fetch_observation(symbol, lookback_days).await
    }
}

/// Chat-delivery collaborator.
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<(), TelegramError>;
}

#[async_trait]
impl Delivery for TelegramClient {
    async fn deliver(&self, text: &str) -> Result<(), TelegramError> {
        self.send(text).await
    }
}

/// Optional add-on that may contribute one extra note to a cycle,
/// guarded by its own one-shot flag in the persisted state.
pub trait Advisory: Send + Sync {
    fn suggest(&self, config: &StrategyConfig, obs: &Observation) -> Option<String>;
}

/// What a cycle ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Realtime signals were pushed (count of message blocks)
    Signals(usize),
    /// No signals; quiet period elapsed, summary pushed
    Heartbeat,
    /// No signals, heartbeat not due; nothing sent, nothing written
    Quiet,
    /// Explicit status summary pushed
    Status,
}

/// Drives one evaluation cycle against the external collaborators.
pub struct Notifier<S, D> {
    source: S,
    delivery: D,
    strategy: StrategyConfig,
    store: StateStore,
    advisory: Option<Box<dyn Advisory>>,
}

impl<S: MarketSource, D: Delivery> Notifier<S, D> {
    pub fn new(source: S, delivery: D, strategy: StrategyConfig, store: StateStore) -> Self {
        Self {
            source,
            delivery,
            strategy,
            store,
            advisory: None,
        }
    }

    /// Plug in the secondary-idea advisory.
    pub fn with_advisory(mut self, advisory: Box<dyn Advisory>) -> Self {
        self.advisory = Some(advisory);
        self
    }

    /// `status` mode: always deliver the summary and stamp the state.
    pub async fn send_status(&self) -> Result<CycleOutcome, NotifierError> {
        let obs = self.observe().await?;
        let mut state = self.store.load();

        let text = formatter::render_status(&self.strategy, &obs, STATUS_TITLE);
        self.try_deliver(&text).await;

        state.last_status_ts = chrono::Utc::now().timestamp();
        self.store.save(&state)?;
        Ok(CycleOutcome::Status)
    }

    /// `run` mode: push realtime signals if any fired; otherwise fall
    /// back to a heartbeat once the quiet period has elapsed; otherwise
    /// touch nothing.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, NotifierError> {
        // A fetch failure aborts the cycle before any state is touched
        let obs = self.observe().await?;
        let mut state = self.store.load();

        let signals = evaluate(&self.strategy, &obs, &mut state);
        let mut messages: Vec<String> = signals
            .iter()
            .map(|signal| formatter::render_signal(&self.strategy, signal))
            .collect();

        if let Some(advisory) = &self.advisory {
            if !state.secondary_idea_suggested {
                if let Some(note) = advisory.suggest(&self.strategy, &obs) {
                    messages.push(note);
                    state.secondary_idea_suggested = true;
                }
            }
        }

        if !messages.is_empty() {
            let text = formatter::render_signal_report(&self.strategy, &obs, &messages);
            // Delivery failure is logged, not raised; the consumed
            // once-guards are persisted either way
            self.try_deliver(&text).await;
            self.store.save(&state)?;
            info!(
                count = messages.len(),
                price = obs.price,
                "Realtime signals pushed"
            );
            return Ok(CycleOutcome::Signals(messages.len()));
        }

        let now = chrono::Utc::now().timestamp();
        if heartbeat_due(state.last_summary_ts, now) {
            let text = formatter::render_status(&self.strategy, &obs, HEARTBEAT_TITLE);
            self.try_deliver(&text).await;
            state.last_summary_ts = now;
            self.store.save(&state)?;
            info!(price = obs.price, "Heartbeat pushed");
            return Ok(CycleOutcome::Heartbeat);
        }

        Ok(CycleOutcome::Quiet)
    }

    async fn observe(&self) -> Result<Observation, FeedError> {
        self.source
            .observe(&self.strategy.symbol, self.strategy.atr.lookback_days)
            .await
    }

    async fn try_deliver(&self, text: &str) {
        if let Err(e) = self.delivery.deliver(text).await {
            error!(error = %e, "Failed to deliver message");
        }
    }
}

/// Strict quiet-period check: a heartbeat exactly at the boundary does
/// not fire.
pub fn heartbeat_due(last_summary_ts: i64, now: i64) -> bool {
    now - last_summary_ts > HEARTBEAT_QUIET_SECS
}
