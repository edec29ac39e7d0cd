//! Band/level alerting engine for the gold trend notifier.
//!
//! This crate provides:
//! - Durable notify-once state with atomic file persistence
//! - The signal evaluator (buy bands, confirm zone, risk levels)
//! - Telegram message rendering and delivery
//! - The cycle driver wiring the collaborators together

pub mod evaluator;
pub mod formatter;
pub mod notifier;
pub mod state;
pub mod telegram;

pub use evaluator::evaluate;
pub use notifier::{
    heartbeat_due, Advisory, CycleOutcome, Delivery, MarketSource, Notifier, NotifierError,
    HEARTBEAT_QUIET_SECS,
};
pub use state::{AlertState, StateError, StateStore};
pub use telegram::{TelegramClient, TelegramError};
