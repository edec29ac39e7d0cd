//! Market-data feed for the gold trend notifier.
//!
//! This crate provides:
//! - Yahoo Finance chart API client for daily candles
//! - Reduction to the per-cycle observation (last close + volatility proxy)

pub mod error;
pub mod yahoo;

pub use error::FeedError;
pub use yahoo::YahooFinance;
