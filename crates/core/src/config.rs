//! Strategy configuration.

use crate::{Band, ConfirmZone, RiskLevel, TakeProfit};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Band {name} has low > high ({low} > {high})")]
    InvertedBand { name: String, low: f64, high: f64 },
    #[error("Confirm zone has low > high ({low} > {high})")]
    InvertedConfirmZone { low: f64, high: f64 },
    #[error("Fair-value band has low > high ({low} > {high})")]
    InvertedFairValueBand { low: f64, high: f64 },
}

/// Volatility indicator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtrSettings {
    /// Rolling window for the daily high-low mean, in trading days
    pub lookback_days: u32,
}

impl Default for AtrSettings {
    fn default() -> Self {
        Self { lookback_days: 14 }
    }
}

/// Immutable strategy parameter bundle.
///
/// Built once at process start and passed by reference into every
/// component; nothing in the core mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Ticker the feed is queried for
    pub symbol: String,
    /// Only notify once per band/level until price leaves and re-enters
    pub notify_once_per_band: bool,
    /// Planned maximum portfolio weight for the asset (0.18 = 18%)
    pub plan_max_pct: f64,
    /// Long-horizon fair-value price range, if estimated
    pub fair_value_band: Option<[f64; 2]>,
    /// Breakout confirmation zone at the upper edge
    pub confirm_zone: Option<ConfirmZone>,
    /// Pullback accumulation bands, in priority order
    pub buy_bands: Vec<Band>,
    /// Take-profit markers, listed in summaries only
    pub take_profits: Vec<TakeProfit>,
    /// Defensive one-sided levels, in priority order
    pub risk_levels: Vec<RiskLevel>,
    pub atr: AtrSettings,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            symbol: "GC=F".to_string(),
            notify_once_per_band: true,
            plan_max_pct: 0.18,
            fair_value_band: Some([3600.0, 4200.0]),
            confirm_zone: Some(ConfirmZone::new(4080.0, 4100.0)),
            buy_bands: vec![
                Band::new("Band A", 3920.0, 3960.0, 0.30),
                Band::new("Band B", 3850.0, 3920.0, 0.70),
                Band::new("Band C", 3780.0, 3850.0, 1.00),
            ],
            take_profits: vec![
                TakeProfit::new("TP1", 4600.0),
                TakeProfit::new("TP2", 4850.0),
                TakeProfit::new("TP3", 5050.0),
            ],
            risk_levels: vec![
                RiskLevel::new("Risk-1 trim to 50%", 3650.0, "trim_to_50"),
                RiskLevel::new("Risk-2 cut to 0-30%", 3520.0, "cut_to_0_30"),
            ],
            atr: AtrSettings::default(),
        }
    }
}

impl StrategyConfig {
    /// Reject configurations with inverted ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for band in &self.buy_bands {
            if band.low > band.high {
                return Err(ConfigError::InvertedBand {
                    name: band.name.to_string(),
                    low: band.low,
                    high: band.high,
                });
            }
        }
        if let Some(zone) = &self.confirm_zone {
            if zone.low > zone.high {
                return Err(ConfigError::InvertedConfirmZone {
                    low: zone.low,
                    high: zone.high,
                });
            }
        }
        if let Some([low, high]) = self.fair_value_band {
            if low > high {
                return Err(ConfigError::InvertedFairValueBand { low, high });
            }
        }
        Ok(())
    }

    /// Portfolio-level percentage for a plan fraction
    /// (e.g. 0.30 of an 18% plan -> 5.4).
    pub fn portfolio_pct(&self, target_plan_pct: f64) -> f64 {
        self.plan_max_pct * target_plan_pct * 100.0
    }
}
