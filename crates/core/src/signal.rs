//! Triggered-alert descriptions produced by the evaluator.

use crate::{Band, ConfirmZone, RiskLevel};
use compact_str::CompactString;

/// One triggered alert, carried in evaluator priority order:
/// buy bands, confirm zone, risk levels, then the volatility note.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Price entered a buy-accumulation band.
    BuyBand {
        name: CompactString,
        low: f64,
        high: f64,
        price: f64,
        target_plan_pct: f64,
    },
    /// Price sits inside the breakout confirmation zone.
    ConfirmZone { low: f64, high: f64, price: f64 },
    /// Price fell to or below a risk level.
    RiskLevel {
        name: CompactString,
        trigger: f64,
        price: f64,
        action: CompactString,
    },
    /// Volatility stop references; informational, repeats every
    /// qualifying cycle and never fires on its own.
    VolatilityStops { price: f64, volatility: f64 },
}

impl Signal {
    pub fn buy_band(band: &Band, price: f64) -> Self {
        Signal::BuyBand {
            name: band.name.clone(),
            low: band.low,
            high: band.high,
            price,
            target_plan_pct: band.target_plan_pct,
        }
    }

    pub fn confirm_zone(zone: &ConfirmZone, price: f64) -> Self {
        Signal::ConfirmZone {
            low: zone.low,
            high: zone.high,
            price,
        }
    }

    pub fn risk_level(level: &RiskLevel, price: f64) -> Self {
        Signal::RiskLevel {
            name: level.name.clone(),
            trigger: level.price,
            price,
            action: level.action.clone(),
        }
    }

    /// Once-guard key for this signal; None for informational signals
    /// that are never deduplicated.
    pub fn once_key(&self) -> Option<String> {
        match self {
            Signal::BuyBand { name, .. } => Some(format!("buy_{name}")),
            Signal::ConfirmZone { .. } => Some("upper_confirm".to_string()),
            Signal::RiskLevel { name, .. } => Some(format!("stop_{name}")),
            Signal::VolatilityStops { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_keys() {
        let band = Band::new("Band A", 3920.0, 3960.0, 0.30);
        let zone = ConfirmZone::new(4080.0, 4100.0);
        let level = RiskLevel::new("Risk-1 trim to 50%", 3650.0, "trim_to_50");

        assert_eq!(
            Signal::buy_band(&band, 3940.0).once_key().as_deref(),
            Some("buy_Band A")
        );
        assert_eq!(
            Signal::confirm_zone(&zone, 4090.0).once_key().as_deref(),
            Some("upper_confirm")
        );
        assert_eq!(
            Signal::risk_level(&level, 3600.0).once_key().as_deref(),
            Some("stop_Risk-1 trim to 50%")
        );
        assert_eq!(
            Signal::VolatilityStops {
                price: 4000.0,
                volatility: 20.0
            }
            .once_key(),
            None
        );
    }
}
