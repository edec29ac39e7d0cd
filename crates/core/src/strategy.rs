//! Price bands, levels and zones that make up the strategy.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Plan fraction suggested when the confirm zone holds (30% of plan weight).
pub const CONFIRM_TARGET_PLAN_PCT: f64 = 0.30;

/// Inclusive price range where a staged accumulation buy is suggested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Display name (e.g., "Band A")
    pub name: CompactString,
    /// Lower bound, inclusive
    pub low: f64,
    /// Upper bound, inclusive
    pub high: f64,
    /// Target allocation as a fraction of the plan-max weight (0.30 = 30% of plan)
    pub target_plan_pct: f64,
}

impl Band {
    /// Create a new buy band.
    pub fn new(name: &str, low: f64, high: f64, target_plan_pct: f64) -> Self {
        Self {
            name: CompactString::new(name),
            low,
            high,
            target_plan_pct,
        }
    }

    /// Check whether a price lies inside the band, bounds included.
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}

/// Two-bound range used to confirm a breakout before adding exposure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfirmZone {
    /// Lower bound, inclusive
    pub low: f64,
    /// Upper bound, inclusive
    pub high: f64,
}

impl ConfirmZone {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Check whether a price lies inside the zone, bounds included.
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}

/// One-sided price threshold triggering a defensive action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLevel {
    /// Display name (e.g., "Risk-1 trim to 50%")
    pub name: CompactString,
    /// Trigger price; the level fires at or below it
    pub price: f64,
    /// Action tag resolved through [`crate::action::action_label`]
    pub action: CompactString,
}

impl RiskLevel {
    /// Create a new risk level.
    pub fn new(name: &str, price: f64, action: &str) -> Self {
        Self {
            name: CompactString::new(name),
            price,
            action: CompactString::new(action),
        }
    }

    /// One-sided check: breached when price is at or below the trigger.
    #[inline]
    pub fn is_breached(&self, price: f64) -> bool {
        price <= self.price
    }
}

/// Take-profit marker, listed in status summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeProfit {
    pub name: CompactString,
    pub price: f64,
}

impl TakeProfit {
    pub fn new(name: &str, price: f64) -> Self {
        Self {
            name: CompactString::new(name),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Band tests ===

    #[test]
    fn test_band_contains_inclusive_bounds() {
        let band = Band::new("Band A", 3920.0, 3960.0, 0.30);

        // Strictly inside
        assert!(band.contains(3940.0));
        // Both bounds are inclusive
        assert!(band.contains(3920.0));
        assert!(band.contains(3960.0));
        // Outside either end
        assert!(!band.contains(3919.99));
        assert!(!band.contains(3960.01));
    }

    // === ConfirmZone tests ===

    #[test]
    fn test_confirm_zone_contains() {
        let zone = ConfirmZone::new(4080.0, 4100.0);

        assert!(zone.contains(4080.0));
        assert!(zone.contains(4090.0));
        assert!(zone.contains(4100.0));
        assert!(!zone.contains(4079.0));
        assert!(!zone.contains(4101.0));
    }

    // === RiskLevel tests ===

    #[test]
    fn test_risk_level_one_sided() {
        let level = RiskLevel::new("Risk-2 cut to 0-30%", 3520.0, "cut_to_0_30");

        // Fires at or below the trigger, not above
        assert!(level.is_breached(3500.0));
        assert!(level.is_breached(3520.0));
        assert!(!level.is_breached(3520.01));
    }
}
