//! Market observations and volatility-derived stop references.

use serde::{Deserialize, Serialize};

/// Single-cycle market snapshot produced by the data feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Last daily close
    pub price: f64,
    /// ATR-like estimate (mean daily high-low range); None when history is too short
    pub volatility: Option<f64>,
}

impl Observation {
    pub fn new(price: f64, volatility: Option<f64>) -> Self {
        Self { price, volatility }
    }

    /// Volatility as a percentage of price, when both are usable.
    pub fn volatility_pct(&self) -> Option<f64> {
        match self.volatility {
            Some(v) if v > 0.0 && self.price > 0.0 => Some(v / self.price * 100.0),
            _ => None,
        }
    }

    /// Stop references, present when volatility is known and positive.
    pub fn stop_refs(&self) -> Option<StopRefs> {
        match self.volatility {
            Some(v) if v > 0.0 => Some(StopRefs::new(self.price, v)),
            _ => None,
        }
    }
}

/// Reference stop prices at fixed volatility multiples below price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopRefs {
    /// Conservative 1.0x stop
    pub tight: f64,
    /// Standard 1.5x stop
    pub standard: f64,
    /// Loose 2.0x stop
    pub loose: f64,
}

impl StopRefs {
    pub fn new(price: f64, volatility: f64) -> Self {
        Self {
            tight: price - 1.0 * volatility,
            standard: price - 1.5 * volatility,
            loose: price - 2.0 * volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_refs_multiples() {
        // volatility 20 at price 4000 -> 3980 / 3970 / 3960
        let refs = StopRefs::new(4000.0, 20.0);
        assert_eq!(refs.tight, 3980.0);
        assert_eq!(refs.standard, 3970.0);
        assert_eq!(refs.loose, 3960.0);
    }

    #[test]
    fn test_observation_stop_refs_require_positive_volatility() {
        assert!(Observation::new(4000.0, Some(20.0)).stop_refs().is_some());
        assert!(Observation::new(4000.0, Some(0.0)).stop_refs().is_none());
        assert!(Observation::new(4000.0, None).stop_refs().is_none());
    }

    #[test]
    fn test_observation_volatility_pct() {
        let obs = Observation::new(4000.0, Some(20.0));
        assert_eq!(obs.volatility_pct(), Some(0.5));

        assert_eq!(Observation::new(4000.0, None).volatility_pct(), None);
        assert_eq!(Observation::new(0.0, Some(20.0)).volatility_pct(), None);
    }
}
