//! Signal evaluation: buy bands, confirm zone, risk levels, volatility note.

use crate::state::AlertState;
use goldwatch_core::{Observation, Signal, StrategyConfig};

/// Evaluate one observation against the strategy.
///
/// Emits alerts in fixed priority order (buy bands in declared order,
/// confirm zone, risk levels in declared order, then the volatility
/// note) and consumes the once-guard for each alert it emits. An empty
/// result means the cycle is a no-op and the state needs no
/// persistence.
pub fn evaluate(
    config: &StrategyConfig,
    obs: &Observation,
    state: &mut AlertState,
) -> Vec<Signal> {
    let mut signals = Vec::new();

    // Bands are checked independently; overlap is a configuration
    // concern, not enforced here
    for band in &config.buy_bands {
        if band.contains(obs.price) {
            push_guarded(config, state, &mut signals, Signal::buy_band(band, obs.price));
        }
    }

    if let Some(zone) = &config.confirm_zone {
        if zone.contains(obs.price) {
            push_guarded(config, state, &mut signals, Signal::confirm_zone(zone, obs.price));
        }
    }

    for level in &config.risk_levels {
        if level.is_breached(obs.price) {
            push_guarded(config, state, &mut signals, Signal::risk_level(level, obs.price));
        }
    }

    // Informational only: rides along with real alerts, never stands alone
    if !signals.is_empty() {
        if let Some(volatility) = obs.volatility {
            if volatility > 0.0 {
                signals.push(Signal::VolatilityStops {
                    price: obs.price,
                    volatility,
                });
            }
        }
    }

    signals
}

/// Append a signal if its once-guard allows it, consuming the guard.
fn push_guarded(
    config: &StrategyConfig,
    state: &mut AlertState,
    signals: &mut Vec<Signal>,
    signal: Signal,
) {
    match signal.once_key() {
        Some(key) => {
            if !config.notify_once_per_band || !state.is_notified(&key) {
                state.mark_notified(key);
                signals.push(signal);
            }
        }
        None => signals.push(signal),
    }
}
