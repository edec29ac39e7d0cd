//! Message rendering for Telegram.
//!
//! Pure formatting: identical inputs produce byte-identical text, so
//! pushes are reproducible and the renderers are directly testable.
//! Numbers use fixed US-style precision per field.

use goldwatch_core::{
    action_label, Observation, Signal, StopRefs, StrategyConfig, CONFIRM_TARGET_PLAN_PCT,
};

/// Title used by explicit status pushes.
pub const STATUS_TITLE: &str = "Gold Trend | Status";
/// Title used by quiet-period heartbeats.
pub const HEARTBEAT_TITLE: &str = "Gold Trend | Heartbeat";
/// Title used when realtime signals fired.
pub const SIGNALS_TITLE: &str = "Gold Trend | Signals";

/// Render the full strategy summary under the given title.
///
/// Covers price, the volatility block (omitted when no usable
/// estimate exists), the plan and fair-value section, every buy band
/// with its plan and portfolio percentages, take-profit and risk
/// listings, and the confirm-zone lines.
pub fn render_status(config: &StrategyConfig, obs: &Observation, title: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    out.push(format!("*{title}*  "));
    out.push(format!("Price: *{:.2}* USD/oz", obs.price));

    if let Some(volatility) = obs.volatility.filter(|v| *v > 0.0) {
        let refs = StopRefs::new(obs.price, volatility);
        let pct = obs.volatility_pct().unwrap_or(0.0);
        out.push(format!(
            "ATR({}): ~*{:.1}* (*{:.2}%*)",
            config.atr.lookback_days, volatility, pct
        ));
        out.push(format!(
            "Dynamic refs (ATR): 1.0x~*{:.0}*, 1.5x~*{:.0}*, 2.0x~*{:.0}*",
            refs.tight, refs.standard, refs.loose
        ));
        out.push(format!(
            "Stops (pick one):\n\
             - Conservative 1.0x: ~*{:.0}* - tight risk / short-term\n\
             - Standard    1.5x: ~*{:.0}* - default choice\n\
             - Loose       2.0x: ~*{:.0}* - more room / smaller size",
            refs.tight, refs.standard, refs.loose
        ));
        out.push("How to use: if close < your stop -> cut 50-100% per plan.".to_string());
    }

    out.push("--- Plan ---".to_string());
    out.push(format!(
        "- Plan max gold weight: *{:.1}%* of total portfolio",
        config.plan_max_pct * 100.0
    ));
    if let Some([low, high]) = config.fair_value_band {
        out.push(format!(
            "- Fair-value band (3-5y view): *{low:.0}-{high:.0}* USD/oz"
        ));
    }

    out.push("--- Rules ---".to_string());
    out.push("*Buy bands*:".to_string());
    if let Some(zone) = &config.confirm_zone {
        out.push(format!(
            "- Upper confirm: {:.0}-{:.0} -> build to *30% plan* (~*{:.1}%* of portfolio, if holds)",
            zone.low,
            zone.high,
            config.portfolio_pct(CONFIRM_TARGET_PLAN_PCT)
        ));
    }
    for band in &config.buy_bands {
        out.push(format!(
            "- {}: {:.0}-{:.0} -> target *{:.0}% plan* (~*{:.1}%* of portfolio)",
            band.name,
            band.low,
            band.high,
            band.target_plan_pct * 100.0,
            config.portfolio_pct(band.target_plan_pct)
        ));
    }

    let take_profits = config
        .take_profits
        .iter()
        .map(|tp| format!("{}", tp.price))
        .collect::<Vec<_>>()
        .join(", ");
    out.push(format!("*Take profit*: {take_profits}"));

    let risks = config
        .risk_levels
        .iter()
        .map(|level| format!("{}@{}", level.name, level.price))
        .collect::<Vec<_>>()
        .join("; ");
    out.push(format!("*Risk*: {risks}"));

    if let Some(zone) = &config.confirm_zone {
        out.push(format!(
            "*Upper confirm*: {}-{} (if holds, consider add to 70-80%)",
            zone.low, zone.high
        ));
    }

    out.join("\n")
}

/// Render one triggered alert.
pub fn render_signal(config: &StrategyConfig, signal: &Signal) -> String {
    match signal {
        Signal::BuyBand {
            name,
            low,
            high,
            price,
            target_plan_pct,
        } => format!(
            "Enter buy band *{}* {}-{} | price *{:.2}* -> target *{:.0}% plan* (~*{:.1}%* of portfolio, scale in)",
            name,
            low,
            high,
            price,
            target_plan_pct * 100.0,
            config.portfolio_pct(*target_plan_pct)
        ),
        Signal::ConfirmZone { low, high, price } => format!(
            "In upper confirm {}-{} | price *{:.2}* -> if holds, consider build to *30% plan* (~*{:.1}%* of portfolio)",
            low,
            high,
            price,
            config.portfolio_pct(CONFIRM_TARGET_PLAN_PCT)
        ),
        Signal::RiskLevel {
            name,
            trigger,
            price,
            action,
        } => format!(
            "Risk level *{}* @ {} | price *{:.2}* -> {}",
            name,
            trigger,
            price,
            action_label(action)
        ),
        Signal::VolatilityStops { price, volatility } => {
            let refs = StopRefs::new(*price, *volatility);
            format!(
                "Stops (pick one):\n\
                 - Conservative 1.0x: ~*{:.0}*\n\
                 - Standard    1.5x: ~*{:.0}*\n\
                 - Loose       2.0x: ~*{:.0}*\n\n\
                 Rule: if close < your stop -> cut 50-100% per plan.",
                refs.tight, refs.standard, refs.loose
            )
        }
    }
}

/// Render the realtime-signal report: status header plus every alert
/// in evaluator order, blank-line separated.
pub fn render_signal_report(
    config: &StrategyConfig,
    obs: &Observation,
    messages: &[String],
) -> String {
    let header = render_status(config, obs, SIGNALS_TITLE);
    format!(
        "{}\n\n--- Realtime signals ---\n{}",
        header,
        messages.join("\n\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldwatch_core::{Band, RiskLevel};

    // === Status rendering ===

    #[test]
    fn test_status_is_byte_stable() {
        let config = StrategyConfig::default();
        let obs = Observation::new(3987.55, Some(21.3));

        let first = render_status(&config, &obs, STATUS_TITLE);
        let second = render_status(&config, &obs, STATUS_TITLE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_status_lists_plan_and_levels() {
        let config = StrategyConfig::default();
        let obs = Observation::new(4000.0, None);
        let text = render_status(&config, &obs, STATUS_TITLE);

        assert!(text.starts_with("*Gold Trend | Status*"));
        assert!(text.contains("Price: *4000.00* USD/oz"));
        assert!(text.contains("- Plan max gold weight: *18.0%* of total portfolio"));
        assert!(text.contains("- Fair-value band (3-5y view): *3600-4200* USD/oz"));
        assert!(text.contains("- Band A: 3920-3960 -> target *30% plan* (~*5.4%* of portfolio)"));
        assert!(text.contains("- Band C: 3780-3850 -> target *100% plan* (~*18.0%* of portfolio)"));
        assert!(text.contains("*Take profit*: 4600, 4850, 5050"));
        assert!(text.contains("*Risk*: Risk-1 trim to 50%@3650; Risk-2 cut to 0-30%@3520"));
        assert!(text.contains("*Upper confirm*: 4080-4100 (if holds, consider add to 70-80%)"));
    }

    #[test]
    fn test_status_volatility_block() {
        let config = StrategyConfig::default();
        let obs = Observation::new(4000.0, Some(20.0));
        let text = render_status(&config, &obs, STATUS_TITLE);

        assert!(text.contains("ATR(14): ~*20.0* (*0.50%*)"));
        assert!(text.contains("Dynamic refs (ATR): 1.0x~*3980*, 1.5x~*3970*, 2.0x~*3960*"));
    }

    #[test]
    fn test_status_omits_volatility_block_when_absent() {
        let config = StrategyConfig::default();
        let obs = Observation::new(4000.0, None);
        let text = render_status(&config, &obs, STATUS_TITLE);

        assert!(!text.contains("ATR("));
        assert!(!text.contains("Stops (pick one)"));
    }

    // === Signal rendering ===

    #[test]
    fn test_buy_band_signal_carries_plan_and_portfolio_pct() {
        let config = StrategyConfig::default();
        let band = Band::new("Band A", 3920.0, 3960.0, 0.30);
        let text = render_signal(&config, &Signal::buy_band(&band, 3940.0));

        // 30% of an 18% plan is 5.4% of the portfolio
        assert_eq!(
            text,
            "Enter buy band *Band A* 3920-3960 | price *3940.00* -> target *30% plan* (~*5.4%* of portfolio, scale in)"
        );
    }

    #[test]
    fn test_risk_signal_maps_action_tag() {
        let config = StrategyConfig::default();
        let level = RiskLevel::new("Risk-2 cut to 0-30%", 3520.0, "cut_to_0_30");
        let text = render_signal(&config, &Signal::risk_level(&level, 3500.0));

        assert_eq!(
            text,
            "Risk level *Risk-2 cut to 0-30%* @ 3520 | price *3500.00* -> Cut position to 0-30%, re-evaluate"
        );
    }

    #[test]
    fn test_risk_signal_unknown_tag_uses_generic_label() {
        let config = StrategyConfig::default();
        let level = RiskLevel::new("Risk-X", 3400.0, "do_something_else");
        let text = render_signal(&config, &Signal::risk_level(&level, 3390.0));

        assert!(text.ends_with("-> Risk action"));
    }

    #[test]
    fn test_volatility_signal_stop_references() {
        let config = StrategyConfig::default();
        let text = render_signal(
            &config,
            &Signal::VolatilityStops {
                price: 4000.0,
                volatility: 20.0,
            },
        );

        assert!(text.contains("- Conservative 1.0x: ~*3980*"));
        assert!(text.contains("- Standard    1.5x: ~*3970*"));
        assert!(text.contains("- Loose       2.0x: ~*3960*"));
    }

    #[test]
    fn test_signal_report_layout() {
        let config = StrategyConfig::default();
        let obs = Observation::new(3940.0, None);
        let messages = vec!["first alert".to_string(), "second alert".to_string()];
        let text = render_signal_report(&config, &obs, &messages);

        assert!(text.starts_with("*Gold Trend | Signals*"));
        assert!(text.contains("--- Realtime signals ---\nfirst alert\n\nsecond alert"));
    }
}
