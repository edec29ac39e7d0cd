//! Yahoo Finance market-data fetcher.
//!
//! Pulls daily candles from the v8 chart API and reduces them to the
//! single observation a cycle needs: last close plus an ATR-like mean
//! of the daily high-low range.

use crate::error::FeedError;
use goldwatch_core::Observation;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://query1.finance.yahoo.com";
/// The chart API rejects requests without a browser-looking user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";
/// Fixed per-request timeout; calls are attempted exactly once.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Never request fewer days than this, so short lookbacks still span
/// enough trading sessions.
const MIN_RANGE_DAYS: u32 = 20;

/// Yahoo Finance REST client for daily price history.
pub struct YahooFinance {
    http: reqwest::Client,
}

impl YahooFinance {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the latest observation for a symbol.
    ///
    /// Fails when the chart API returns no usable rows for the symbol.
    /// A missing volatility estimate alone is not an error; the
    /// observation simply carries `None`.
    pub async fn fetch_observation(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Observation, FeedError> {
        let range_days = (lookback_days + 2).max(MIN_RANGE_DAYS);
        let url = format!(
            "{}/v8/finance/chart/{}?range={}d&interval=1d",
            BASE_URL, symbol, range_days
        );
        debug!(symbol = symbol, range_days = range_days, "Fetching daily candles");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FeedError::ParseError(e.to_string()))?;

        parse_chart(&json, symbol, lookback_days as usize)
    }
}

impl Default for YahooFinance {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduce a chart API payload to an observation.
///
/// Price is the last non-null close. Volatility is the mean of the last
/// `lookback` daily (high - low) ranges; rows with a missing bound are
/// skipped, and fewer than `lookback` usable rows yield `None`.
fn parse_chart(
    json: &serde_json::Value,
    symbol: &str,
    lookback: usize,
) -> Result<Observation, FeedError> {
    let result = &json["chart"]["result"][0];
    if result.is_null() {
        return Err(FeedError::NoData(symbol.to_string()));
    }

    let quote = &result["indicators"]["quote"][0];
    let closes = quote["close"]
        .as_array()
        .ok_or_else(|| FeedError::NoData(symbol.to_string()))?;
    let price = closes
        .iter()
        .rev()
        .find_map(|v| v.as_f64())
        .ok_or_else(|| FeedError::NoData(symbol.to_string()))?;

    let empty = Vec::new();
    let highs = quote["high"].as_array().unwrap_or(&empty);
    let lows = quote["low"].as_array().unwrap_or(&empty);
    let ranges: Vec<f64> = highs
        .iter()
        .zip(lows.iter())
        .filter_map(|(h, l)| Some(h.as_f64()? - l.as_f64()?))
        .collect();

    let volatility = if lookback > 0 && ranges.len() >= lookback {
        let window = &ranges[ranges.len() - lookback..];
        Some(window.iter().sum::<f64>() / lookback as f64)
    } else {
        debug!(
            symbol = symbol,
            rows = ranges.len(),
            "Not enough history for a volatility estimate"
        );
        None
    };

    Ok(Observation::new(price, volatility))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart_payload(
        closes: Vec<serde_json::Value>,
        highs: Vec<serde_json::Value>,
        lows: Vec<serde_json::Value>,
    ) -> serde_json::Value {
        json!({
            "chart": {
                "result": [{
                    "indicators": {
                        "quote": [{
                            "close": closes,
                            "high": highs,
                            "low": lows
                        }]
                    }
                }],
                "error": null
            }
        })
    }

    #[test]
    fn test_parse_chart_last_close_and_mean_range() {
        let payload = chart_payload(
            vec![json!(3990.0), json!(3995.0), json!(4000.0)],
            vec![json!(4010.0), json!(4015.0), json!(4020.0)],
            vec![json!(3990.0), json!(3985.0), json!(4010.0)],
        );

        let obs = parse_chart(&payload, "GC=F", 2).unwrap();
        assert_eq!(obs.price, 4000.0);
        // Last two ranges: 30 and 10 -> mean 20
        assert_eq!(obs.volatility, Some(20.0));
    }

    #[test]
    fn test_parse_chart_skips_trailing_null_close() {
        let payload = chart_payload(
            vec![json!(3990.0), json!(4000.0), json!(null)],
            vec![json!(4010.0), json!(4020.0), json!(null)],
            vec![json!(3990.0), json!(4010.0), json!(null)],
        );

        let obs = parse_chart(&payload, "GC=F", 2).unwrap();
        assert_eq!(obs.price, 4000.0);
    }

    #[test]
    fn test_parse_chart_insufficient_history_degrades() {
        let payload = chart_payload(
            vec![json!(4000.0)],
            vec![json!(4020.0)],
            vec![json!(4010.0)],
        );

        // One usable range against a 14-day window: price-only observation
        let obs = parse_chart(&payload, "GC=F", 14).unwrap();
        assert_eq!(obs.price, 4000.0);
        assert_eq!(obs.volatility, None);
    }

    #[test]
    fn test_parse_chart_empty_result_is_no_data() {
        let payload = json!({"chart": {"result": null, "error": {"code": "Not Found"}}});
        assert!(matches!(
            parse_chart(&payload, "NOPE", 14),
            Err(FeedError::NoData(_))
        ));
    }

    #[test]
    fn test_parse_chart_all_null_closes_is_no_data() {
        let payload = chart_payload(
            vec![json!(null), json!(null)],
            vec![json!(null), json!(null)],
            vec![json!(null), json!(null)],
        );
        assert!(matches!(
            parse_chart(&payload, "GC=F", 14),
            Err(FeedError::NoData(_))
        ));
    }
}
