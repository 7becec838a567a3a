//! Alpha Vantage Client
//!
//! Live quotes from the `TIME_SERIES_DAILY` endpoint. The latest close is the
//! price; the return compares it with the close roughly one trading year
//! (252 sessions) earlier, or the oldest close available when the series is
//! shorter.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::QuoteProvider;
use crate::error::{AdvisorError, Result};
use crate::metrics::round_one;
use crate::model::{Quote, QuoteSource};

const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Trading sessions in a year
const TRADING_YEAR: usize = 252;

#[derive(Clone, Debug)]
pub struct AlphaVantageConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Sessions between the base close and the latest close
    pub lookback_sessions: usize,
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        Self {
            api_key: "demo".into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 10,
            lookback_sessions: TRADING_YEAR,
        }
    }
}

impl AlphaVantageConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("ALPHA_VANTAGE_API_KEY").unwrap_or(defaults.api_key),
            base_url: std::env::var("ALPHA_VANTAGE_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: std::env::var("ALPHA_VANTAGE_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            ..defaults
        }
    }
}

/// Live quote provider backed by Alpha Vantage
pub struct AlphaVantageClient {
    http: reqwest::Client,
    config: AlphaVantageConfig,
}

impl AlphaVantageClient {
    pub fn new(config: AlphaVantageConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AdvisorError::Config("ALPHA_VANTAGE_API_KEY is empty".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(AlphaVantageConfig::from_env())
    }

    pub const fn config(&self) -> &AlphaVantageConfig {
        &self.config
    }
}

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<BTreeMap<String, DailyBar>>,

    #[serde(rename = "Note")]
    note: Option<String>,

    #[serde(rename = "Information")]
    information: Option<String>,

    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

/// Turn a raw response body into a quote, or explain why it is unusable
fn parse_series(ticker: &str, body: DailySeriesResponse, lookback: usize) -> Result<Quote> {
    if let Some(message) = body.error_message {
        return Err(AdvisorError::UpstreamUnavailable(format!("{ticker}: {message}")));
    }
    // Rate-limit and premium-endpoint notices come back as 200s
    if let Some(notice) = body.note.or(body.information) {
        return Err(AdvisorError::UpstreamUnavailable(format!("{ticker}: {notice}")));
    }
    let series = body.time_series.ok_or_else(|| {
        AdvisorError::UpstreamUnavailable(format!("{ticker}: response has no daily series"))
    })?;

    // ISO dates sort chronologically
    let closes: Vec<&DailyBar> = series.values().collect();
    if closes.len() < 2 {
        return Err(AdvisorError::UpstreamUnavailable(format!(
            "{ticker}: need at least two closes, got {}",
            closes.len()
        )));
    }

    let latest = parse_close(ticker, closes[closes.len() - 1])?;
    let base = parse_close(ticker, closes[closes.len().saturating_sub(lookback.max(1))])?;
    if base <= Decimal::ZERO {
        return Err(AdvisorError::UpstreamUnavailable(format!("{ticker}: base close is zero")));
    }

    let percent_return = round_one((latest - base) / base * dec!(100));
    Ok(Quote::new(ticker, latest, percent_return, QuoteSource::Live))
}

fn parse_close(ticker: &str, bar: &DailyBar) -> Result<Decimal> {
    bar.close.trim().parse::<Decimal>().map_err(|e| {
        AdvisorError::UpstreamUnavailable(format!("{ticker}: bad close '{}': {e}", bar.close))
    })
}

#[async_trait]
impl QuoteProvider for AlphaVantageClient {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote> {
        let symbol = ticker.trim().to_uppercase();
        tracing::info!(ticker = %symbol, "fetching daily series from Alpha Vantage");

        let body: DailySeriesResponse = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol.as_str()),
                ("apikey", self.config.api_key.as_str()),
                ("outputsize", "compact"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let quote = parse_series(&symbol, body, self.config.lookback_sessions)?;
        tracing::info!(
            ticker = %symbol,
            price = %quote.price,
            percent_return = %quote.percent_return,
            "fetched live quote"
        );
        Ok(quote)
    }

    async fn health_check(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    fn name(&self) -> &str {
        "AlphaVantage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> DailySeriesResponse {
        serde_json::from_str(json).unwrap()
    }

    const THREE_DAYS: &str = r#"{
        "Meta Data": {"2. Symbol": "IBM"},
        "Time Series (Daily)": {
            "2024-03-01": {"1. open": "100.0", "4. close": "100.0000", "5. volume": "10"},
            "2024-03-04": {"1. open": "101.0", "4. close": "104.5000", "5. volume": "11"},
            "2024-03-05": {"1. open": "110.0", "4. close": "110.0000", "5. volume": "12"}
        }
    }"#;

    #[test]
    fn test_return_against_oldest_when_series_is_short() {
        let quote = parse_series("IBM", body(THREE_DAYS), TRADING_YEAR).unwrap();
        assert_eq!(quote.ticker, "IBM");
        assert_eq!(quote.price, dec!(110));
        assert_eq!(quote.percent_return, dec!(10));
        assert_eq!(quote.source, QuoteSource::Live);
    }

    #[test]
    fn test_return_against_lookback_close() {
        // lookback 2 of 3 closes: base is 2024-03-04 at 104.5
        let quote = parse_series("IBM", body(THREE_DAYS), 2).unwrap();
        // (110 - 104.5) / 104.5 * 100 = 5.263...
        assert_eq!(quote.percent_return, dec!(5.3));
    }

    #[test]
    fn test_zero_lookback_compares_latest_to_itself() {
        let quote = parse_series("IBM", body(THREE_DAYS), 0).unwrap();
        assert_eq!(quote.price, dec!(110));
        assert_eq!(quote.percent_return, Decimal::ZERO);
    }

    #[test]
    fn test_rate_limit_note_is_upstream_failure() {
        let result = parse_series(
            "IBM",
            body(r#"{"Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#),
            TRADING_YEAR,
        );
        assert!(matches!(
            result,
            Err(AdvisorError::UpstreamUnavailable(msg)) if msg.contains("rate limit")
        ));
    }

    #[test]
    fn test_error_message_is_upstream_failure() {
        let result = parse_series(
            "NOPE",
            body(r#"{"Error Message": "Invalid API call."}"#),
            TRADING_YEAR,
        );
        assert!(matches!(
            result,
            Err(AdvisorError::UpstreamUnavailable(msg)) if msg.contains("Invalid API call")
        ));
    }

    #[test]
    fn test_single_close_is_not_enough() {
        let result = parse_series(
            "IBM",
            body(r#"{"Time Series (Daily)": {"2024-03-05": {"4. close": "110.0"}}}"#),
            TRADING_YEAR,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unparseable_close() {
        let result = parse_series(
            "IBM",
            body(r#"{"Time Series (Daily)": {
                "2024-03-04": {"4. close": "n/a"},
                "2024-03-05": {"4. close": "110.0"}
            }}"#),
            TRADING_YEAR,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_api_key_is_config_error() {
        let config = AlphaVantageConfig {
            api_key: " ".into(),
            ..Default::default()
        };
        assert!(matches!(AlphaVantageClient::new(config), Err(AdvisorError::Config(_))));
    }
}
