//! Remote Quote Provider
//!
//! The sync engine only needs daily closing quotes for a symbol from a start
//! date onward, so that is the whole trait surface. The default
//! implementation talks to the Yahoo chart API; tests substitute scripted
//! providers.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::constants::YAHOO_CHART_BASE_URL;
use crate::error::{Error, Result};

/// One daily closing quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// Remote price source consumed by the sync engine
///
/// May return an empty series; errors are surfaced to the caller and never
/// retried here.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_prices(&self, symbol: &str, start: NaiveDate) -> Result<Vec<Quote>>;
}

/// Quote provider backed by the Yahoo chart JSON endpoint
pub struct YahooChartClient {
    base_url: String,
    client: reqwest::Client,
}

impl YahooChartClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(YAHOO_CHART_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "Invalid provider base_url: must start with http:// or https://, got: '{}'",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; ledgerpull)")
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Extract daily closes from a chart API response
    fn parse_chart_response(payload: &Value) -> Result<Vec<Quote>> {
        if let Some(err) = payload.pointer("/chart/error") {
            if !err.is_null() {
                return Err(Error::Network(format!("Provider error: {}", err)));
            }
        }

        let result = payload
            .pointer("/chart/result/0")
            .ok_or_else(|| Error::Parse("Missing chart result in provider response".to_string()))?;

        let timestamps = result
            .get("timestamp")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let closes = result
            .pointer("/indicators/quote/0/close")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut quotes = Vec::new();
        for (ts, close) in timestamps.iter().zip(closes.iter()) {
            // null entries appear for holidays and half-days
            let (Some(ts), Some(close)) = (ts.as_i64(), close.as_f64()) else {
                continue;
            };
            let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
                continue;
            };
            let Some(close) = Decimal::from_f64(close) else {
                continue;
            };
            quotes.push(Quote { date, close });
        }

        Ok(quotes)
    }
}

#[async_trait]
impl QuoteProvider for YahooChartClient {
    async fn fetch_prices(&self, symbol: &str, start: NaiveDate) -> Result<Vec<Quote>> {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = Utc::now().timestamp();
        let url = format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            self.base_url, symbol, period1, period2
        );

        debug!("Fetching quotes: symbol={}, start={}, url={}", symbol, start, url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "Provider returned HTTP {} for {}",
                response.status(),
                symbol
            )));
        }

        let payload: Value = response.json().await?;
        Self::parse_chart_response(&payload)
    }
}
