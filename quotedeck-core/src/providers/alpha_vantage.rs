//! Alpha Vantage data provider (primary source).
//!
//! Fetches the `TIME_SERIES_DAILY_ADJUSTED` endpoint. Alpha Vantage signals
//! problems in-band: a 200 response whose body carries a `Note`/`Information`
//! key (quota exceeded), an `Error Message` key (unknown symbol), or simply
//! lacks the daily-series key. Classification happens on the typed response,
//! not by substring matching.
//!
//! The free tier returns ~100 most recent rows (`outputsize=compact`)
//! regardless of the requested period; period-based trimming is left to the
//! consumer.

use super::{FetchError, QuoteProvider};
use crate::history::{Period, PriceBar};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

const QUERY_URL: &str = "https://www.alphavantage.co/query";

/// Daily-adjusted response body. Exactly one of the optional keys is
/// expected to be present.
#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, DailyFields>>,
}

/// One day's fields. Alpha Vantage serializes every number as a string.
#[derive(Debug, Deserialize)]
struct DailyFields {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. adjusted close")]
    adjusted_close: String,
    #[serde(rename = "6. volume")]
    volume: String,
    #[serde(rename = "7. dividend amount")]
    dividend: String,
    #[serde(rename = "8. split coefficient")]
    split: String,
}

/// Alpha Vantage provider.
pub struct AlphaVantageProvider {
    client: reqwest::blocking::Client,
    api_key: Option<String>,
}

impl AlphaVantageProvider {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quotedeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, api_key }
    }

    /// Classify and convert a response body into canonical bars.
    fn parse_body(symbol: &str, body: &str) -> Result<Vec<PriceBar>, FetchError> {
        let resp: DailyResponse = serde_json::from_str(body)
            .map_err(|e| FetchError::Malformed(format!("not a daily-series response: {e}")))?;

        // "Note" is the classic quota message; newer keys arrive as "Information".
        if let Some(note) = resp.note.or(resp.information) {
            return Err(FetchError::RateLimited(note));
        }
        if resp.error_message.is_some() {
            return Err(FetchError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let series = resp.series.ok_or_else(|| {
            FetchError::Malformed("response lacks the \"Time Series (Daily)\" key".into())
        })?;

        let mut bars = Vec::with_capacity(series.len());
        for (date_str, fields) in &series {
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                FetchError::Malformed(format!("bad date key '{date_str}': {e}"))
            })?;
            bars.push(PriceBar {
                date,
                open: parse_field("open", &fields.open)?,
                high: parse_field("high", &fields.high)?,
                low: parse_field("low", &fields.low)?,
                close: parse_field("close", &fields.close)?,
                adj_close: parse_field("adjusted close", &fields.adjusted_close)?,
                volume: parse_field("volume", &fields.volume)? as u64,
                dividend: parse_field("dividend amount", &fields.dividend)?,
                split: parse_field("split coefficient", &fields.split)?,
            });
        }

        if bars.is_empty() {
            return Err(FetchError::EmptyHistory {
                symbol: symbol.to_string(),
            });
        }

        Ok(bars)
    }
}

fn parse_field(name: &str, raw: &str) -> Result<f64, FetchError> {
    raw.parse::<f64>()
        .map_err(|_| FetchError::Malformed(format!("non-numeric {name} field: '{raw}'")))
}

impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "alpha_vantage"
    }

    fn fetch(&self, symbol: &str, _period: Period) -> Result<Vec<PriceBar>, FetchError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            FetchError::MissingApiKey {
                provider: "alpha_vantage".into(),
            }
        })?;

        let resp = self
            .client
            .get(QUERY_URL)
            .query(&[
                ("function", "TIME_SERIES_DAILY_ADJUSTED"),
                ("symbol", symbol),
                ("outputsize", "compact"),
                ("apikey", api_key),
            ])
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!("HTTP {status} for {symbol}")));
        }

        let body = resp
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Self::parse_body(symbol, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_BODY: &str = r#"{
        "Meta Data": { "2. Symbol": "AAPL" },
        "Time Series (Daily)": {
            "2024-01-03": {
                "1. open": "184.22", "2. high": "185.88", "3. low": "183.43",
                "4. close": "184.25", "5. adjusted close": "183.92",
                "6. volume": "58414460", "7. dividend amount": "0.0000",
                "8. split coefficient": "1.0"
            },
            "2024-01-02": {
                "1. open": "187.15", "2. high": "188.44", "3. low": "183.89",
                "4. close": "185.64", "5. adjusted close": "185.31",
                "6. volume": "82488700", "7. dividend amount": "0.2400",
                "8. split coefficient": "1.0"
            }
        }
    }"#;

    #[test]
    fn parses_daily_series() {
        let bars = AlphaVantageProvider::parse_body("AAPL", GOOD_BODY).unwrap();
        assert_eq!(bars.len(), 2);

        // BTreeMap iteration gives ascending dates; normalization happens later.
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].close, 185.64);
        assert_eq!(bars[0].dividend, 0.24);
        assert_eq!(bars[1].volume, 58_414_460);
        assert_eq!(bars[1].adj_close, 183.92);
        assert_eq!(bars[1].split, 1.0);
    }

    #[test]
    fn note_is_rate_limited() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 25 requests per day."}"#;
        let err = AlphaVantageProvider::parse_body("AAPL", body).unwrap_err();
        assert!(matches!(err, FetchError::RateLimited(_)));
    }

    #[test]
    fn information_is_rate_limited() {
        let body = r#"{"Information": "API rate limit reached."}"#;
        let err = AlphaVantageProvider::parse_body("AAPL", body).unwrap_err();
        assert!(matches!(err, FetchError::RateLimited(_)));
    }

    #[test]
    fn error_message_is_symbol_not_found() {
        let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#;
        let err = AlphaVantageProvider::parse_body("NOPE", body).unwrap_err();
        assert_eq!(
            err,
            FetchError::SymbolNotFound {
                symbol: "NOPE".into()
            }
        );
    }

    #[test]
    fn missing_series_key_is_malformed() {
        let body = r#"{"Meta Data": {"2. Symbol": "AAPL"}}"#;
        let err = AlphaVantageProvider::parse_body("AAPL", body).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = AlphaVantageProvider::parse_body("AAPL", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn empty_series_is_empty_history() {
        let body = r#"{"Time Series (Daily)": {}}"#;
        let err = AlphaVantageProvider::parse_body("AAPL", body).unwrap_err();
        assert_eq!(
            err,
            FetchError::EmptyHistory {
                symbol: "AAPL".into()
            }
        );
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let body = r#"{
            "Time Series (Daily)": {
                "2024-01-02": {
                    "1. open": "n/a", "2. high": "1", "3. low": "1",
                    "4. close": "1", "5. adjusted close": "1",
                    "6. volume": "1", "7. dividend amount": "0",
                    "8. split coefficient": "1"
                }
            }
        }"#;
        let err = AlphaVantageProvider::parse_body("AAPL", body).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn missing_api_key_fails_before_any_request() {
        let provider = AlphaVantageProvider::new(None, Duration::from_secs(1));
        let err = provider.fetch("AAPL", Period::M6).unwrap_err();
        assert_eq!(
            err,
            FetchError::MissingApiKey {
                provider: "alpha_vantage".into()
            }
        );
    }
}
