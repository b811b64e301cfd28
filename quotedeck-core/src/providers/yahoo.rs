//! Yahoo Finance data provider (secondary source).
//!
//! Fetches daily OHLCV bars plus dividend/split events from Yahoo's v8 chart
//! API. Yahoo Finance has no official API and is subject to unannounced
//! format changes, which is why it sits behind the primary provider as the
//! fallback. A single attempt only — the resolver never retries this source.

use super::{FetchError, QuoteProvider};
use crate::history::{Period, PriceBar};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
    events: Option<Events>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct Events {
    dividends: Option<HashMap<String, DividendEvent>>,
    splits: Option<HashMap<String, SplitEvent>>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct SplitEvent {
    date: i64,
    numerator: f64,
    denominator: f64,
}

/// Yahoo Finance provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Chart API URL for a symbol and lookback period.
    fn chart_url(symbol: &str, period: Period) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?range={range}&interval=1d&includeAdjustedClose=true&events=div%7Csplit",
            range = period.as_str()
        )
    }

    /// Convert the chart response into canonical bars.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<PriceBar>, FetchError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    FetchError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    FetchError::Malformed(format!("{}: {}", err.code, err.description))
                }
            } else {
                FetchError::Malformed("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Malformed("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| FetchError::Malformed("no timestamps".into()))?;

        let (dividends, splits) = event_maps(data.events);

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Malformed("no quote data".into()))?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = ts_to_date(ts)?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();
            let adj_close = adj_closes
                .as_ref()
                .and_then(|v| v.get(i).copied().flatten());

            // All-null rows are holidays/non-trading days.
            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            let close = close.unwrap_or(f64::NAN);
            bars.push(PriceBar {
                date,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close,
                adj_close: adj_close.unwrap_or(close),
                volume: volume.unwrap_or(0),
                dividend: dividends.get(&date).copied().unwrap_or(0.0),
                split: splits.get(&date).copied().unwrap_or(1.0),
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

/// Flatten the events block into per-date dividend amounts and split ratios.
fn event_maps(
    events: Option<Events>,
) -> (HashMap<NaiveDate, f64>, HashMap<NaiveDate, f64>) {
    let mut dividends = HashMap::new();
    let mut splits = HashMap::new();

    if let Some(events) = events {
        for ev in events.dividends.unwrap_or_default().into_values() {
            if let Ok(date) = ts_to_date(ev.date) {
                dividends.insert(date, ev.amount);
            }
        }
        for ev in events.splits.unwrap_or_default().into_values() {
            if let Ok(date) = ts_to_date(ev.date) {
                if ev.denominator != 0.0 {
                    splits.insert(date, ev.numerator / ev.denominator);
                }
            }
        }
    }

    (dividends, splits)
}

fn ts_to_date(ts: i64) -> Result<NaiveDate, FetchError> {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.naive_utc().date())
        .ok_or_else(|| FetchError::Malformed(format!("invalid timestamp: {ts}")))
}

impl QuoteProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str, period: Period) -> Result<Vec<PriceBar>, FetchError> {
        let url = Self::chart_url(symbol, period);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited(format!("HTTP 429 for {symbol}")));
        }
        // Yahoo reports unknown symbols as 404 with a JSON error body; let the
        // body classification decide when it parses, otherwise fall through.
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::Network(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            FetchError::Malformed(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, chart)
    }
}
