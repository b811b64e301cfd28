//! Data provider trait and the failure classifier.
//!
//! The `QuoteProvider` trait abstracts over the two real sources (Alpha
//! Vantage, Yahoo Finance) so the resolver can be exercised with scripted
//! providers in tests. The resolver sits above this trait — providers know
//! nothing about retries, fallback, or the memo.

pub mod alpha_vantage;
pub mod yahoo;

pub use alpha_vantage::AlphaVantageProvider;
pub use yahoo::YahooProvider;

use crate::history::{Period, PriceBar, PriceHistory};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classified fetch failure.
///
/// Every variant is uniformly recoverable as far as the retry policy is
/// concerned; the variants exist so the UI can say *why* an attempt failed
/// and tests can assert on the classification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no rows returned for {symbol}")]
    EmptyHistory { symbol: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("no API key configured for {provider}")]
    MissingApiKey { provider: String },
}

/// Which source produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    AlphaVantage,
    YahooFinance,
}

impl ProviderKind {
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::AlphaVantage => "Alpha Vantage",
            ProviderKind::YahooFinance => "Yahoo Finance",
        }
    }
}

/// A successfully resolved quote: the normalized history plus its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub history: PriceHistory,
    pub source: ProviderKind,
    /// True when the quote was served from the memo instead of the network.
    pub from_memo: bool,
}

impl Quote {
    /// Display label, e.g. "Alpha Vantage" or "Yahoo Finance (cached)".
    pub fn source_label(&self) -> String {
        if self.from_memo {
            format!("{} (cached)", self.source.label())
        } else {
            self.source.label().to_string()
        }
    }
}

/// Trait for daily-history providers.
pub trait QuoteProvider {
    /// Human-readable name, used in progress messages and errors.
    fn name(&self) -> &str;

    /// Fetch raw daily bars for a symbol over a lookback period.
    ///
    /// Returned rows are raw: order and duplicates are the provider's
    /// business; the caller normalizes via `PriceHistory::new`.
    fn fetch(&self, symbol: &str, period: Period) -> Result<Vec<PriceBar>, FetchError>;
}
