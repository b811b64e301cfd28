//! Fetch-and-fallback resolver.
//!
//! Given a symbol and lookback period, tries the primary provider up to a
//! fixed number of attempts with exponential backoff (`base * 2^attempt`,
//! no jitter), then the secondary provider exactly once. Only exhaustion of
//! both providers surfaces as an error, carrying both failure reasons. The
//! whole routine is synchronous and single-threaded: backoff blocks the
//! caller, and progress callbacks are how the UI reports the wait.

use crate::config::Config;
use crate::history::{HistoryError, Period, PriceHistory};
use crate::memo::MemoStore;
use crate::providers::{
    AlphaVantageProvider, FetchError, ProviderKind, Quote, QuoteProvider, YahooProvider,
};
use std::time::Duration;
use thiserror::Error;

/// Terminal resolver failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no symbol given")]
    EmptySymbol,

    #[error("all sources exhausted — primary: {primary}; secondary: {secondary}")]
    AllSourcesExhausted {
        primary: FetchError,
        secondary: FetchError,
    },
}

/// Blocking-sleep seam. Production uses the thread sleeper; tests record
/// the requested delays instead of waiting them out.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the calling thread.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Progress callbacks for a single resolution.
///
/// Recoverable primary failures are reported here as warnings, not surfaced
/// as errors; the fallback switch is likewise visible before it happens.
pub trait ResolveProgress {
    /// A primary attempt failed and another one will run after `wait`.
    fn on_retry(&mut self, attempt: u32, max_attempts: u32, error: &FetchError, wait: Duration);

    /// The primary chain is exhausted; the secondary is about to be tried.
    fn on_fallback(&mut self, primary_error: &FetchError);

    /// The quote was served from the memo; no network call happened.
    fn on_memo_hit(&mut self, symbol: &str);
}

/// Discards all progress events.
pub struct SilentProgress;

impl ResolveProgress for SilentProgress {
    fn on_retry(&mut self, _: u32, _: u32, _: &FetchError, _: Duration) {}
    fn on_fallback(&mut self, _: &FetchError) {}
    fn on_memo_hit(&mut self, _: &str) {}
}

/// Prints progress to stderr; used by the CLI.
pub struct StderrProgress;

impl ResolveProgress for StderrProgress {
    fn on_retry(&mut self, attempt: u32, max_attempts: u32, error: &FetchError, wait: Duration) {
        eprintln!(
            "attempt {attempt}/{max_attempts} failed: {error}; retrying in {}s...",
            wait.as_secs()
        );
    }

    fn on_fallback(&mut self, primary_error: &FetchError) {
        eprintln!("primary exhausted ({primary_error}); trying Yahoo Finance...");
    }

    fn on_memo_hit(&mut self, symbol: &str) {
        eprintln!("{symbol}: serving cached result");
    }
}

/// The fetch-and-fallback resolver.
pub struct Resolver {
    primary: Box<dyn QuoteProvider>,
    secondary: Box<dyn QuoteProvider>,
    max_primary_attempts: u32,
    backoff_base: Duration,
    memo: MemoStore,
    sleeper: Box<dyn Sleeper>,
}

impl Resolver {
    pub fn new(primary: Box<dyn QuoteProvider>, secondary: Box<dyn QuoteProvider>) -> Self {
        Self {
            primary,
            secondary,
            max_primary_attempts: 3,
            backoff_base: Duration::from_secs(1),
            memo: MemoStore::default_window(),
            sleeper: Box::new(ThreadSleeper),
        }
    }

    /// Wire up the real providers from configuration.
    pub fn from_config(config: &Config) -> Self {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        Self::new(
            Box::new(AlphaVantageProvider::new(config.api_key.clone(), timeout)),
            Box::new(YahooProvider::new(timeout)),
        )
        .with_max_attempts(config.max_primary_attempts)
        .with_backoff_base(Duration::from_secs(config.backoff_base_secs))
        .with_memo(MemoStore::new(Duration::from_secs(config.memo_ttl_secs)))
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_primary_attempts = attempts.max(1);
        self
    }

    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    pub fn with_memo(mut self, memo: MemoStore) -> Self {
        self.memo = memo;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Resolve a symbol to a quote: memo, then primary with retry, then
    /// secondary once.
    pub fn resolve(
        &mut self,
        symbol: &str,
        period: Period,
        progress: &mut dyn ResolveProgress,
    ) -> Result<Quote, ResolveError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ResolveError::EmptySymbol);
        }

        if let Some(quote) = self.memo.get(&symbol, period) {
            progress.on_memo_hit(&symbol);
            return Ok(quote);
        }

        let primary_error = match self.try_primary(&symbol, period, progress) {
            Ok(quote) => {
                self.memo.put(period, quote.clone());
                return Ok(quote);
            }
            Err(e) => e,
        };

        // Single fallback attempt; never retried, never back to primary.
        progress.on_fallback(&primary_error);
        match fetch_quote(self.secondary.as_ref(), &symbol, period, ProviderKind::YahooFinance) {
            Ok(quote) => {
                self.memo.put(period, quote.clone());
                Ok(quote)
            }
            Err(secondary_error) => Err(ResolveError::AllSourcesExhausted {
                primary: primary_error,
                secondary: secondary_error,
            }),
        }
    }

    /// Primary loop: attempts 1..=max, sleeping `base * 2^attempt` between
    /// attempt `i` and `i+1` (no sleep after the last failure).
    fn try_primary(
        &mut self,
        symbol: &str,
        period: Period,
        progress: &mut dyn ResolveProgress,
    ) -> Result<Quote, FetchError> {
        let mut last_error = None;

        for attempt in 1..=self.max_primary_attempts {
            match fetch_quote(self.primary.as_ref(), symbol, period, ProviderKind::AlphaVantage) {
                Ok(quote) => return Ok(quote),
                Err(e) => {
                    if attempt < self.max_primary_attempts {
                        // Saturate past attempt 31 instead of overflowing.
                        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
                        let wait = self.backoff_base * factor;
                        progress.on_retry(attempt, self.max_primary_attempts, &e, wait);
                        self.sleeper.sleep(wait);
                    }
                    last_error = Some(e);
                }
            }
        }

        // max_primary_attempts >= 1, so at least one error was recorded.
        Err(last_error.unwrap_or(FetchError::Malformed("no attempts made".into())))
    }
}

/// Fetch from one provider and normalize into a quote.
fn fetch_quote(
    provider: &dyn QuoteProvider,
    symbol: &str,
    period: Period,
    source: ProviderKind,
) -> Result<Quote, FetchError> {
    let bars = provider.fetch(symbol, period)?;
    let history = PriceHistory::new(bars).map_err(|HistoryError::Empty| {
        FetchError::EmptyHistory {
            symbol: symbol.to_string(),
        }
    })?;
    Ok(Quote {
        symbol: symbol.to_string(),
        history,
        source,
        from_memo: false,
    })
}
