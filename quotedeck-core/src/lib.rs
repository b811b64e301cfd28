//! QuoteDeck Core — ticker lookup with retry and provider fallback.
//!
//! This crate contains everything below the UI:
//! - Canonical daily price history model (`history`)
//! - Data providers: Alpha Vantage (primary) and Yahoo Finance (secondary)
//! - Fetch-and-fallback resolver with bounded exponential backoff (`resolver`)
//! - Time-boxed in-memory memo of resolved quotes (`memo`)
//! - Simple indicators: last price, percent change, MA-N (`metrics`)
//! - TOML/env configuration (`config`)

pub mod config;
pub mod history;
pub mod memo;
pub mod metrics;
pub mod providers;
pub mod resolver;

pub use config::Config;
pub use history::{HistoryError, Period, PriceBar, PriceHistory};
pub use metrics::QuoteMetrics;
pub use providers::{FetchError, ProviderKind, Quote, QuoteProvider};
pub use resolver::{
    ResolveError, ResolveProgress, Resolver, SilentProgress, StderrProgress,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types that cross the UI boundary are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<history::PriceBar>();
        require_sync::<history::PriceBar>();
        require_send::<history::PriceHistory>();
        require_sync::<history::PriceHistory>();
        require_send::<providers::Quote>();
        require_sync::<providers::Quote>();
        require_send::<providers::FetchError>();
        require_sync::<providers::FetchError>();
        require_send::<resolver::ResolveError>();
        require_sync::<resolver::ResolveError>();
        require_send::<metrics::QuoteMetrics>();
        require_sync::<metrics::QuoteMetrics>();
        require_send::<config::Config>();
        require_sync::<config::Config>();
    }
}
