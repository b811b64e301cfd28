//! Time-boxed memo of resolved quotes.
//!
//! A lookup for the same (symbol, period) within the freshness window is
//! served from memory instead of touching the network. Entries are explicit
//! (value, timestamp) pairs; staleness is checked on access and stale entries
//! are dropped lazily. The store lives for the process only — nothing is
//! persisted.

use crate::history::Period;
use crate::providers::Quote;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemoKey {
    symbol: String,
    period: Period,
}

#[derive(Debug)]
struct MemoEntry {
    quote: Quote,
    stored_at: Instant,
}

/// In-memory (symbol, period) → quote store with a fixed freshness window.
#[derive(Debug)]
pub struct MemoStore {
    entries: HashMap<MemoKey, MemoEntry>,
    ttl: Duration,
}

impl MemoStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Default freshness window: 60 seconds.
    pub fn default_window() -> Self {
        Self::new(Duration::from_secs(60))
    }

    /// Return a fresh quote for the key, if one exists.
    ///
    /// The returned quote is flagged `from_memo` so the UI can label it.
    pub fn get(&mut self, symbol: &str, period: Period) -> Option<Quote> {
        let key = MemoKey {
            symbol: symbol.to_string(),
            period,
        };
        match self.entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                let mut quote = entry.quote.clone();
                quote.from_memo = true;
                Some(quote)
            }
            Some(_) => {
                self.entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Store a freshly resolved quote, replacing any previous entry.
    pub fn put(&mut self, period: Period, quote: Quote) {
        let key = MemoKey {
            symbol: quote.symbol.clone(),
            period,
        };
        self.entries.insert(
            key,
            MemoEntry {
                quote,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{PriceBar, PriceHistory};
    use crate::providers::ProviderKind;
    use chrono::NaiveDate;

    fn quote(symbol: &str) -> Quote {
        let bar = PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            adj_close: 100.5,
            volume: 1_000,
            dividend: 0.0,
            split: 1.0,
        };
        Quote {
            symbol: symbol.to_string(),
            history: PriceHistory::new(vec![bar]).unwrap(),
            source: ProviderKind::AlphaVantage,
            from_memo: false,
        }
    }

    #[test]
    fn fresh_entry_is_returned_and_flagged() {
        let mut memo = MemoStore::new(Duration::from_secs(60));
        memo.put(Period::M6, quote("AAPL"));

        let hit = memo.get("AAPL", Period::M6).unwrap();
        assert!(hit.from_memo);
        assert_eq!(hit.symbol, "AAPL");
        assert_eq!(hit.source, ProviderKind::AlphaVantage);
    }

    #[test]
    fn different_period_misses() {
        let mut memo = MemoStore::new(Duration::from_secs(60));
        memo.put(Period::M1, quote("AAPL"));
        assert!(memo.get("AAPL", Period::Y2).is_none());
    }

    #[test]
    fn unknown_symbol_misses() {
        let mut memo = MemoStore::new(Duration::from_secs(60));
        memo.put(Period::M6, quote("AAPL"));
        assert!(memo.get("MSFT", Period::M6).is_none());
    }

    #[test]
    fn stale_entry_is_dropped() {
        let mut memo = MemoStore::new(Duration::from_millis(10));
        memo.put(Period::M6, quote("AAPL"));
        std::thread::sleep(Duration::from_millis(15));

        assert!(memo.get("AAPL", Period::M6).is_none());
        assert!(memo.is_empty());
    }

    #[test]
    fn zero_window_never_serves_hits() {
        let mut memo = MemoStore::new(Duration::ZERO);
        memo.put(Period::M6, quote("AAPL"));
        assert!(memo.get("AAPL", Period::M6).is_none());
    }

    #[test]
    fn put_replaces_previous_entry() {
        let mut memo = MemoStore::new(Duration::from_secs(60));
        memo.put(Period::M6, quote("AAPL"));
        let mut newer = quote("AAPL");
        newer.source = ProviderKind::YahooFinance;
        memo.put(Period::M6, newer);

        assert_eq!(memo.len(), 1);
        let hit = memo.get("AAPL", Period::M6).unwrap();
        assert_eq!(hit.source, ProviderKind::YahooFinance);
    }
}
