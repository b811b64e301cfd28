//! Canonical daily price history.
//!
//! Every provider's response is normalized into `PriceBar` rows and wrapped in
//! a `PriceHistory`: non-empty, unique by date, sorted most-recent-first.
//! Normalization is total (every bar carries the full canonical field set) and
//! idempotent (re-normalizing an already-normalized table is a no-op).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One trading day in the canonical schema.
///
/// Providers that don't report dividends/splits fill in the neutral values
/// (0.0 dividend, 1.0 split coefficient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
    pub dividend: f64,
    pub split: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no price rows to build a history from")]
    Empty,
}

/// Ordered daily history: unique dates, most recent first, never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    bars: Vec<PriceBar>,
}

impl PriceHistory {
    /// Normalize raw provider rows into a history.
    ///
    /// Duplicate dates keep the later entry (providers occasionally repeat the
    /// current session's bar); rows are sorted descending by date.
    pub fn new(mut bars: Vec<PriceBar>) -> Result<Self, HistoryError> {
        if bars.is_empty() {
            return Err(HistoryError::Empty);
        }

        // Stable sort ascending, then dedupe keeping the last occurrence of
        // each date, then flip to most-recent-first.
        bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(prev) if prev.date == bar.date => *prev = bar,
                _ => deduped.push(bar),
            }
        }
        deduped.reverse();

        Ok(Self { bars: deduped })
    }

    /// All bars, most recent first.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// The most recent bar.
    pub fn latest(&self) -> &PriceBar {
        &self.bars[0]
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// A history is never empty, but clippy wants the pair.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The `n` most recent bars (fewer if the history is shorter).
    pub fn head(&self, n: usize) -> &[PriceBar] {
        &self.bars[..n.min(self.bars.len())]
    }

    /// Close prices, most recent first.
    pub fn closes(&self) -> impl DoubleEndedIterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }
}

/// Lookback period for a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    M1,
    M3,
    M6,
    Y1,
    Y2,
}

impl Period {
    pub const ALL: [Period; 5] = [Period::M1, Period::M3, Period::M6, Period::Y1, Period::Y2];

    /// Provider-facing spelling (`1mo`, `3mo`, `6mo`, `1y`, `2y`).
    pub fn as_str(self) -> &'static str {
        match self {
            Period::M1 => "1mo",
            Period::M3 => "3mo",
            Period::M6 => "6mo",
            Period::Y1 => "1y",
            Period::Y2 => "2y",
        }
    }

    /// Approximate calendar length, for providers that take a date range.
    pub fn approx_days(self) -> i64 {
        match self {
            Period::M1 => 31,
            Period::M3 => 92,
            Period::M6 => 183,
            Period::Y1 => 365,
            Period::Y2 => 730,
        }
    }

    /// The next period in the selector cycle (wraps around).
    pub fn next(self) -> Period {
        match self {
            Period::M1 => Period::M3,
            Period::M3 => Period::M6,
            Period::M6 => Period::Y1,
            Period::Y1 => Period::Y2,
            Period::Y2 => Period::M1,
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::M6
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1mo" => Ok(Period::M1),
            "3mo" => Ok(Period::M3),
            "6mo" => Ok(Period::M6),
            "1y" => Ok(Period::Y1),
            "2y" => Ok(Period::Y2),
            other => Err(format!(
                "unknown period '{other}' (expected 1mo, 3mo, 6mo, 1y, or 2y)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: NaiveDate, close: f64) -> PriceBar {
        PriceBar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            adj_close: close,
            volume: 1_000,
            dividend: 0.0,
            split: 1.0,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(PriceHistory::new(vec![]).unwrap_err(), HistoryError::Empty);
    }

    #[test]
    fn sorts_most_recent_first() {
        let h = PriceHistory::new(vec![
            bar(d(2024, 1, 2), 10.0),
            bar(d(2024, 1, 4), 12.0),
            bar(d(2024, 1, 3), 11.0),
        ])
        .unwrap();

        let dates: Vec<NaiveDate> = h.bars().iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![d(2024, 1, 4), d(2024, 1, 3), d(2024, 1, 2)]);
        assert_eq!(h.latest().close, 12.0);
    }

    #[test]
    fn duplicate_dates_keep_later_entry() {
        let h = PriceHistory::new(vec![
            bar(d(2024, 1, 2), 10.0),
            bar(d(2024, 1, 2), 10.5),
        ])
        .unwrap();

        assert_eq!(h.len(), 1);
        assert_eq!(h.latest().close, 10.5);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = PriceHistory::new(vec![
            bar(d(2024, 1, 3), 11.0),
            bar(d(2024, 1, 2), 10.0),
        ])
        .unwrap();
        let twice = PriceHistory::new(once.bars().to_vec()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn head_clamps_to_length() {
        let h = PriceHistory::new(vec![
            bar(d(2024, 1, 2), 10.0),
            bar(d(2024, 1, 3), 11.0),
        ])
        .unwrap();
        assert_eq!(h.head(1).len(), 1);
        assert_eq!(h.head(50).len(), 2);
    }

    #[test]
    fn period_roundtrip() {
        for p in Period::ALL {
            assert_eq!(p.as_str().parse::<Period>().unwrap(), p);
        }
        assert!("7mo".parse::<Period>().is_err());
    }

    #[test]
    fn period_cycle_wraps() {
        assert_eq!(Period::Y2.next(), Period::M1);
        assert_eq!(Period::M6.next(), Period::Y1);
    }
}
