//! Simple indicators over a resolved history.
//!
//! MA-N is the arithmetic mean of the N most recent closes and is only
//! reported when at least N rows exist — a short window is "unavailable",
//! never a truncated mean. A single-row history is zero change by contract
//! (as is a zero previous close), not an error.

use crate::history::PriceHistory;

/// Snapshot of the dashboard metrics for one history.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteMetrics {
    pub latest_close: f64,
    pub previous_close: f64,
    pub change: f64,
    pub percent_change: f64,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    pub last_volume: u64,
}

impl QuoteMetrics {
    pub fn from_history(history: &PriceHistory) -> Self {
        let bars = history.bars();
        let latest_close = bars[0].close;
        let previous_close = bars.get(1).map_or(latest_close, |b| b.close);

        let change = latest_close - previous_close;
        let percent_change = if previous_close == 0.0 {
            0.0
        } else {
            change / previous_close * 100.0
        };

        Self {
            latest_close,
            previous_close,
            change,
            percent_change,
            ma20: moving_average(history, 20),
            ma50: moving_average(history, 50),
            last_volume: bars[0].volume,
        }
    }
}

/// MA-N over the N most recent closes; `None` when fewer than N rows exist.
pub fn moving_average(history: &PriceHistory, n: usize) -> Option<f64> {
    if n == 0 || history.len() < n {
        return None;
    }
    let sum: f64 = history.head(n).iter().map(|b| b.close).sum();
    Some(sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{PriceBar, PriceHistory};
    use chrono::NaiveDate;

    /// Most-recent-first closes → history (dates descend from 2024-06-28).
    fn history_from_closes(closes: &[f64]) -> PriceHistory {
        let start = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        let bars: Vec<PriceBar> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start - chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                adj_close: close,
                volume: 500 + i as u64,
                dividend: 0.0,
                split: 1.0,
            })
            .collect();
        PriceHistory::new(bars).unwrap()
    }

    #[test]
    fn change_and_percent() {
        let m = QuoteMetrics::from_history(&history_from_closes(&[110.0, 100.0]));
        assert_eq!(m.change, 10.0);
        assert_eq!(m.percent_change, 10.0);
        assert_eq!(m.latest_close, 110.0);
        assert_eq!(m.previous_close, 100.0);
    }

    #[test]
    fn single_row_is_zero_change() {
        let m = QuoteMetrics::from_history(&history_from_closes(&[110.0]));
        assert_eq!(m.change, 0.0);
        assert_eq!(m.percent_change, 0.0);
        assert_eq!(m.previous_close, 110.0);
    }

    #[test]
    fn zero_previous_close_is_zero_percent() {
        let m = QuoteMetrics::from_history(&history_from_closes(&[5.0, 0.0]));
        assert_eq!(m.change, 5.0);
        assert_eq!(m.percent_change, 0.0);
    }

    #[test]
    fn ma_exact_window() {
        let h = history_from_closes(&[10.0, 12.0, 14.0]);
        assert_eq!(moving_average(&h, 3), Some(12.0));
    }

    #[test]
    fn ma_short_history_is_unavailable() {
        let h = history_from_closes(&[10.0, 12.0, 14.0]);
        assert_eq!(moving_average(&h, 4), None);
    }

    #[test]
    fn ma_uses_most_recent_closes() {
        let h = history_from_closes(&[1.0, 2.0, 3.0, 100.0, 200.0]);
        assert_eq!(moving_average(&h, 3), Some(2.0));
    }

    #[test]
    fn ma20_ma50_availability() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let m = QuoteMetrics::from_history(&history_from_closes(&closes));
        assert!(m.ma20.is_some());
        assert_eq!(m.ma50, None);
        assert_eq!(m.last_volume, 500);
    }
}
