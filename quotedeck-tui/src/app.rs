//! Application state — single-owner, main-thread only.
//!
//! The resolver is invoked synchronously from the main loop (one fetch per
//! user action, blocking through backoff), so there is no worker thread and
//! no channel plumbing. Progress events are collected during the blocking
//! call and land in the status log, which renders on the next frame.

use chrono::NaiveTime;
use quotedeck_core::{
    FetchError, Period, Quote, QuoteMetrics, ResolveProgress, Resolver,
};
use std::time::Duration;

/// How many table rows the dashboard shows at most.
pub const TABLE_ROW_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// One line in the status log.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub time: NaiveTime,
    pub level: StatusLevel,
    pub message: String,
}

/// Collects resolver progress for display after the blocking call returns.
#[derive(Default)]
struct LogCollector {
    lines: Vec<(StatusLevel, String)>,
}

impl ResolveProgress for LogCollector {
    fn on_retry(&mut self, attempt: u32, max_attempts: u32, error: &FetchError, wait: Duration) {
        self.lines.push((
            StatusLevel::Warning,
            format!(
                "attempt {attempt}/{max_attempts} failed: {error}; retrying in {}s",
                wait.as_secs()
            ),
        ));
    }

    fn on_fallback(&mut self, primary_error: &FetchError) {
        self.lines.push((
            StatusLevel::Warning,
            format!("primary exhausted ({primary_error}); falling back to Yahoo Finance"),
        ));
    }

    fn on_memo_hit(&mut self, symbol: &str) {
        self.lines
            .push((StatusLevel::Info, format!("{symbol}: cached result")));
    }
}

/// All dashboard state.
pub struct AppState {
    resolver: Resolver,
    pub running: bool,
    pub symbol_input: String,
    pub period: Period,
    pub quote: Option<Quote>,
    pub metrics: Option<QuoteMetrics>,
    pub log: Vec<StatusLine>,
    pub table_scroll: usize,
    pub fetching: bool,
    fetch_requested: bool,
}

impl AppState {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            running: true,
            symbol_input: String::new(),
            period: Period::default(),
            quote: None,
            metrics: None,
            log: Vec::new(),
            table_scroll: 0,
            fetching: false,
            fetch_requested: false,
        }
    }

    pub fn push_log(&mut self, level: StatusLevel, message: String) {
        self.log.push(StatusLine {
            time: chrono::Local::now().time(),
            level,
            message,
        });
        // Keep the log bounded; only the tail renders anyway.
        if self.log.len() > 200 {
            self.log.drain(..self.log.len() - 200);
        }
    }

    /// Ask for a fetch; the main loop draws one frame (so the "fetching"
    /// notice is visible) and then runs it.
    pub fn request_fetch(&mut self) {
        if self.symbol_input.trim().is_empty() {
            self.push_log(StatusLevel::Error, "enter a symbol first".into());
            return;
        }
        self.fetch_requested = true;
        self.fetching = true;
        let msg = format!(
            "fetching {} ({})...",
            self.symbol_input.trim().to_uppercase(),
            self.period
        );
        self.push_log(StatusLevel::Info, msg);
    }

    pub fn take_fetch_request(&mut self) -> bool {
        std::mem::take(&mut self.fetch_requested)
    }

    /// Run the blocking resolve. On failure the previous result is cleared —
    /// the dashboard never shows a chart or table for a failed lookup.
    pub fn run_fetch(&mut self) {
        let symbol = self.symbol_input.clone();
        let period = self.period;
        let mut collector = LogCollector::default();

        let outcome = self.resolver.resolve(&symbol, period, &mut collector);

        for (level, message) in collector.lines {
            self.push_log(level, message);
        }
        self.fetching = false;

        match outcome {
            Ok(quote) => {
                self.push_log(
                    StatusLevel::Info,
                    format!(
                        "{}: {} rows from {}",
                        quote.symbol,
                        quote.history.len(),
                        quote.source_label()
                    ),
                );
                self.metrics = Some(QuoteMetrics::from_history(&quote.history));
                self.quote = Some(quote);
                self.table_scroll = 0;
            }
            Err(e) => {
                self.quote = None;
                self.metrics = None;
                self.table_scroll = 0;
                self.push_log(StatusLevel::Error, e.to_string());
            }
        }
    }

    /// Number of rows the table panel can show (cap, then history length).
    pub fn table_len(&self) -> usize {
        self.quote
            .as_ref()
            .map_or(0, |q| q.history.len().min(TABLE_ROW_CAP))
    }

    pub fn scroll_down(&mut self) {
        if self.table_scroll + 1 < self.table_len() {
            self.table_scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.table_scroll = self.table_scroll.saturating_sub(1);
    }

    pub fn cycle_period(&mut self) {
        self.period = self.period.next();
    }

    pub fn push_symbol_char(&mut self, c: char) {
        if self.symbol_input.len() < 12 && (c.is_ascii_alphanumeric() || c == '.' || c == '-') {
            self.symbol_input.push(c.to_ascii_uppercase());
        }
    }

    pub fn pop_symbol_char(&mut self) {
        self.symbol_input.pop();
    }
}
