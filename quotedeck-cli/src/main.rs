//! QuoteDeck CLI — one-shot ticker lookups for scripts and sanity checks.
//!
//! Commands:
//! - `quote` — resolve a symbol (Alpha Vantage with retry, Yahoo Finance
//!   fallback) and print the metrics block plus the head of the price table.
//!
//! Retry and fallback progress goes to stderr; a terminal failure exits
//! non-zero with both providers' failure reasons.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use quotedeck_core::memo::MemoStore;
use quotedeck_core::{
    Config, Period, PriceBar, QuoteMetrics, Resolver, StderrProgress,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "quotedeck", about = "QuoteDeck CLI — stock quote lookup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch recent daily history for a symbol and print a summary.
    Quote {
        /// Ticker symbol (e.g., AAPL).
        symbol: String,

        /// Lookback period: 1mo, 3mo, 6mo, 1y, 2y.
        #[arg(long, default_value = "6mo")]
        period: Period,

        /// Primary-provider attempt limit.
        #[arg(long)]
        attempts: Option<u32>,

        /// Rows of the price table to print.
        #[arg(long, default_value_t = 10)]
        rows: usize,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Bypass the in-memory memo: always hit the network.
        #[arg(long, default_value_t = false)]
        no_memo: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Quote {
            symbol,
            period,
            attempts,
            rows,
            config,
            no_memo,
        } => run_quote(&symbol, period, attempts, rows, config, no_memo),
    }
}

fn run_quote(
    symbol: &str,
    period: Period,
    attempts: Option<u32>,
    rows: usize,
    config_path: Option<PathBuf>,
    no_memo: bool,
) -> Result<()> {
    let config = Config::load(config_path.as_deref())?;

    let mut resolver = Resolver::from_config(&config);
    if let Some(attempts) = attempts {
        resolver = resolver.with_max_attempts(attempts);
    }
    if no_memo {
        // A zero freshness window means every entry is stale on arrival.
        resolver = resolver.with_memo(MemoStore::new(Duration::ZERO));
    }

    let quote = match resolver.resolve(symbol, period, &mut StderrProgress) {
        Ok(quote) => quote,
        Err(e) => bail!("{e}"),
    };

    let metrics = QuoteMetrics::from_history(&quote.history);

    println!("{} — {} ({})", quote.symbol, quote.source_label(), period);
    println!(
        "Last close: ${:.2}  ({:+.2} / {:+.2}%)",
        metrics.latest_close, metrics.change, metrics.percent_change
    );
    println!(
        "MA20: {}   MA50: {}   Last volume: {}",
        fmt_ma(metrics.ma20),
        fmt_ma(metrics.ma50),
        fmt_volume(metrics.last_volume)
    );
    println!();

    print_table(quote.history.head(rows));
    Ok(())
}

fn print_table(bars: &[PriceBar]) {
    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "date", "open", "high", "low", "close", "adj close", "volume"
    );
    for bar in bars {
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12}",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.adj_close,
            fmt_volume(bar.volume)
        );
    }
}

fn fmt_ma(ma: Option<f64>) -> String {
    match ma {
        Some(v) => format!("{v:.2}"),
        None => "unavailable".to_string(),
    }
}

/// Thousands-separated volume, e.g. 58414460 → "58,414,460".
fn fmt_volume(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_grouping() {
        assert_eq!(fmt_volume(0), "0");
        assert_eq!(fmt_volume(999), "999");
        assert_eq!(fmt_volume(1_000), "1,000");
        assert_eq!(fmt_volume(58_414_460), "58,414,460");
    }

    #[test]
    fn ma_display() {
        assert_eq!(fmt_ma(Some(182.114)), "182.11");
        assert_eq!(fmt_ma(None), "unavailable");
    }

    #[test]
    fn quote_args_parse() {
        let cli = Cli::try_parse_from([
            "quotedeck", "quote", "AAPL", "--period", "1y", "--attempts", "5", "--no-memo",
        ])
        .unwrap();
        let Commands::Quote {
            symbol,
            period,
            attempts,
            rows,
            no_memo,
            ..
        } = cli.command;
        assert_eq!(symbol, "AAPL");
        assert_eq!(period, Period::Y1);
        assert_eq!(attempts, Some(5));
        assert_eq!(rows, 10);
        assert!(no_memo);
    }

    #[test]
    fn memo_bypass_is_off_by_default() {
        let cli = Cli::try_parse_from(["quotedeck", "quote", "AAPL"]).unwrap();
        let Commands::Quote { no_memo, .. } = cli.command;
        assert!(!no_memo);
    }
}
