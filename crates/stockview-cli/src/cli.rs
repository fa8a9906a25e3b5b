//! CLI argument definitions for stockview.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `view` | Fetch and chart up to two symbols side by side |
//! | `intervals` | List the selectable intervals and their bar sizes |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `chart` | Output format (chart, table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | provider defaults | Per-request timeout override |
//!
//! # Examples
//!
//! ```bash
//! # Previous close for two symbols
//! stockview view AAPL MSFT
//!
//! # Hourly candles over two days
//! stockview view MSFT --interval "1 hour" --from 2023-11-28 --to 2023-11-29
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use time::Date;

/// Two-panel stock price viewer backed by Polygon.io aggregates.
///
/// Requires STOCKVIEW_POLYGON_API_KEY in the environment.
#[derive(Debug, Parser)]
#[command(
    name = "stockview",
    author,
    version,
    about = "Two-panel stock price viewer",
    long_about = "stockview fetches previous-close or intraday aggregates for up to two \
ticker symbols from Polygon.io and renders each as a candlestick chart.\n\
\n\
Set STOCKVIEW_POLYGON_API_KEY before running. RUST_LOG controls diagnostics on stderr."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Chart)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Override both provider request timeouts, in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII candlestick chart per panel.
    Chart,
    /// One OHLC row per bar.
    Table,
    /// Single JSON document with both panels.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and render up to two symbols side by side.
    ///
    /// # Examples
    ///
    ///   stockview view AAPL
    ///   stockview view AAPL MSFT --interval "5 minute" --from 2024-03-01 --to 2024-03-01
    View(ViewArgs),

    /// List the selectable intervals.
    Intervals,
}

/// Arguments for the `view` command.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Symbol for panel 1. Leave empty to skip the panel.
    #[arg(default_value = "")]
    pub symbol1: String,

    /// Symbol for panel 2. Leave empty to skip the panel.
    #[arg(default_value = "")]
    pub symbol2: String,

    /// Interval label: Real-time, 1 minute, 5 minute, 15 minute, 30 minute or 1 hour.
    #[arg(long, short = 'i', default_value = "Real-time")]
    pub interval: String,

    /// First calendar day of a historical query (YYYY-MM-DD).
    #[arg(long, default_value = "2023-11-28", value_parser = stockview_core::parse_iso_date)]
    pub from: Date,

    /// Last calendar day of a historical query (YYYY-MM-DD, default today UTC).
    #[arg(long, value_parser = stockview_core::parse_iso_date)]
    pub to: Option<Date>,
}
