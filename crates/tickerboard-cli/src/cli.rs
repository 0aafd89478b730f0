//! CLI argument definitions for tickerboard.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `show` | Fetch one ticker and render its dashboard |
//! | `ranges` | List chart ranges and their trading-day counts |
//! | `session` | Interactive dashboard driven from stdin |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--base-url` | env / `http://127.0.0.1:5000` | Backend base URL |
//! | `--timeout-ms` | env / `10000` | Request timeout in ms |
//! | `--ma-window` | env / `50` | Moving average window |
//! | `--mock` | `false` | Serve the built-in demo data offline |
//!
//! # Examples
//!
//! ```bash
//! tickerboard show AAPL --range 6M
//! tickerboard --mock show nvda --format json --pretty
//! tickerboard --mock session
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Terminal stock dashboard: closing prices with a moving average overlay.
#[derive(Debug, Parser)]
#[command(
    name = "tickerboard",
    author,
    version,
    about = "Terminal stock dashboard with range selection and moving averages"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Backend base URL serving /api/stock_data/{ticker}.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Moving average window in trading days.
    #[arg(long, global = true)]
    pub ma_window: Option<usize>,

    /// Answer requests from the built-in demo data (AAPL, MSFT, NVDA).
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Chart width in columns.
    #[arg(long, global = true, default_value_t = 72)]
    pub width: usize,

    /// Chart height in rows.
    #[arg(long, global = true, default_value_t = 16)]
    pub height: usize,

    /// Enable debug logging on stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Company panel and character chart.
    Table,
    /// JSON document with metadata.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a ticker and render its dashboard once.
    ///
    /// # Examples
    ///
    ///   tickerboard show
    ///   tickerboard show MSFT --range 5Y
    Show(ShowArgs),

    /// List chart ranges and the trading days each covers.
    Ranges,

    /// Interactive dashboard.
    ///
    /// Each input line is either a ticker to search, a range (1M, 6M, 1Y, 5Y,
    /// optionally prefixed with ':'), 'reload', 'help', or 'quit'.
    Session(SessionArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Ticker to show (defaults to TICKERBOARD_DEFAULT_TICKER or AAPL).
    pub ticker: Option<String>,

    /// Chart range: 1M, 6M, 1Y or 5Y.
    #[arg(long)]
    pub range: Option<String>,
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Ticker loaded at startup.
    #[arg(long)]
    pub ticker: Option<String>,

    /// Initial chart range: 1M, 6M, 1Y or 5Y.
    #[arg(long)]
    pub range: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "tickerboard",
            "show",
            "nvda",
            "--range",
            "6M",
            "--mock",
            "--format",
            "json",
        ]);
        assert!(cli.mock);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.ticker.as_deref(), Some("nvda"));
                assert_eq!(args.range.as_deref(), Some("6M"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
