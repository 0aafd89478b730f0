//! Interactive dashboard loop.
//!
//! Input lines and finished fetches are handled on one task, so the
//! dashboard state is never shared. Fetches run as spawned tasks and report
//! back over a channel; a search issued while another is in flight does not
//! cancel it, the older response is simply discarded when it arrives.

use std::process::ExitCode;
use std::time::Instant;

use tickerboard_core::{
    Dashboard, DisplayRange, FetchError, Outcome, Phase, RequestTicket, StockData,
    StockDataClient,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::cli::SessionArgs;
use crate::error::CliError;
use crate::metadata::Metadata;
use crate::output;

use super::Context;

const HELP: &str = "\
enter a ticker (e.g. MSFT) to search
1M, 6M, 1Y or 5Y (optionally prefixed with ':') to change the range
reload (or :r) to fetch the current ticker again
help to show this message, quit to leave
";

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Blank,
    Help,
    Quit,
    Reload,
    Range(DisplayRange),
    Search(String),
}

impl SessionInput {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Blank;
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "quit" | "exit" | ":q" => return Self::Quit,
            "help" | "?" => return Self::Help,
            "reload" | ":r" => return Self::Reload,
            _ => {}
        }

        let candidate = trimmed.strip_prefix(':').unwrap_or(trimmed);
        match candidate.parse::<DisplayRange>() {
            Ok(range) => Self::Range(range),
            Err(_) => Self::Search(trimmed.to_owned()),
        }
    }
}

struct Completed {
    ticket: RequestTicket,
    result: Result<StockData, FetchError>,
    latency_ms: u64,
}

pub async fn run(args: &SessionArgs, context: &Context) -> Result<ExitCode, CliError> {
    let mut dashboard = Dashboard::new(context.config.clone());

    if let Some(raw) = &args.range {
        dashboard.select_range(raw.parse::<DisplayRange>()?);
    }

    let initial = match args.ticker.as_deref() {
        Some(raw) => dashboard.submit_ticker(raw)?,
        None => None,
    }
    .unwrap_or_else(|| dashboard.reload());

    let input = BufReader::new(tokio::io::stdin());
    drive(dashboard, initial, input, tokio::io::stdout(), context).await?;
    Ok(ExitCode::SUCCESS)
}

/// Run the session until `quit` or until input ends and no fetch is pending.
async fn drive<R, W>(
    mut dashboard: Dashboard,
    initial: RequestTicket,
    input: R,
    mut output: W,
    context: &Context,
) -> Result<Dashboard, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::channel::<Completed>(16);
    let mut lines = input.lines();
    let mut pending = 0usize;
    let mut input_closed = false;

    emit(&mut output, &dashboard, context, 0).await?;
    spawn_fetch(&context.client, initial, &tx);
    pending += 1;

    while !(input_closed && pending == 0) {
        tokio::select! {
            line = lines.next_line(), if !input_closed => {
                let Some(line) = line? else {
                    input_closed = true;
                    debug!(pending, "session input closed");
                    continue;
                };

                match SessionInput::parse(&line) {
                    SessionInput::Blank => {}
                    SessionInput::Quit => break,
                    SessionInput::Help => output.write_all(HELP.as_bytes()).await?,
                    SessionInput::Reload => {
                        let ticket = dashboard.reload();
                        emit(&mut output, &dashboard, context, 0).await?;
                        spawn_fetch(&context.client, ticket, &tx);
                        pending += 1;
                    }
                    SessionInput::Range(range) => {
                        let changed = dashboard.select_range(range);
                        if changed && matches!(dashboard.phase(), Phase::Ready) {
                            emit(&mut output, &dashboard, context, 0).await?;
                        }
                    }
                    SessionInput::Search(raw) => match dashboard.submit_ticker(&raw) {
                        Ok(Some(ticket)) => {
                            emit(&mut output, &dashboard, context, 0).await?;
                            spawn_fetch(&context.client, ticket, &tx);
                            pending += 1;
                        }
                        Ok(None) => {}
                        Err(error) => {
                            output.write_all(format!("error: {error}\n").as_bytes()).await?;
                        }
                    },
                }
            }
            Some(done) = rx.recv(), if pending > 0 => {
                pending -= 1;
                if dashboard.complete(&done.ticket, done.result) == Outcome::Applied {
                    emit(&mut output, &dashboard, context, done.latency_ms).await?;
                }
            }
            else => break,
        }
    }

    output.flush().await?;
    Ok(dashboard)
}

fn spawn_fetch(client: &StockDataClient, ticket: RequestTicket, tx: &mpsc::Sender<Completed>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let started = Instant::now();
        let result = client.fetch(&ticket.ticker).await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        // The receiver is gone once the session has quit.
        let _ = tx
            .send(Completed {
                ticket,
                result,
                latency_ms,
            })
            .await;
    });
}

async fn emit<W>(
    output: &mut W,
    dashboard: &Dashboard,
    context: &Context,
    latency_ms: u64,
) -> Result<(), CliError>
where
    W: AsyncWrite + Unpin,
{
    let meta = Metadata::new(context.source.clone(), latency_ms);
    let rendered = output::render_view(&dashboard.view(), meta, context.render)?;
    output.write_all(rendered.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tickerboard_core::{DashboardConfig, FixtureHttpClient, HttpResponse};

    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::RenderOptions;

    fn context(http: FixtureHttpClient) -> Context {
        Context {
            config: DashboardConfig::default(),
            client: StockDataClient::new("http://fixture.test", Arc::new(http)),
            source: String::from("mock"),
            render: RenderOptions {
                format: OutputFormat::Table,
                pretty: false,
                width: 40,
                height: 6,
            },
        }
    }

    async fn run_script(script: &str, context: &Context) -> (Dashboard, String) {
        let mut dashboard = Dashboard::new(context.config.clone());
        let initial = dashboard.reload();
        let mut output = Vec::new();
        let dashboard = drive(dashboard, initial, script.as_bytes(), &mut output, context)
            .await
            .expect("session runs");
        (dashboard, String::from_utf8(output).expect("utf-8 output"))
    }

    #[test]
    fn parses_session_input() {
        assert_eq!(SessionInput::parse("  "), SessionInput::Blank);
        assert_eq!(SessionInput::parse("QUIT"), SessionInput::Quit);
        assert_eq!(SessionInput::parse("?"), SessionInput::Help);
        assert_eq!(SessionInput::parse("Reload"), SessionInput::Reload);
        assert_eq!(SessionInput::parse(":r"), SessionInput::Reload);
        assert_eq!(SessionInput::parse(":5y"), SessionInput::Range(DisplayRange::FiveYears));
        assert_eq!(SessionInput::parse("6M"), SessionInput::Range(DisplayRange::SixMonths));
        assert_eq!(SessionInput::parse(" msft "), SessionInput::Search(String::from("msft")));
    }

    #[tokio::test]
    async fn newer_search_wins_over_slow_initial_load() {
        let http = FixtureHttpClient::new().with_latency("AAPL", Duration::from_millis(100));
        let context = context(http);

        let (dashboard, output) = run_script("nvda\n", &context).await;

        assert_eq!(dashboard.ticker().as_str(), "NVDA");
        assert_eq!(dashboard.profile().symbol.as_deref(), Some("NVDA"));
        assert!(output.contains("Loading AAPL..."));
        assert!(output.contains("Loading NVDA..."));
        assert!(output.contains("NVIDIA Corporation (NVDA)"));
        assert!(!output.contains("Apple Inc (AAPL)"));
    }

    #[tokio::test]
    async fn range_lines_rerender_without_refetching() {
        let http = FixtureHttpClient::new();
        let context = context(http.clone());

        let (dashboard, output) = run_script("6M\n:1m\n", &context).await;

        assert_eq!(dashboard.range(), DisplayRange::OneMonth);
        assert!(output.contains("Range 1M (21 trading days shown)"));
        assert_eq!(http.requests().len(), 1);
    }

    #[tokio::test]
    async fn invalid_ticker_is_reported_and_ignored() {
        let context = context(FixtureHttpClient::new());

        let (dashboard, output) = run_script("A$PL\n", &context).await;

        assert_eq!(dashboard.ticker().as_str(), "AAPL");
        assert!(output.contains("error: ticker contains invalid character '$' at index 1"));
        assert!(matches!(dashboard.phase(), Phase::Ready));
    }

    #[tokio::test]
    async fn reload_retries_a_failed_ticker() {
        let http = FixtureHttpClient::new().with_response(
            "ZZZZ",
            HttpResponse::new(404, r#"{"error":"Could not retrieve profile for ZZZZ."}"#),
        );
        let context = context(http.clone());

        let (dashboard, output) = run_script("zzzz
zzzz
reload
", &context).await;

        let zzzz_requests = http
            .requests()
            .iter()
            .filter(|url| url.ends_with("/ZZZZ"))
            .count();
        assert_eq!(zzzz_requests, 2);
        assert_eq!(output.matches("Loading ZZZZ...").count(), 2);
        assert!(output.contains("error: Could not retrieve profile for ZZZZ."));
        assert!(matches!(dashboard.phase(), Phase::Failed(_)));
    }

    #[tokio::test]
    async fn quit_stops_reading_input() {
        let context = context(FixtureHttpClient::new());

        let (dashboard, output) = run_script("quit\nmsft\n", &context).await;

        assert_eq!(dashboard.ticker().as_str(), "AAPL");
        assert!(!output.contains("Loading MSFT"));
    }
}
