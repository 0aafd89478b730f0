use std::io::Write;
use std::process::ExitCode;
use std::time::Instant;

use tickerboard_core::{Dashboard, DisplayRange, Phase};

use crate::cli::ShowArgs;
use crate::error::CliError;
use crate::metadata::Metadata;
use crate::output;

use super::{Context, FETCH_FAILED};

pub async fn run(args: &ShowArgs, context: &Context) -> Result<ExitCode, CliError> {
    let mut dashboard = Dashboard::new(context.config.clone());

    if let Some(raw) = &args.range {
        dashboard.select_range(raw.parse::<DisplayRange>()?);
    }

    let ticket = match args.ticker.as_deref() {
        Some(raw) => dashboard.submit_ticker(raw)?,
        None => None,
    }
    .unwrap_or_else(|| dashboard.reload());

    let started = Instant::now();
    let result = context.client.fetch(&ticket.ticker).await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    dashboard.complete(&ticket, result);

    let mut meta = Metadata::new(context.source.clone(), latency_ms);
    if matches!(dashboard.phase(), Phase::Ready) && dashboard.series().is_empty() {
        meta.push_warning(format!("no price history returned for {}", ticket.ticker));
    }

    let rendered = output::render_view(&dashboard.view(), meta, context.render)?;
    std::io::stdout().lock().write_all(rendered.as_bytes())?;

    if matches!(dashboard.phase(), Phase::Failed(_)) {
        return Ok(ExitCode::from(FETCH_FAILED));
    }
    Ok(ExitCode::SUCCESS)
}
