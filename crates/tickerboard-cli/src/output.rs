use std::fmt::Write as _;

use serde::Serialize;
use tickerboard_core::{DashboardView, DisplayRange, ProfilePanel};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::metadata::{Metadata, Report};

/// Presentation settings shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub width: usize,
    pub height: usize,
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(payload)
}

/// Render a dashboard view; JSON output wraps it in a metadata report.
pub fn render_view(
    view: &DashboardView,
    meta: Metadata,
    options: RenderOptions,
) -> Result<String, CliError> {
    match options.format {
        OutputFormat::Json => {
            let mut payload = to_json(&Report { meta, data: view }, options.pretty)?;
            payload.push('\n');
            Ok(payload)
        }
        OutputFormat::Table => Ok(render_view_text(view, options.width, options.height)),
    }
}

pub fn render_view_text(view: &DashboardView, width: usize, height: usize) -> String {
    let mut out = String::new();
    match view {
        DashboardView::Idle => {}
        DashboardView::Loading { ticker } => {
            let _ = writeln!(out, "Loading {ticker}...");
        }
        DashboardView::Error { message, .. } => {
            let _ = writeln!(out, "error: {message}");
        }
        DashboardView::Content { panel, chart, .. } => {
            out.push_str(&render_panel(panel));
            let _ = writeln!(
                out,
                "\nRange {} ({} trading days shown)",
                chart.range,
                chart.len()
            );
            out.push_str(&chart.render(width, height));
        }
    }
    out
}

fn render_panel(panel: &ProfilePanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", panel.chart_title);
    let _ = writeln!(out, "{}", panel.chart_subtitle);
    let _ = writeln!(out);
    let _ = writeln!(out, "company     : {}", panel.company_name);
    let _ = writeln!(out, "market cap  : {}", panel.market_cap);
    let _ = writeln!(out, "sector      : {}", panel.sector);
    let _ = writeln!(out, "p/e ratio   : {}", panel.pe_ratio);
    let _ = writeln!(out, "52w high    : {}", panel.week_52_high);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", panel.summary);
    out
}

#[derive(Debug, Serialize)]
struct RangeRow {
    range: DisplayRange,
    trading_days: usize,
    default: bool,
}

pub fn render_ranges(default: DisplayRange, options: RenderOptions) -> Result<String, CliError> {
    let rows: Vec<RangeRow> = DisplayRange::ALL
        .iter()
        .map(|range| RangeRow {
            range: *range,
            trading_days: range.trading_days(),
            default: *range == default,
        })
        .collect();

    match options.format {
        OutputFormat::Json => {
            let report = Report {
                meta: Metadata::new("local", 0),
                data: rows,
            };
            let mut payload = to_json(&report, options.pretty)?;
            payload.push('\n');
            Ok(payload)
        }
        OutputFormat::Table => {
            let mut out = String::from("range  trading_days\n");
            for row in rows {
                let marker = if row.default { "  (default)" } else { "" };
                let _ = writeln!(out, "{:<6} {:>12}{marker}", row.range.as_str(), row.trading_days);
            }
            Ok(out)
        }
    }
}
