mod ranges;
mod session;
mod show;

use std::process::ExitCode;
use std::sync::Arc;

use tickerboard_core::{
    DashboardConfig, FixtureHttpClient, HttpClient, ReqwestHttpClient, StockDataClient,
    ValidationError,
};
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::RenderOptions;

/// Exit code when the dashboard ends on a fetch error.
pub const FETCH_FAILED: u8 = 3;

/// Resolved settings and transport shared by every command.
pub struct Context {
    pub config: DashboardConfig,
    pub client: StockDataClient,
    pub source: String,
    pub render: RenderOptions,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let config = apply_overrides(DashboardConfig::from_env()?, cli)?;

        let http_client: Arc<dyn HttpClient> = if cli.mock {
            Arc::new(FixtureHttpClient::new())
        } else {
            Arc::new(ReqwestHttpClient::new())
        };
        let client = StockDataClient::from_config(&config, http_client);
        let source = if cli.mock {
            String::from("mock")
        } else {
            client.base_url().to_owned()
        };
        debug!(%source, ma_window = config.ma_window, "configured");

        Ok(Self {
            client,
            config,
            source,
            render: RenderOptions {
                format: cli.format,
                pretty: cli.pretty,
                width: cli.width,
                height: cli.height,
            },
        })
    }
}

/// Command-line flags take precedence over environment settings.
fn apply_overrides(mut config: DashboardConfig, cli: &Cli) -> Result<DashboardConfig, CliError> {
    if let Some(base_url) = &cli.base_url {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidConfig {
                key: "--base-url",
                value: base_url.clone(),
            }
            .into());
        }
        config.base_url = base_url.trim_end_matches('/').to_owned();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        if timeout_ms == 0 {
            return Err(ValidationError::InvalidConfig {
                key: "--timeout-ms",
                value: timeout_ms.to_string(),
            }
            .into());
        }
        config.timeout_ms = timeout_ms;
    }
    if let Some(window) = cli.ma_window {
        if window == 0 {
            return Err(ValidationError::InvalidConfig {
                key: "--ma-window",
                value: window.to_string(),
            }
            .into());
        }
        config.ma_window = window;
    }
    Ok(config)
}

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let context = Context::from_cli(cli)?;

    match &cli.command {
        Command::Show(args) => show::run(args, &context).await,
        Command::Ranges => ranges::run(&context),
        Command::Session(args) => session::run(args, &context).await,
    }
}
