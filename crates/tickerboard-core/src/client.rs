//! Client for the backend's `/api/stock_data/{ticker}` endpoint.
//!
//! Every failure is reduced to one [`FetchError`] whose
//! [`user_message`](FetchError::user_message) replaces the dashboard's main
//! content. Nothing is retried.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickerboard_core::{ReqwestHttpClient, StockDataClient, Ticker};
//!
//! let client = StockDataClient::new("http://127.0.0.1:5000", Arc::new(ReqwestHttpClient::new()));
//! let data = client.fetch(&Ticker::parse("AAPL")?).await?;
//! println!("{} closes", data.historical.len());
//! ```

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::http_client::{HttpClient, HttpRequest};
use crate::{DashboardConfig, HistoricalSeries, Profile, Ticker};

/// Shown when the backend fails without saying why.
pub const GENERIC_FAILURE: &str = "Failed to fetch stock data.";

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockData {
    pub historical: HistoricalSeries,
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Failure classification. All kinds are displayed the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// No response: connection, DNS or timeout failure.
    Transport,
    /// The backend answered with a non-2xx status.
    Status,
    /// A 2xx response whose body is not a stock data document.
    Malformed,
}

/// A failed stock data fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    status: Option<u16>,
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: message.into(),
            status: None,
        }
    }

    /// Build a status failure from the backend's `{ "error": ... }` body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| String::from(GENERIC_FAILURE));

        Self {
            kind: FetchErrorKind::Status,
            message,
            status: Some(status),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Malformed,
            message: message.into(),
            status: None,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// The single line shown in place of the main content.
    pub fn user_message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::Status => "fetch.status",
            FetchErrorKind::Malformed => "fetch.malformed",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

/// Fetches historical closes and the company profile for a ticker.
#[derive(Clone)]
pub struct StockDataClient {
    base_url: String,
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl StockDataClient {
    pub fn new(base_url: impl Into<String>, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
            timeout_ms: 10_000,
        }
    }

    pub fn from_config(config: &DashboardConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self::new(config.base_url.clone(), http_client).with_timeout_ms(config.timeout_ms)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, ticker: &Ticker) -> String {
        format!(
            "{}/api/stock_data/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(ticker.as_str())
        )
    }

    pub async fn fetch(&self, ticker: &Ticker) -> Result<StockData, FetchError> {
        let url = self.endpoint(ticker);
        debug!(%ticker, %url, "fetching stock data");

        let request = HttpRequest::get(url)
            .with_header("Accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            warn!(%ticker, error = %e, "stock data transport failure");
            FetchError::transport(e.message())
        })?;

        if !response.is_success() {
            let error = FetchError::from_status(response.status, &response.body);
            warn!(%ticker, status = response.status, error = %error, "stock data request rejected");
            return Err(error);
        }

        let data: StockData = serde_json::from_str(&response.body).map_err(|e| {
            warn!(%ticker, error = %e, "stock data response malformed");
            FetchError::malformed(format!("invalid stock data response: {e}"))
        })?;

        debug!(%ticker, points = data.historical.len(), "stock data received");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_message_is_used() {
        let error =
            FetchError::from_status(404, r#"{"error":"Could not retrieve profile for ZZZZ."}"#);
        assert_eq!(error.kind(), FetchErrorKind::Status);
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.user_message(), "Could not retrieve profile for ZZZZ.");
    }

    #[test]
    fn missing_error_field_falls_back_to_generic_message() {
        assert_eq!(FetchError::from_status(500, "{}").user_message(), GENERIC_FAILURE);
        assert_eq!(
            FetchError::from_status(502, "<html>Bad Gateway</html>").user_message(),
            GENERIC_FAILURE
        );
        assert_eq!(
            FetchError::from_status(500, r#"{"error":""}"#).user_message(),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn endpoint_joins_base_url_and_ticker() {
        let client = StockDataClient::new(
            "http://127.0.0.1:5000/",
            Arc::new(crate::FixtureHttpClient::default()),
        );
        let ticker = Ticker::parse("brk.b").expect("valid");
        assert_eq!(client.endpoint(&ticker), "http://127.0.0.1:5000/api/stock_data/BRK.B");
    }
}
