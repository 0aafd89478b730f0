//! Dashboard application state.
//!
//! [`Dashboard`] owns the current ticker, range and last-fetched data. Each
//! fetch is issued as a [`RequestTicket`] carrying a strictly increasing
//! sequence number; only the response for the most recently issued ticket is
//! applied, so a slow earlier request can never overwrite a newer one.
//!
//! ```rust
//! use tickerboard_core::{Dashboard, DashboardConfig, DisplayRange, Outcome};
//! use tickerboard_core::fixtures::demo_stock_data;
//!
//! let mut dashboard = Dashboard::new(DashboardConfig::default());
//! let first = dashboard.reload();
//! let second = dashboard.submit_ticker("msft").unwrap().unwrap();
//!
//! // The first response arrives late and is ignored.
//! assert_eq!(
//!     dashboard.complete(&first, Ok(demo_stock_data("AAPL").unwrap())),
//!     Outcome::Stale
//! );
//! assert_eq!(
//!     dashboard.complete(&second, Ok(demo_stock_data("MSFT").unwrap())),
//!     Outcome::Applied
//! );
//! assert!(dashboard.select_range(DisplayRange::OneMonth));
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::chart::ChartView;
use crate::client::{FetchError, StockData};
use crate::panel::ProfilePanel;
use crate::{DashboardConfig, DisplayRange, HistoricalSeries, Profile, Ticker, ValidationError};

/// Handle for one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub ticker: Ticker,
}

/// What happened to a completed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A newer request was issued after this one; the response was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Which panel is visible and what it shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    Idle,
    Loading { ticker: Ticker },
    Error { ticker: Ticker, message: String },
    Content {
        ticker: Ticker,
        panel: ProfilePanel,
        chart: ChartView,
    },
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    ticker: Ticker,
    range: DisplayRange,
    ma_window: usize,
    series: HistoricalSeries,
    profile: Profile,
    phase: Phase,
    next_seq: u64,
    latest_seq: Option<u64>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            ticker: config.default_ticker,
            range: config.default_range,
            ma_window: config.ma_window,
            series: HistoricalSeries::default(),
            profile: Profile::default(),
            phase: Phase::Idle,
            next_seq: 1,
            latest_seq: None,
        }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn range(&self) -> DisplayRange {
        self.range
    }

    pub fn ma_window(&self) -> usize {
        self.ma_window
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn series(&self) -> &HistoricalSeries {
        &self.series
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Handle a search submission.
    ///
    /// Returns `Ok(None)` when the input is blank or names the ticker already
    /// shown; no request is issued in either case.
    pub fn submit_ticker(&mut self, raw: &str) -> Result<Option<RequestTicket>, ValidationError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let ticker = Ticker::parse(raw)?;
        if ticker == self.ticker {
            debug!(%ticker, "ticker unchanged, skipping fetch");
            return Ok(None);
        }

        self.ticker = ticker;
        Ok(Some(self.issue()))
    }

    /// Issue a request for the current ticker regardless of state.
    pub fn reload(&mut self) -> RequestTicket {
        self.issue()
    }

    fn issue(&mut self) -> RequestTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_seq = Some(seq);
        self.phase = Phase::Loading;
        debug!(seq, ticker = %self.ticker, "request issued");

        RequestTicket {
            seq,
            ticker: self.ticker.clone(),
        }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest_seq == Some(ticket.seq)
    }

    /// Apply a finished fetch if its ticket is still the latest one.
    pub fn complete(
        &mut self,
        ticket: &RequestTicket,
        result: Result<StockData, FetchError>,
    ) -> Outcome {
        if !self.is_current(ticket) {
            debug!(
                seq = ticket.seq,
                ticker = %ticket.ticker,
                latest = ?self.latest_seq,
                "discarding stale response"
            );
            return Outcome::Stale;
        }

        match result {
            Ok(data) => {
                info!(
                    ticker = %ticket.ticker,
                    points = data.historical.len(),
                    "stock data loaded"
                );
                self.series = data.historical;
                self.profile = data.profile;
                self.phase = Phase::Ready;
            }
            Err(error) => {
                info!(
                    ticker = %ticket.ticker,
                    code = error.code(),
                    error = %error,
                    "stock data failed"
                );
                self.phase = Phase::Failed(error.user_message().to_owned());
            }
        }

        Outcome::Applied
    }

    /// Switch the chart range. Returns `false` when the range is unchanged.
    pub fn select_range(&mut self, range: DisplayRange) -> bool {
        if range == self.range {
            return false;
        }
        self.range = range;
        true
    }

    pub fn chart(&self) -> ChartView {
        ChartView::build(&self.series, self.range, self.ma_window)
    }

    pub fn view(&self) -> DashboardView {
        let ticker = self.ticker.clone();
        match &self.phase {
            Phase::Idle => DashboardView::Idle,
            Phase::Loading => DashboardView::Loading { ticker },
            Phase::Failed(message) => DashboardView::Error {
                ticker,
                message: message.clone(),
            },
            Phase::Ready => DashboardView::Content {
                ticker,
                panel: ProfilePanel::from_profile(&self.profile),
                chart: self.chart(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::demo_stock_data;

    fn dashboard() -> Dashboard {
        Dashboard::new(DashboardConfig::default())
    }

    fn demo(ticker: &str) -> StockData {
        demo_stock_data(ticker).expect("demo ticker")
    }

    #[test]
    fn starts_idle_on_default_ticker() {
        let dashboard = dashboard();
        assert_eq!(dashboard.ticker().as_str(), "AAPL");
        assert_eq!(dashboard.range(), DisplayRange::OneYear);
        assert_eq!(dashboard.view(), DashboardView::Idle);
    }

    #[test]
    fn sequence_numbers_increase() {
        let mut dashboard = dashboard();
        let first = dashboard.reload();
        let second = dashboard.submit_ticker("msft").expect("valid").expect("issued");
        assert!(second.seq > first.seq);
        assert_eq!(second.ticker.as_str(), "MSFT");
        assert_eq!(dashboard.phase(), &Phase::Loading);
    }

    #[test]
    fn same_or_blank_ticker_issues_nothing() {
        let mut dashboard = dashboard();
        assert_eq!(dashboard.submit_ticker(" aapl ").expect("valid"), None);
        assert_eq!(dashboard.submit_ticker("   ").expect("blank is ignored"), None);
        assert_eq!(dashboard.phase(), &Phase::Idle);
    }

    #[test]
    fn invalid_ticker_leaves_state_alone() {
        let mut dashboard = dashboard();
        let err = dashboard.submit_ticker("A$PL").expect_err("must fail");
        assert!(matches!(err, ValidationError::TickerInvalidChar { .. }));
        assert_eq!(dashboard.ticker().as_str(), "AAPL");
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut dashboard = dashboard();
        let aapl = dashboard.reload();
        let nvda = dashboard.submit_ticker("NVDA").expect("valid").expect("issued");

        assert_eq!(dashboard.complete(&nvda, Ok(demo("NVDA"))), Outcome::Applied);
        assert_eq!(dashboard.complete(&aapl, Ok(demo("AAPL"))), Outcome::Stale);
        assert_eq!(dashboard.profile().symbol.as_deref(), Some("NVDA"));
        assert_eq!(dashboard.phase(), &Phase::Ready);
    }

    #[test]
    fn failure_replaces_content_with_message() {
        let mut dashboard = dashboard();
        let ticket = dashboard.reload();
        dashboard.complete(&ticket, Ok(demo("AAPL")));

        let ticket = dashboard.submit_ticker("ZZZZ").expect("valid").expect("issued");
        let error =
            FetchError::from_status(404, r#"{"error":"Could not retrieve profile for ZZZZ."}"#);
        dashboard.complete(&ticket, Err(error));

        assert_eq!(
            dashboard.view(),
            DashboardView::Error {
                ticker: Ticker::parse("ZZZZ").expect("valid"),
                message: String::from("Could not retrieve profile for ZZZZ."),
            }
        );
    }

    #[test]
    fn range_switch_rebuilds_chart_without_refetch() {
        let mut dashboard = dashboard();
        let ticket = dashboard.reload();
        dashboard.complete(&ticket, Ok(demo("AAPL")));
        assert_eq!(dashboard.chart().len(), 252);

        assert!(!dashboard.select_range(DisplayRange::OneYear));
        assert!(dashboard.select_range(DisplayRange::OneMonth));
        let chart = dashboard.chart();
        assert_eq!(chart.len(), 21);
        assert_eq!(chart.moving_average.len(), 21);
        assert!(chart.moving_average.iter().all(Option::is_some));
    }
}
