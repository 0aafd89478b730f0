//! # Tickerboard Core
//!
//! Data model and controller logic for a single-ticker stock dashboard.
//!
//! ## Overview
//!
//! - **Domain models** for tickers, daily closes, company profiles and chart ranges
//! - **Range windowing** of a full history down to the selected trailing period
//! - **Moving averages** computed over the whole history, aligned to the window
//! - **Stock data client** for the backend's `/api/stock_data/{ticker}` endpoint
//! - **Dashboard state** with sequence-numbered requests that drop stale responses
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chart`] | Aligned chart series and terminal rendering |
//! | [`client`] | Stock data client and fetch errors |
//! | [`config`] | Dashboard settings and environment overrides |
//! | [`dashboard`] | Application state and request sequencing |
//! | [`domain`] | Ticker, price, profile and range types |
//! | [`error`] | Input and configuration validation errors |
//! | [`fixtures`] | Offline demo backend |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`indicators`] | Moving average calculator |
//! | [`panel`] | Company panel formatting |
//!
//! ## Example
//!
//! ```rust
//! use tickerboard_core::{moving_average, ChartView, DisplayRange, HistoricalSeries, PricePoint};
//!
//! assert_eq!(
//!     moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3),
//!     vec![None, None, Some(2.0), Some(3.0), Some(4.0)]
//! );
//!
//! let series: HistoricalSeries = (0..300)
//!     .map(|i| PricePoint::new(format!("day-{i}"), 100.0 + i as f64).unwrap())
//!     .collect::<Vec<_>>()
//!     .into();
//! let chart = ChartView::build(&series, DisplayRange::OneMonth, 50);
//! assert_eq!(chart.closes.len(), 21);
//! assert_eq!(chart.moving_average.len(), 21);
//! ```

pub mod chart;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod http_client;
pub mod indicators;
pub mod panel;

pub use chart::ChartView;
pub use client::{FetchError, FetchErrorKind, StockData, StockDataClient, GENERIC_FAILURE};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardView, Outcome, Phase, RequestTicket};
pub use domain::{
    trailing, DisplayRange, HistoricalSeries, PricePoint, Profile, Ticker, TRADING_DAYS_PER_YEAR,
};
pub use error::ValidationError;
pub use fixtures::FixtureHttpClient;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use indicators::{moving_average, DEFAULT_MA_WINDOW};
pub use panel::ProfilePanel;
