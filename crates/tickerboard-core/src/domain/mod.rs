//! # Domain Models
//!
//! Canonical types consumed by the dashboard.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated, uppercase stock symbol |
//! | [`PricePoint`] | One trading day's close |
//! | [`HistoricalSeries`] | Chronological closes for one ticker |
//! | [`Profile`] | Pass-through company overview |
//! | [`DisplayRange`] | Chart range selector (1M, 6M, 1Y, 5Y) |
//!
//! ## Validation
//!
//! ```rust
//! use tickerboard_core::{DisplayRange, Ticker, ValidationError};
//!
//! let ticker = Ticker::parse(" msft ").unwrap();
//! assert_eq!(ticker.as_str(), "MSFT");
//!
//! let range: DisplayRange = "6m".parse().unwrap();
//! assert_eq!(range.trading_days(), 126);
//!
//! assert!(matches!(Ticker::parse(""), Err(ValidationError::EmptyTicker)));
//! ```

mod price;
mod profile;
mod range;
mod ticker;

pub use price::{HistoricalSeries, PricePoint};
pub use profile::Profile;
pub use range::{trailing, DisplayRange, TRADING_DAYS_PER_YEAR};
pub use ticker::Ticker;
