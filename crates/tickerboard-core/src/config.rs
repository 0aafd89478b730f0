//! Dashboard settings with environment overrides.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TICKERBOARD_BASE_URL` | `http://127.0.0.1:5000` |
//! | `TICKERBOARD_DEFAULT_TICKER` | `AAPL` |
//! | `TICKERBOARD_DEFAULT_RANGE` | `1Y` |
//! | `TICKERBOARD_MA_WINDOW` | `50` |
//! | `TICKERBOARD_TIMEOUT_MS` | `10000` |

use std::env;

use crate::indicators::DEFAULT_MA_WINDOW;
use crate::{DisplayRange, Ticker, ValidationError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TICKER: &str = "AAPL";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub default_ticker: Ticker,
    pub default_range: DisplayRange,
    pub ma_window: usize,
    pub timeout_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            default_ticker: Ticker::from_normalized(DEFAULT_TICKER),
            default_range: DisplayRange::default(),
            ma_window: DEFAULT_MA_WINDOW,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("TICKERBOARD_BASE_URL") {
            let trimmed = base_url.trim();
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ValidationError::InvalidConfig {
                    key: "TICKERBOARD_BASE_URL",
                    value: base_url,
                });
            }
            config.base_url = trimmed.trim_end_matches('/').to_owned();
        }

        if let Some(ticker) = lookup("TICKERBOARD_DEFAULT_TICKER") {
            config.default_ticker = Ticker::parse(&ticker)?;
        }

        if let Some(range) = lookup("TICKERBOARD_DEFAULT_RANGE") {
            config.default_range = range.parse()?;
        }

        if let Some(window) = lookup("TICKERBOARD_MA_WINDOW") {
            config.ma_window = match window.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(ValidationError::InvalidConfig {
                        key: "TICKERBOARD_MA_WINDOW",
                        value: window,
                    })
                }
            };
        }

        if let Some(timeout) = lookup("TICKERBOARD_TIMEOUT_MS") {
            config.timeout_ms = match timeout.trim().parse::<u64>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(ValidationError::InvalidConfig {
                        key: "TICKERBOARD_TIMEOUT_MS",
                        value: timeout,
                    })
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_dashboard_startup() {
        let config = DashboardConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config.default_ticker.as_str(), "AAPL");
        assert_eq!(config.default_range, DisplayRange::OneYear);
        assert_eq!(config.ma_window, 50);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn overrides_are_normalized() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("TICKERBOARD_BASE_URL", "https://stocks.example.test/"),
            ("TICKERBOARD_DEFAULT_TICKER", "msft"),
            ("TICKERBOARD_DEFAULT_RANGE", "6m"),
            ("TICKERBOARD_MA_WINDOW", "20"),
        ]))
        .expect("valid overrides");

        assert_eq!(config.base_url, "https://stocks.example.test");
        assert_eq!(config.default_ticker.as_str(), "MSFT");
        assert_eq!(config.default_range, DisplayRange::SixMonths);
        assert_eq!(config.ma_window, 20);
    }

    #[test]
    fn rejects_zero_window_and_bad_urls() {
        let err = DashboardConfig::from_lookup(lookup(&[("TICKERBOARD_MA_WINDOW", "0")]))
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidConfig { key: "TICKERBOARD_MA_WINDOW", .. }));

        let err = DashboardConfig::from_lookup(lookup(&[("TICKERBOARD_BASE_URL", "ftp://x")]))
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidConfig { key: "TICKERBOARD_BASE_URL", .. }));
    }
}
