//! Offline stand-in for the stock data backend.
//!
//! Serves five years of synthetic daily closes plus a company overview for
//! AAPL, MSFT and NVDA, and the backend's not-found error for anything else.
//! Used by `--mock` mode and by tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use time::{Date, Month, Weekday};

use crate::http_client::{HttpClient, HttpFuture, HttpRequest, HttpResponse};
use crate::{HistoricalSeries, PricePoint, Profile, StockData, TRADING_DAYS_PER_YEAR};

/// Number of closes in each demo series.
pub const DEMO_HISTORY_LEN: usize = TRADING_DAYS_PER_YEAR * 5;

struct DemoCompany {
    symbol: &'static str,
    name: &'static str,
    description: &'static str,
    market_cap: &'static str,
    pe_ratio: &'static str,
    week_52_high: &'static str,
    base: f64,
    drift: f64,
    swing: f64,
}

const DEMO_COMPANIES: [DemoCompany; 3] = [
    DemoCompany {
        symbol: "AAPL",
        name: "Apple Inc",
        description: "Apple Inc. designs, manufactures, and markets smartphones, personal computers, tablets, wearables, and accessories worldwide.",
        market_cap: "3200000000000",
        pe_ratio: "32.5",
        week_52_high: "220.50",
        base: 150.0,
        drift: 0.05,
        swing: 20.0,
    },
    DemoCompany {
        symbol: "MSFT",
        name: "Microsoft Corporation",
        description: "Microsoft Corporation develops, licenses, and supports software, services, devices, and solutions worldwide.",
        market_cap: "3100000000000",
        pe_ratio: "35.8",
        week_52_high: "430.82",
        base: 300.0,
        drift: 0.1,
        swing: 30.0,
    },
    DemoCompany {
        symbol: "NVDA",
        name: "NVIDIA Corporation",
        description: "NVIDIA Corporation provides graphics, and compute and networking solutions in the United States, Taiwan, China, and internationally.",
        market_cap: "2900000000000",
        pe_ratio: "70.2",
        week_52_high: "974.00",
        base: 400.0,
        drift: 0.4,
        swing: 80.0,
    },
];

/// Demo payload for AAPL, MSFT or NVDA, matched case-insensitively.
pub fn demo_stock_data(ticker: &str) -> Option<StockData> {
    let company = DEMO_COMPANIES
        .iter()
        .find(|company| company.symbol.eq_ignore_ascii_case(ticker.trim()))?;

    let points = trading_days(DEMO_HISTORY_LEN)
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let step = i as f64;
            let cycle = (i % 50) as f64 / 50.0;
            PricePoint {
                date: date.to_string(),
                close: company.base + step * company.drift + company.swing * cycle,
            }
        })
        .collect::<Vec<_>>();

    let profile = Profile {
        symbol: Some(company.symbol.to_owned()),
        name: Some(company.name.to_owned()),
        description: Some(company.description.to_owned()),
        exchange: Some(String::from("NASDAQ")),
        currency: Some(String::from("USD")),
        sector: Some(String::from("Technology")),
        market_capitalization: Some(company.market_cap.to_owned()),
        pe_ratio: Some(company.pe_ratio.to_owned()),
        week_52_high: Some(company.week_52_high.to_owned()),
        extra: BTreeMap::new(),
    };

    Some(StockData {
        historical: HistoricalSeries::new(points),
        profile,
    })
}

/// `count` consecutive weekdays starting 2020-01-02.
fn trading_days(count: usize) -> Vec<Date> {
    let mut days = Vec::with_capacity(count);
    let Ok(mut day) = Date::from_calendar_date(2020, Month::January, 2) else {
        return days;
    };

    while days.len() < count {
        if !matches!(day.weekday(), Weekday::Saturday | Weekday::Sunday) {
            days.push(day);
        }
        match day.next_day() {
            Some(next) => day = next,
            None => break,
        }
    }

    days
}

/// In-process HTTP client that answers `/api/stock_data/{ticker}` from the
/// demo data set.
///
/// Individual tickers can be given canned responses or artificial latency,
/// and every requested URL is recorded.
#[derive(Debug, Clone, Default)]
pub struct FixtureHttpClient {
    overrides: BTreeMap<String, HttpResponse>,
    latency: BTreeMap<String, Duration>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, ticker: &str, response: HttpResponse) -> Self {
        self.overrides.insert(ticker.to_ascii_uppercase(), response);
        self
    }

    pub fn with_latency(mut self, ticker: &str, latency: Duration) -> Self {
        self.latency.insert(ticker.to_ascii_uppercase(), latency);
        self
    }

    /// URLs requested so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn respond(&self, ticker: &str) -> HttpResponse {
        if let Some(response) = self.overrides.get(ticker) {
            return response.clone();
        }

        match demo_stock_data(ticker).map(|data| serde_json::to_string(&data)) {
            Some(Ok(body)) => HttpResponse::ok_json(body),
            Some(Err(error)) => HttpResponse::new(
                500,
                serde_json::json!({ "error": error.to_string() }).to_string(),
            ),
            None => HttpResponse::new(
                404,
                serde_json::json!({ "error": format!("Could not retrieve profile for {ticker}.") })
                    .to_string(),
            ),
        }
    }
}

impl HttpClient for FixtureHttpClient {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        Box::pin(async move {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request.url.clone());
            }

            let segment = request
                .url
                .split_once("/api/stock_data/")
                .map(|(_, rest)| rest.split(['?', '#']).next().unwrap_or_default())
                .unwrap_or_default();
            let ticker = urlencoding::decode(segment)
                .map(|decoded| decoded.to_ascii_uppercase())
                .unwrap_or_default();

            if let Some(latency) = self.latency.get(&ticker) {
                tokio::time::sleep(*latency).await;
            }

            if ticker.is_empty() {
                return Ok(HttpResponse::new(404, r#"{"error":"Not Found"}"#));
            }

            Ok(self.respond(&ticker))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_series_covers_five_years_of_weekdays() {
        let data = demo_stock_data("aapl").expect("AAPL is a demo ticker");
        assert_eq!(data.historical.len(), DEMO_HISTORY_LEN);
        assert_eq!(data.historical.points()[0].date, "2020-01-02");
        assert_eq!(data.historical.points()[2].date, "2020-01-06");
        assert_eq!(data.profile.name.as_deref(), Some("Apple Inc"));
    }

    #[test]
    fn demo_closes_follow_drift_and_cycle() {
        let data = demo_stock_data("NVDA").expect("NVDA is a demo ticker");
        let closes = data.historical.closes();
        assert_eq!(closes[0], 400.0);
        assert!((closes[25] - (400.0 + 25.0 * 0.4 + 80.0 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn unknown_ticker_has_no_demo_data() {
        assert!(demo_stock_data("ZZZZ").is_none());
    }

    #[tokio::test]
    async fn unknown_ticker_gets_backend_style_404() {
        let client = FixtureHttpClient::new();
        let response = client
            .execute(HttpRequest::get("http://fixture/api/stock_data/zzzz"))
            .await
            .expect("fixture never fails transport");

        assert_eq!(response.status, 404);
        assert!(response.body.contains("Could not retrieve profile for ZZZZ."));
        assert_eq!(client.requests(), vec!["http://fixture/api/stock_data/zzzz"]);
    }
}
