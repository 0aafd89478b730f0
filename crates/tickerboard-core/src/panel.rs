//! Display strings for the company information panel.

use serde::Serialize;

use crate::Profile;

const NOT_AVAILABLE: &str = "N/A";
const NO_SUMMARY: &str = "No summary available.";

/// Formatted company panel, one field per displayed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilePanel {
    pub company_name: String,
    pub market_cap: String,
    pub sector: String,
    pub pe_ratio: String,
    pub week_52_high: String,
    pub summary: String,
    pub chart_title: String,
    pub chart_subtitle: String,
}

impl ProfilePanel {
    pub fn from_profile(profile: &Profile) -> Self {
        let name = present(&profile.name);
        let symbol = present(&profile.symbol);

        Self {
            company_name: name.unwrap_or(NOT_AVAILABLE).to_owned(),
            market_cap: format_market_cap(present(&profile.market_capitalization)),
            sector: present(&profile.sector).unwrap_or(NOT_AVAILABLE).to_owned(),
            pe_ratio: present(&profile.pe_ratio).unwrap_or(NOT_AVAILABLE).to_owned(),
            week_52_high: present(&profile.week_52_high)
                .map(|high| format!("${high}"))
                .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            summary: present(&profile.description).unwrap_or(NO_SUMMARY).to_owned(),
            chart_title: format!(
                "{} ({})",
                name.unwrap_or(NOT_AVAILABLE),
                symbol.unwrap_or(NOT_AVAILABLE)
            ),
            chart_subtitle: format!(
                "{} | {}",
                present(&profile.exchange).unwrap_or(NOT_AVAILABLE),
                present(&profile.currency).unwrap_or(NOT_AVAILABLE)
            ),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

/// Market capitalization in billions, e.g. `$3200.00B`.
///
/// Only the leading integer digits are read; a value that is missing, has no
/// leading digits, or is zero renders as `N/A`.
pub fn format_market_cap(raw: Option<&str>) -> String {
    let digits: String = raw
        .unwrap_or_default()
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    match digits.parse::<u128>() {
        Ok(value) if value > 0 => format!("${:.2}B", value as f64 / 1_000_000_000.0),
        _ => NOT_AVAILABLE.to_owned(),
    }
}
