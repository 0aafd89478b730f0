use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PricePoint, ValidationError};

/// Trading sessions assumed per calendar year.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Selectable chart range, each mapped to a fixed count of trailing trading days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayRange {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "6M")]
    SixMonths,
    #[default]
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
}

impl DisplayRange {
    pub const ALL: [Self; 4] = [
        Self::OneMonth,
        Self::SixMonths,
        Self::OneYear,
        Self::FiveYears,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1M",
            Self::SixMonths => "6M",
            Self::OneYear => "1Y",
            Self::FiveYears => "5Y",
        }
    }

    pub const fn trading_days(self) -> usize {
        match self {
            Self::OneMonth => 21,
            Self::SixMonths => 126,
            Self::OneYear => TRADING_DAYS_PER_YEAR,
            Self::FiveYears => TRADING_DAYS_PER_YEAR * 5,
        }
    }

    /// Trailing slice of `points` covered by this range.
    ///
    /// Series shorter than the range are returned whole.
    pub fn window(self, points: &[PricePoint]) -> &[PricePoint] {
        trailing(points, self.trading_days())
    }
}

/// Last `count` elements of `items`, or all of them when there are fewer.
pub fn trailing<T>(items: &[T], count: usize) -> &[T] {
    &items[items.len().saturating_sub(count)..]
}

impl Display for DisplayRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayRange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "1M" => Ok(Self::OneMonth),
            "6M" => Ok(Self::SixMonths),
            "1Y" => Ok(Self::OneYear),
            "5Y" => Ok(Self::FiveYears),
            other => Err(ValidationError::InvalidRange {
                value: other.to_owned(),
            }),
        }
    }
}
