use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_TICKER_LEN: usize = 15;

/// Normalized stock ticker, safe to use as a single URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Trim user input and normalize it to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                len,
                max: MAX_TICKER_LEN,
            });
        }

        if let Some(first) = normalized.chars().next() {
            if !first.is_ascii_alphanumeric() {
                return Err(ValidationError::TickerInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::TickerInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    /// Wrap a literal that is already uppercase and valid.
    pub(crate) fn from_normalized(value: &str) -> Self {
        debug_assert_eq!(Self::parse(value).as_ref().map(Self::as_str), Ok(value));
        Self(value.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ticker {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_uppercases_input() {
        let parsed = Ticker::parse(" nvda ").expect("ticker should parse");
        assert_eq!(parsed.as_str(), "NVDA");
    }

    #[test]
    fn accepts_class_suffixes() {
        assert_eq!(Ticker::parse("brk.b").expect("dotted").as_str(), "BRK.B");
        assert_eq!(Ticker::parse("rds-a").expect("dashed").as_str(), "RDS-A");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Ticker::parse("   "), Err(ValidationError::EmptyTicker));
    }

    #[test]
    fn rejects_path_characters() {
        let err = Ticker::parse("AAPL/../x").expect_err("must fail");
        assert!(matches!(err, ValidationError::TickerInvalidChar { ch: '/', index: 4 }));
    }

    #[test]
    fn accepts_numeric_exchange_symbols() {
        for (input, expected) in [
            ("600104.shh", "600104.SHH"),
            (" 0700.hk", "0700.HK"),
            ("000002.SHZ", "000002.SHZ"),
        ] {
            let parsed = Ticker::parse(input).expect("numeric symbol should parse");
            assert_eq!(parsed.as_str(), expected);
        }
    }

    #[test]
    fn rejects_leading_separator() {
        assert_eq!(Ticker::parse(".."), Err(ValidationError::TickerInvalidStart { ch: '.' }));
        assert_eq!(Ticker::parse("-A"), Err(ValidationError::TickerInvalidStart { ch: '-' }));
    }
}
