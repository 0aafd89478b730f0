use std::collections::BTreeMap;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Company overview as sent by the backend.
///
/// Field names follow the upstream overview document. Values are carried as
/// strings and never interpreted here; unknown attributes are preserved in
/// `extra` so the profile round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(
        rename = "Symbol",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub symbol: Option<String>,
    #[serde(
        rename = "Name",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        rename = "Description",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        rename = "Exchange",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub exchange: Option<String>,
    #[serde(
        rename = "Currency",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<String>,
    #[serde(
        rename = "Sector",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sector: Option<String>,
    #[serde(
        rename = "MarketCapitalization",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub market_capitalization: Option<String>,
    #[serde(
        rename = "PERatio",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub pe_ratio: Option<String>,
    #[serde(
        rename = "52WeekHigh",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub week_52_high: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Accept strings, numbers or null for a text attribute.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string attribute, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_overview_keys_and_keeps_unknown_ones() {
        let profile: Profile = serde_json::from_str(
            r#"{
                "Symbol": "AAPL",
                "Name": "Apple Inc",
                "MarketCapitalization": 3200000000000,
                "52WeekHigh": "220.50",
                "Beta": "1.24"
            }"#,
        )
        .expect("profile must decode");

        assert_eq!(profile.symbol.as_deref(), Some("AAPL"));
        assert_eq!(profile.market_capitalization.as_deref(), Some("3200000000000"));
        assert_eq!(profile.week_52_high.as_deref(), Some("220.50"));
        assert_eq!(profile.sector, None);
        assert_eq!(profile.extra.get("Beta"), Some(&Value::from("1.24")));
    }

    #[test]
    fn serializes_back_to_overview_keys() {
        let profile = Profile {
            pe_ratio: Some(String::from("32.5")),
            ..Profile::default()
        };
        let json = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(json, serde_json::json!({ "PERatio": "32.5" }));
    }
}
