use serde::{Deserialize, Deserializer, Serialize};

/// Finnhub is loose with its string fields: the same key can arrive as a
/// string, as `null`, or as a number (e.g., `"related"` on some articles).
///
/// ```text
/// "ipo": null         -> ""
/// "related": 320193   -> "320193"
/// ```
///
/// `de_loose_string` accepts all three.
pub fn de_loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(num) => Ok(num.to_string()),
        _ => Err(serde::de::Error::custom("ERROR! Invalid type for string field")),
    }
}

/// Point-in-time price snapshot from `/quote`.
///
/// ```json
/// { "c": 150.0, "d": 2.5, "dp": 1.69, "h": 151.0, "l": 148.0, "o": 148.5, "pc": 147.5, "t": 1700000000 }
/// ```
///
/// Unknown symbols come back as all zeroes with `d`/`dp` set to `null`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Quote {
    #[serde(rename = "c", default)]
    pub current: f64,
    #[serde(rename = "d")]
    pub change: Option<f64>,
    #[serde(rename = "dp")]
    pub percent_change: Option<f64>,
    #[serde(rename = "h")]
    pub high: Option<f64>,
    #[serde(rename = "l")]
    pub low: Option<f64>,
    #[serde(rename = "o")]
    pub open: Option<f64>,
    #[serde(rename = "pc")]
    pub previous_close: Option<f64>,
    #[serde(rename = "t")]
    pub timestamp: Option<i64>,
}

impl Quote {
    /// Finnhub reports a zero price rather than an error for symbols it
    /// does not know.
    pub fn has_price(&self) -> bool {
        self.current != 0.0
    }
}

/// Company metadata from `/stock/profile2`; `{}` for unknown symbols.
///
/// Market capitalization and share counts are in millions.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(deserialize_with = "de_loose_string")]
    pub name: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub ticker: String,
    pub market_capitalization: Option<f64>,
    pub share_outstanding: Option<f64>,
    pub free_float: Option<f64>,
    #[serde(deserialize_with = "de_loose_string")]
    pub finnhub_industry: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub country: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub exchange: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub currency: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub ipo: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub weburl: String,
}

/// One `/company-news` entry; `datetime` is epoch seconds.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Article {
    pub id: i64,
    #[serde(deserialize_with = "de_loose_string")]
    pub category: String,
    pub datetime: i64,
    #[serde(deserialize_with = "de_loose_string")]
    pub headline: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub image: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub related: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub source: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub summary: String,
    #[serde(deserialize_with = "de_loose_string")]
    pub url: String,
}
