/*
[INPUT]:  MtGox API v2 JSON payloads
[OUTPUT]: Typed Rust wire structs mirroring the exchange's field names
[POS]:    Data layer - MtGox raw response shapes
[UPDATE]: When the MtGox payload schema changes
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"result": "success", "data": ...}` or `{"result": "error", "error": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MtGoxResponse<T> {
    pub result: String,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Money value as reported by MtGox: decimal string plus a scaled integer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MtGoxValue {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_text")]
    pub value_int: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub display_short: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MtGoxTicker {
    #[serde(default)]
    pub high: Option<MtGoxValue>,
    #[serde(default)]
    pub low: Option<MtGoxValue>,
    #[serde(default)]
    pub avg: Option<MtGoxValue>,
    #[serde(default)]
    pub vwap: Option<MtGoxValue>,
    #[serde(default)]
    pub vol: Option<MtGoxValue>,
    #[serde(default)]
    pub last_local: Option<MtGoxValue>,
    #[serde(default)]
    pub last_orig: Option<MtGoxValue>,
    #[serde(default)]
    pub last_all: Option<MtGoxValue>,
    #[serde(default)]
    pub last: Option<MtGoxValue>,
    #[serde(default)]
    pub buy: Option<MtGoxValue>,
    #[serde(default)]
    pub sell: Option<MtGoxValue>,
    /// Base currency of the market
    #[serde(default)]
    pub item: Option<String>,
    /// Microseconds since epoch
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_text")]
    pub now: Option<String>,
}

/// One depth row. `price`/`amount` arrive as JSON numbers and are kept raw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MtGoxOrder {
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_text")]
    pub price_int: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_text")]
    pub amount_int: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_text")]
    pub stamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MtGoxDepth {
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_text")]
    pub now: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_text")]
    pub cached: Option<String>,
    #[serde(default)]
    pub asks: Vec<MtGoxOrder>,
    #[serde(default)]
    pub bids: Vec<MtGoxOrder>,
    #[serde(default)]
    pub filter_min_price: Option<MtGoxValue>,
    #[serde(default)]
    pub filter_max_price: Option<MtGoxValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MtGoxTrade {
    /// Seconds since epoch
    pub date: i64,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_text")]
    pub price_int: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_text")]
    pub amount_int: Option<String>,
    #[serde(deserialize_with = "serde_helpers::deserialize_text")]
    pub tid: String,
    #[serde(default)]
    pub price_currency: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    /// `"bid"` or `"ask"`: the order type that triggered the trade
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub properties: Option<String>,
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accept `"123"` or `123`; MtGox is inconsistent across endpoints.
    pub fn deserialize_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(raw)) => Ok(Some(raw)),
            Some(Value::Number(number)) => Ok(Some(number.to_string())),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected string or number, found {other}"
            ))),
        }
    }

    pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_opt_text(deserializer)?
            .ok_or_else(|| serde::de::Error::custom("missing value"))
    }
}
