/*
[INPUT]:  Bitstamp API v1 JSON payloads
[OUTPUT]: Typed Rust wire structs mirroring the exchange's field names
[POS]:    Data layer - Bitstamp raw response shapes
[UPDATE]: When the Bitstamp payload schema changes
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BitstampTicker {
    #[serde(default)]
    pub last: Option<Value>,
    #[serde(default)]
    pub high: Option<Value>,
    #[serde(default)]
    pub low: Option<Value>,
    #[serde(default)]
    pub vwap: Option<Value>,
    #[serde(default)]
    pub volume: Option<Value>,
    #[serde(default)]
    pub bid: Option<Value>,
    #[serde(default)]
    pub ask: Option<Value>,
    /// Seconds since epoch, as a string
    #[serde(default)]
    pub timestamp: Option<Value>,
}

/// `["price", "amount"]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel(
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BitstampOrderBook {
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub bids: Vec<DepthLevel>,
    #[serde(default)]
    pub asks: Vec<DepthLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitstampTransaction {
    /// Seconds since epoch, string or number
    pub date: Value,
    pub tid: Value,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// 0 = buy, 1 = sell (taker side)
    #[serde(default, rename = "type")]
    pub kind: Option<u8>,
}
