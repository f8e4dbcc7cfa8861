/*
[INPUT]:  Closed vocabularies used across requests and domain models
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for market data requests
[UPDATE]: When adding exchanges or request modes
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::http::MarketDataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Ask,
    Bid,
}

/// Order book retrieval depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBookType {
    /// Top-of-book only; the depth limit is exchange defined.
    #[default]
    Partial,
    /// Entire visible book.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    #[serde(alias = "mt_gox")]
    MtGox,
    Bitstamp,
}

impl ExchangeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeId::MtGox => "mtgox",
            ExchangeId::Bitstamp => "bitstamp",
        }
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mtgox" | "mt_gox" => Ok(ExchangeId::MtGox),
            "bitstamp" => Ok(ExchangeId::Bitstamp),
            other => Err(MarketDataError::Config(format!("unknown exchange: {other}"))),
        }
    }
}
