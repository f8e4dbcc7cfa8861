/*
[INPUT]:  Currency codes supplied by callers or exchange payloads
[OUTPUT]: Validated Currency codes and CurrencyPair lookup keys
[POS]:    Data layer - market identifiers shared by every request
[UPDATE]: When adding currency constants or pair parsing formats
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::http::{MarketDataError, Result};

/// Upper-case ISO-like currency code (e.g. `BTC`, `USD`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub const BTC: &'static str = "BTC";
    pub const LTC: &'static str = "LTC";
    pub const USD: &'static str = "USD";
    pub const EUR: &'static str = "EUR";
    pub const GBP: &'static str = "GBP";
    pub const JPY: &'static str = "JPY";
    pub const PLN: &'static str = "PLN";

    /// Create a currency code, normalizing to upper case.
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MarketDataError::Parse(format!(
                "invalid currency code: {code:?}"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = MarketDataError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

impl PartialEq<str> for Currency {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for Currency {
    fn eq(&self, other: &&str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

/// Ordered (base, counter) market identifier, e.g. `BTC/USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyPair {
    base: Currency,
    counter: Currency,
}

impl CurrencyPair {
    pub fn new(base: Currency, counter: Currency) -> Self {
        Self { base, counter }
    }

    /// Build a pair from two raw codes.
    pub fn from_codes(base: &str, counter: &str) -> Result<Self> {
        Ok(Self::new(Currency::new(base)?, Currency::new(counter)?))
    }

    pub fn base(&self) -> &Currency {
        &self.base
    }

    pub fn counter(&self) -> &Currency {
        &self.counter
    }

    /// Concatenated codes as used in most REST paths (`BTCUSD`).
    pub fn joined(&self) -> String {
        format!("{}{}", self.base, self.counter)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

impl FromStr for CurrencyPair {
    type Err = MarketDataError;

    /// Parses `BTC/USD`, `BTC-USD` or `BTC_USD`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(['/', '-', '_']);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(base), Some(counter), None) => Self::from_codes(base, counter),
            _ => Err(MarketDataError::Parse(format!(
                "invalid currency pair: {s:?}"
            ))),
        }
    }
}
