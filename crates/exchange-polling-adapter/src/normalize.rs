/*
[INPUT]:  Exchange-neutral price levels, raw numeric JSON values, timestamps
[OUTPUT]: LimitOrder sequences, decimals and consistency-checked pairs
[POS]:    Normalizer - pure helpers shared by every exchange adapter
[UPDATE]: When adding unit conversions or consistency checks
*/

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::http::{MarketDataError, Result};
use crate::types::{Currency, CurrencyPair, LimitOrder, OrderSide};

/// One `[price, amount]` row from a depth response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    pub price: Decimal,
    pub amount: Decimal,
    pub timestamp: Option<DateTime<Utc>>,
}

impl PriceLevel {
    pub fn new(price: Decimal, amount: Decimal) -> Self {
        Self {
            price,
            amount,
            timestamp: None,
        }
    }
}

/// Tag one side of a book, preserving input order.
///
/// The result is not re-sorted. Ordering is checked later by
/// [`OrderBook::new`](crate::types::OrderBook::new).
pub fn adapt_orders<'a, I>(levels: I, pair: &CurrencyPair, side: OrderSide) -> Result<Vec<LimitOrder>>
where
    I: IntoIterator<Item = &'a PriceLevel>,
{
    levels
        .into_iter()
        .map(|level| {
            if level.price.is_sign_negative() && !level.price.is_zero() {
                return Err(MarketDataError::Parse(format!(
                    "negative {side:?} price {} for {pair}",
                    level.price
                )));
            }
            if level.amount.is_sign_negative() && !level.amount.is_zero() {
                return Err(MarketDataError::Parse(format!(
                    "negative {side:?} amount {} for {pair}",
                    level.amount
                )));
            }
            Ok(LimitOrder::new(
                side,
                level.price,
                level.amount,
                pair.clone(),
                None,
                level.timestamp,
            ))
        })
        .collect()
}

/// Fail when the response reports a currency other than the requested one.
pub fn ensure_currency(expected: &Currency, reported: Option<&str>, field: &str) -> Result<()> {
    match reported {
        Some(code) if *expected != code => Err(MarketDataError::Parse(format!(
            "{field} currency mismatch: requested {expected}, response reports {code}"
        ))),
        _ => Ok(()),
    }
}

/// Check both legs of a pair against codes reported by the exchange.
pub fn ensure_pair(requested: &CurrencyPair, base: Option<&str>, counter: Option<&str>) -> Result<()> {
    ensure_currency(requested.base(), base, "base")?;
    ensure_currency(requested.counter(), counter, "counter")
}

/// Parse a JSON number or numeric string without going through `f64`.
///
/// Relies on serde_json's `arbitrary_precision`, which keeps the source text
/// of every number decoded into a [`Value`].
///
/// `null`, absent and empty strings are `None`; they are never read as zero.
pub fn decimal_from_json(value: Option<&Value>) -> Result<Option<Decimal>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(None),
        Some(Value::String(raw)) => parse_decimal(raw.trim()).map(Some),
        Some(Value::Number(number)) => parse_decimal(&number.to_string()).map(Some),
        Some(other) => Err(MarketDataError::Parse(format!(
            "expected decimal, found {other}"
        ))),
    }
}

/// Parse a decimal string, accepting exponent notation.
pub fn parse_decimal(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| MarketDataError::Parse(format!("invalid decimal {raw:?}: {e}")))
}

/// Convert a scaled integer (e.g. satoshis) into a decimal with `scale` places.
pub fn scaled_decimal(raw: &str, scale: u32) -> Result<Decimal> {
    let value = i128::from_str(raw.trim())
        .map_err(|e| MarketDataError::Parse(format!("invalid scaled integer {raw:?}: {e}")))?;
    Decimal::try_from_i128_with_scale(value, scale).map_err(MarketDataError::from)
}

pub fn timestamp_from_secs(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| MarketDataError::Parse(format!("timestamp out of range: {secs}")))
}

pub fn timestamp_from_micros(micros: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| MarketDataError::Parse(format!("timestamp out of range: {micros}us")))
}
