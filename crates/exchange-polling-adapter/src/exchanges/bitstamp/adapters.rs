/*
[INPUT]:  Bitstamp wire DTOs and the requested currency pair
[OUTPUT]: Ticker, OrderBook and Trades in the unified model
[POS]:    Normalizer - Bitstamp specific mapping rules
[UPDATE]: When Bitstamp field meanings or ordering conventions change
*/

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::dto::{BitstampOrderBook, BitstampTicker, BitstampTransaction, DepthLevel};
use crate::http::{MarketDataError, Result};
use crate::normalize::{self, PriceLevel, decimal_from_json};
use crate::types::{CurrencyPair, OrderBook, OrderSide, Ticker, Trade, Trades};

fn seconds(value: Option<&Value>) -> Result<Option<DateTime<Utc>>> {
    let secs = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(raw)) if raw.trim().is_empty() => return Ok(None),
        Some(Value::String(raw)) => raw.trim().parse::<i64>().ok(),
        Some(Value::Number(number)) => number.as_i64(),
        Some(_) => None,
    };
    match secs {
        Some(secs) => normalize::timestamp_from_secs(secs).map(Some),
        None => Err(MarketDataError::Parse(format!(
            "invalid timestamp: {}",
            value.map(Value::to_string).unwrap_or_default()
        ))),
    }
}

pub fn adapt_ticker(ticker: &BitstampTicker, pair: &CurrencyPair) -> Result<Ticker> {
    Ticker {
        currency_pair: pair.clone(),
        last: decimal_from_json(ticker.last.as_ref())?,
        bid: decimal_from_json(ticker.bid.as_ref())?,
        ask: decimal_from_json(ticker.ask.as_ref())?,
        high: decimal_from_json(ticker.high.as_ref())?,
        low: decimal_from_json(ticker.low.as_ref())?,
        vwap: decimal_from_json(ticker.vwap.as_ref())?,
        volume: decimal_from_json(ticker.volume.as_ref())?,
        timestamp: seconds(ticker.timestamp.as_ref())?,
    }
    .validate()
}

fn levels(rows: &[DepthLevel]) -> Vec<PriceLevel> {
    rows.iter()
        .map(|DepthLevel(price, amount)| PriceLevel::new(*price, *amount))
        .collect()
}

/// Bitstamp already ranks both sides best-first.
pub fn adapt_order_book(book: &BitstampOrderBook, pair: &CurrencyPair) -> Result<OrderBook> {
    let asks = normalize::adapt_orders(&levels(&book.asks), pair, OrderSide::Ask)?;
    let bids = normalize::adapt_orders(&levels(&book.bids), pair, OrderSide::Bid)?;
    OrderBook::new(asks, bids, seconds(book.timestamp.as_ref())?)
}

fn maker_side(kind: Option<u8>) -> Option<OrderSide> {
    match kind? {
        0 => Some(OrderSide::Ask),
        1 => Some(OrderSide::Bid),
        _ => None,
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(raw) => raw.clone(),
        other => other.to_string(),
    }
}

pub fn adapt_trade(tx: &BitstampTransaction, pair: &CurrencyPair) -> Result<Trade> {
    if tx.price.is_sign_negative() && !tx.price.is_zero() {
        return Err(MarketDataError::Parse(format!(
            "negative trade price {} in trade {}",
            tx.price,
            text(&tx.tid)
        )));
    }
    let timestamp = seconds(Some(&tx.date))?
        .ok_or_else(|| MarketDataError::Parse(format!("trade {} without date", text(&tx.tid))))?;

    Ok(Trade {
        price: tx.price,
        amount: tx.amount,
        currency_pair: pair.clone(),
        timestamp,
        id: text(&tx.tid),
        side: maker_side(tx.kind),
    })
}

/// Bitstamp lists newest first; flip to oldest first.
pub fn adapt_trades(transactions: &[BitstampTransaction], pair: &CurrencyPair) -> Result<Trades> {
    transactions
        .iter()
        .rev()
        .map(|tx| adapt_trade(tx, pair))
        .collect::<Result<Vec<_>>>()
        .map(Trades::new)
}
