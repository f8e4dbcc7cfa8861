/*
[INPUT]:  MtGox wire DTOs and the requested currency pair
[OUTPUT]: Ticker, OrderBook and Trades in the unified model
[POS]:    Normalizer - MtGox specific mapping rules
[UPDATE]: When MtGox units, field meanings or ordering conventions change
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use super::dto::{MtGoxDepth, MtGoxOrder, MtGoxTicker, MtGoxTrade, MtGoxValue};
use crate::http::{MarketDataError, Result};
use crate::normalize::{
    self, PriceLevel, decimal_from_json, ensure_currency, ensure_pair, parse_decimal,
    scaled_decimal,
};
use crate::types::{
    Currency, CurrencyPair, LimitOrder, OrderBook, OrderSide, Ticker, Trade, Trades,
};

/// Decimal places behind MtGox `*_int` fields for a currency.
pub fn currency_scale(code: &str) -> u32 {
    match code.to_ascii_uppercase().as_str() {
        "BTC" | "LTC" => 8,
        "JPY" | "SEK" => 3,
        _ => 5,
    }
}

/// Read a money value denominated in `expected`.
pub fn adapt_value(value: Option<&MtGoxValue>, expected: &Currency, field: &str) -> Result<Option<Decimal>> {
    let Some(value) = value else {
        return Ok(None);
    };
    ensure_currency(expected, value.currency.as_deref(), field)?;

    match (value.value.as_deref(), value.value_int.as_deref()) {
        (Some(raw), _) if !raw.trim().is_empty() => parse_decimal(raw.trim()).map(Some),
        (_, Some(raw)) if !raw.trim().is_empty() => {
            scaled_decimal(raw, currency_scale(expected.code())).map(Some)
        }
        _ => Ok(None),
    }
}

pub fn adapt_ticker(ticker: &MtGoxTicker, pair: &CurrencyPair) -> Result<Ticker> {
    ensure_currency(pair.base(), ticker.item.as_deref(), "item")?;
    let counter = pair.counter();

    Ticker {
        currency_pair: pair.clone(),
        last: adapt_value(ticker.last.as_ref(), counter, "last")?,
        bid: adapt_value(ticker.buy.as_ref(), counter, "buy")?,
        ask: adapt_value(ticker.sell.as_ref(), counter, "sell")?,
        high: adapt_value(ticker.high.as_ref(), counter, "high")?,
        low: adapt_value(ticker.low.as_ref(), counter, "low")?,
        vwap: adapt_value(ticker.vwap.as_ref(), counter, "vwap")?,
        volume: adapt_value(ticker.vol.as_ref(), pair.base(), "vol")?,
        timestamp: micros(ticker.now.as_deref())?,
    }
    .validate()
}

fn micros(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => {
            let value = raw
                .parse::<i64>()
                .map_err(|e| MarketDataError::Parse(format!("invalid timestamp {raw:?}: {e}")))?;
            normalize::timestamp_from_micros(value).map(Some)
        }
    }
}

/// Prefer the exact scaled integer, fall back to the textual JSON number.
fn required_amount(
    int_value: Option<&str>,
    json_value: Option<&Value>,
    scale: u32,
    field: &str,
) -> Result<Decimal> {
    if let Some(raw) = int_value.filter(|raw| !raw.trim().is_empty()) {
        return scaled_decimal(raw, scale);
    }
    decimal_from_json(json_value)?
        .ok_or_else(|| MarketDataError::Parse(format!("depth level without {field}")))
}

pub fn adapt_price_levels(orders: &[MtGoxOrder], pair: &CurrencyPair) -> Result<Vec<PriceLevel>> {
    let price_scale = currency_scale(pair.counter().code());
    let amount_scale = currency_scale(pair.base().code());

    orders
        .iter()
        .map(|order| {
            Ok(PriceLevel {
                price: required_amount(
                    order.price_int.as_deref(),
                    order.price.as_ref(),
                    price_scale,
                    "price",
                )?,
                amount: required_amount(
                    order.amount_int.as_deref(),
                    order.amount.as_ref(),
                    amount_scale,
                    "amount",
                )?,
                timestamp: micros(order.stamp.as_deref())?,
            })
        })
        .collect()
}

/// Adapt one side of a MtGox depth payload, keeping exchange order.
pub fn adapt_orders(orders: &[MtGoxOrder], pair: &CurrencyPair, side: OrderSide) -> Result<Vec<LimitOrder>> {
    let levels = adapt_price_levels(orders, pair)?;
    normalize::adapt_orders(&levels, pair, side)
}

pub fn adapt_order_book(depth: &MtGoxDepth, pair: &CurrencyPair) -> Result<OrderBook> {
    let counter = pair.counter();
    let filter_currencies = [&depth.filter_min_price, &depth.filter_max_price];
    for filter in filter_currencies.into_iter().flatten() {
        ensure_currency(counter, filter.currency.as_deref(), "filter")?;
    }

    let asks = adapt_orders(&depth.asks, pair, OrderSide::Ask)?;
    let mut bids = adapt_orders(&depth.bids, pair, OrderSide::Bid)?;

    // v2 depth lists bids from the lowest price up
    if let (Some(first), Some(last)) = (bids.first(), bids.last()) {
        if first.limit_price() < last.limit_price() {
            bids.reverse();
        }
    }

    OrderBook::new(asks, bids, micros(depth.now.as_deref())?)
}

/// MtGox reports the taker's order type; the maker sat on the other side.
fn maker_side(trade_type: Option<&str>) -> Option<OrderSide> {
    match trade_type? {
        "bid" => Some(OrderSide::Ask),
        "ask" => Some(OrderSide::Bid),
        _ => None,
    }
}

pub fn adapt_trade(trade: &MtGoxTrade, pair: &CurrencyPair) -> Result<Trade> {
    ensure_pair(pair, trade.item.as_deref(), trade.price_currency.as_deref())?;

    let price = required_amount(
        trade.price_int.as_deref(),
        trade.price.as_ref(),
        currency_scale(pair.counter().code()),
        "price",
    )?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(MarketDataError::Parse(format!(
            "negative trade price {price} in trade {}",
            trade.tid
        )));
    }

    Ok(Trade {
        price,
        amount: required_amount(
            trade.amount_int.as_deref(),
            trade.amount.as_ref(),
            currency_scale(pair.base().code()),
            "amount",
        )?,
        currency_pair: pair.clone(),
        timestamp: normalize::timestamp_from_secs(trade.date)?,
        id: trade.tid.clone(),
        side: maker_side(trade.trade_type.as_deref()),
    })
}

/// Trades arrive oldest first and are kept that way.
pub fn adapt_trades(trades: &[MtGoxTrade], pair: &CurrencyPair) -> Result<Trades> {
    trades
        .iter()
        .map(|trade| adapt_trade(trade, pair))
        .collect::<Result<Vec<_>>>()
        .map(Trades::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn dec(raw: &str) -> Decimal {
        raw.parse().expect("decimal")
    }

    fn pair(base: &str, counter: &str) -> CurrencyPair {
        CurrencyPair::from_codes(base, counter).expect("pair")
    }

    fn usd(value: &str) -> MtGoxValue {
        MtGoxValue {
            value: Some(value.to_string()),
            currency: Some("USD".to_string()),
            ..MtGoxValue::default()
        }
    }

    fn order(price: f64, amount: f64) -> MtGoxOrder {
        MtGoxOrder {
            price: Some(json!(price)),
            amount: Some(json!(amount)),
            price_int: None,
            amount_int: None,
            stamp: None,
        }
    }

    #[rstest]
    #[case("BTC", 8)]
    #[case("usd", 5)]
    #[case("EUR", 5)]
    #[case("JPY", 3)]
    fn scale_per_currency(#[case] code: &str, #[case] expected: u32) {
        assert_eq!(currency_scale(code), expected);
    }

    #[test]
    fn value_falls_back_to_scaled_int() {
        let value = MtGoxValue {
            value_int: Some("9265000".to_string()),
            currency: Some("USD".to_string()),
            ..MtGoxValue::default()
        };
        let usd = Currency::new("USD").unwrap();
        assert_eq!(adapt_value(Some(&value), &usd, "last").unwrap(), Some(dec("92.65")));
        assert_eq!(adapt_value(None, &usd, "last").unwrap(), None);
    }

    #[test]
    fn ticker_maps_buy_sell_to_bid_ask() {
        let raw = MtGoxTicker {
            last: Some(usd("92.65")),
            buy: Some(usd("92.60")),
            sell: Some(usd("92.70")),
            item: Some("BTC".to_string()),
            now: Some("1364767201000000".to_string()),
            ..MtGoxTicker::default()
        };

        let ticker = adapt_ticker(&raw, &pair("BTC", "USD")).unwrap();

        assert_eq!(ticker.last, Some(dec("92.65")));
        assert_eq!(ticker.bid, Some(dec("92.60")));
        assert_eq!(ticker.ask, Some(dec("92.70")));
        assert_eq!(ticker.high, None);
        assert_eq!(ticker.volume, None);
        assert_eq!(
            ticker.timestamp,
            Some(normalize::timestamp_from_secs(1_364_767_201).unwrap())
        );
    }

    #[test]
    fn ticker_in_other_currency_is_rejected() {
        let raw = MtGoxTicker {
            last: Some(usd("92.65")),
            item: Some("BTC".to_string()),
            ..MtGoxTicker::default()
        };

        let err = adapt_ticker(&raw, &pair("BTC", "EUR")).unwrap_err();

        assert!(matches!(err, MarketDataError::Parse(_)));
    }

    #[test]
    fn order_book_reverses_ascending_bids() {
        let depth = MtGoxDepth {
            asks: vec![order(100.5, 2.0), order(101.0, 1.0)],
            bids: vec![order(98.0, 1.0), order(99.0, 1.0), order(99.5, 0.5)],
            ..MtGoxDepth::default()
        };

        let book = adapt_order_book(&depth, &pair("BTC", "USD")).unwrap();

        let bid_prices: Vec<Decimal> = book.bids().iter().map(LimitOrder::limit_price).collect();
        assert_eq!(bid_prices, vec![dec("99.5"), dec("99"), dec("98")]);
        assert_eq!(book.best_ask().unwrap().limit_price(), dec("100.5"));
        assert_eq!(book.best_ask().unwrap().tradable_amount(), dec("2"));
    }

    #[test]
    fn order_book_prefers_int_fields() {
        let depth = MtGoxDepth {
            asks: vec![MtGoxOrder {
                price: Some(json!(0.1)),
                amount: Some(json!(0.3)),
                price_int: Some("10050000".to_string()),
                amount_int: Some("200000000".to_string()),
                stamp: Some("1364767190964182".to_string()),
            }],
            ..MtGoxDepth::default()
        };

        let book = adapt_order_book(&depth, &pair("BTC", "USD")).unwrap();
        let ask = &book.asks()[0];

        assert_eq!(ask.limit_price(), dec("100.5"));
        assert_eq!(ask.tradable_amount(), dec("2"));
        assert!(ask.timestamp().is_some());
    }

    #[test]
    fn order_book_rejects_level_without_price() {
        let depth = MtGoxDepth {
            asks: vec![MtGoxOrder {
                price: None,
                amount: Some(json!(1.0)),
                price_int: None,
                amount_int: None,
                stamp: None,
            }],
            ..MtGoxDepth::default()
        };

        assert!(adapt_order_book(&depth, &pair("BTC", "USD")).is_err());
    }

    #[test]
    fn trades_check_both_currencies() {
        let trade = MtGoxTrade {
            date: 1_364_767_201,
            price: Some(json!("92.65")),
            amount: Some(json!("0.02")),
            price_int: None,
            amount_int: None,
            tid: "1".to_string(),
            price_currency: Some("EUR".to_string()),
            item: Some("BTC".to_string()),
            trade_type: Some("bid".to_string()),
            primary: Some("Y".to_string()),
            properties: None,
        };

        let err = adapt_trades(&[trade.clone()], &pair("BTC", "USD")).unwrap_err();
        assert!(matches!(err, MarketDataError::Parse(_)));

        let trades = adapt_trades(&[trade], &pair("BTC", "EUR")).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades.trades()[0].side, Some(OrderSide::Ask));
        assert_eq!(trades.trades()[0].price, dec("92.65"));
    }
}
