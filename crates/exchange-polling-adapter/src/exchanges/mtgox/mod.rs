/*
[INPUT]:  Currency pairs and MtGox API v2 response bodies
[OUTPUT]: MtGox endpoint routing plus decoded and normalized market data
[POS]:    Adapter layer - MtGox v2 public market data
[UPDATE]: When MtGox endpoints or supported markets change
*/

pub mod adapters;
pub mod dto;

use serde::de::DeserializeOwned;

use super::{Endpoint, ExchangeAdapter};
use crate::http::{MarketDataError, Result};
use crate::types::{CurrencyPair, ExchangeId, OrderBook, OrderBookType, Ticker, Trades};

pub use dto::{MtGoxDepth, MtGoxOrder, MtGoxResponse, MtGoxTicker, MtGoxTrade, MtGoxValue};

pub const DEFAULT_BASE_URL: &str = "https://data.mtgox.com";

/// Counter currencies quoted against BTC
const COUNTER_CURRENCIES: &[&str] = &[
    "USD", "AUD", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HKD", "JPY", "NOK", "NZD",
    "PLN", "RUB", "SEK", "SGD", "THB",
];

/// MtGox API v2 adapter. Supports partial and full depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct MtGox;

impl MtGox {
    pub fn new() -> Self {
        Self
    }

    fn money_path(pair: &CurrencyPair, call: &str) -> String {
        format!("/api/2/{}/money/{}", pair.joined(), call)
    }
}

/// Unwrap the `result`/`data` envelope shared by every v2 call.
fn unwrap_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let response: MtGoxResponse<T> = serde_json::from_slice(body)?;
    if response.result != "success" {
        let message = response
            .error
            .or(response.token)
            .unwrap_or_else(|| format!("result was {:?}", response.result));
        return Err(MarketDataError::Api { message });
    }
    response
        .data
        .ok_or_else(|| MarketDataError::Parse("success response without data".to_string()))
}

impl ExchangeAdapter for MtGox {
    type RawTicker = MtGoxTicker;
    type RawOrderBook = MtGoxDepth;
    type RawTrades = Vec<MtGoxTrade>;

    fn id(&self) -> ExchangeId {
        ExchangeId::MtGox
    }

    fn default_base_url(&self) -> &'static str {
        DEFAULT_BASE_URL
    }

    fn supports_pair(&self, pair: &CurrencyPair) -> bool {
        *pair.base() == "BTC" && COUNTER_CURRENCIES.iter().any(|code| *pair.counter() == *code)
    }

    fn supported_pairs(&self) -> Vec<CurrencyPair> {
        COUNTER_CURRENCIES
            .iter()
            .filter_map(|counter| CurrencyPair::from_codes("BTC", counter).ok())
            .collect()
    }

    fn supports_order_book(&self, _mode: OrderBookType) -> bool {
        true
    }

    fn ticker_endpoint(&self, pair: &CurrencyPair) -> Endpoint {
        Endpoint::new(Self::money_path(pair, "ticker"))
    }

    fn order_book_endpoint(&self, pair: &CurrencyPair, mode: OrderBookType) -> Endpoint {
        match mode {
            OrderBookType::Partial => Endpoint::new(Self::money_path(pair, "depth/fetch")),
            OrderBookType::Full => Endpoint::new(Self::money_path(pair, "depth/full")),
        }
    }

    fn trades_endpoint(&self, pair: &CurrencyPair) -> Endpoint {
        Endpoint::new(Self::money_path(pair, "trades/fetch"))
    }

    fn decode_ticker(&self, body: &[u8]) -> Result<MtGoxTicker> {
        unwrap_envelope(body)
    }

    fn decode_order_book(&self, body: &[u8]) -> Result<MtGoxDepth> {
        unwrap_envelope(body)
    }

    fn decode_trades(&self, body: &[u8]) -> Result<Vec<MtGoxTrade>> {
        unwrap_envelope(body)
    }

    fn adapt_ticker(&self, raw: &MtGoxTicker, pair: &CurrencyPair) -> Result<Ticker> {
        adapters::adapt_ticker(raw, pair)
    }

    fn adapt_order_book(&self, raw: &MtGoxDepth, pair: &CurrencyPair) -> Result<OrderBook> {
        adapters::adapt_order_book(raw, pair)
    }

    fn adapt_trades(&self, raw: &Vec<MtGoxTrade>, pair: &CurrencyPair) -> Result<Trades> {
        adapters::adapt_trades(raw, pair)
    }
}
