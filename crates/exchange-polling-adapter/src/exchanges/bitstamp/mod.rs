/*
[INPUT]:  Currency pairs and Bitstamp API v1 response bodies
[OUTPUT]: Bitstamp endpoint routing plus decoded and normalized market data
[POS]:    Adapter layer - Bitstamp v1 public market data
[UPDATE]: When Bitstamp endpoints or supported markets change
*/

pub mod adapters;
pub mod dto;

use super::{Endpoint, ExchangeAdapter};
use crate::http::Result;
use crate::types::{CurrencyPair, ExchangeId, OrderBook, OrderBookType, Ticker, Trades};

pub use dto::{BitstampOrderBook, BitstampTicker, BitstampTransaction, DepthLevel};

pub const DEFAULT_BASE_URL: &str = "https://www.bitstamp.net";

/// Bitstamp API v1 adapter.
///
/// v1 lists only BTC/USD and serves one grouped depth snapshot, so
/// [`OrderBookType::Full`] is not offered.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bitstamp;

impl Bitstamp {
    pub fn new() -> Self {
        Self
    }
}

impl ExchangeAdapter for Bitstamp {
    type RawTicker = BitstampTicker;
    type RawOrderBook = BitstampOrderBook;
    type RawTrades = Vec<BitstampTransaction>;

    fn id(&self) -> ExchangeId {
        ExchangeId::Bitstamp
    }

    fn default_base_url(&self) -> &'static str {
        DEFAULT_BASE_URL
    }

    fn supports_pair(&self, pair: &CurrencyPair) -> bool {
        *pair.base() == "BTC" && *pair.counter() == "USD"
    }

    fn supported_pairs(&self) -> Vec<CurrencyPair> {
        CurrencyPair::from_codes("BTC", "USD").into_iter().collect()
    }

    fn supports_order_book(&self, mode: OrderBookType) -> bool {
        mode == OrderBookType::Partial
    }

    fn ticker_endpoint(&self, _pair: &CurrencyPair) -> Endpoint {
        Endpoint::new("/api/ticker/")
    }

    fn order_book_endpoint(&self, _pair: &CurrencyPair, _mode: OrderBookType) -> Endpoint {
        Endpoint::new("/api/order_book/").param("group", "1")
    }

    fn trades_endpoint(&self, _pair: &CurrencyPair) -> Endpoint {
        Endpoint::new("/api/transactions/").param("time", "minute")
    }

    fn decode_ticker(&self, body: &[u8]) -> Result<BitstampTicker> {
        Ok(serde_json::from_slice(body)?)
    }

    fn decode_order_book(&self, body: &[u8]) -> Result<BitstampOrderBook> {
        Ok(serde_json::from_slice(body)?)
    }

    fn decode_trades(&self, body: &[u8]) -> Result<Vec<BitstampTransaction>> {
        Ok(serde_json::from_slice(body)?)
    }

    fn adapt_ticker(&self, raw: &BitstampTicker, pair: &CurrencyPair) -> Result<Ticker> {
        adapters::adapt_ticker(raw, pair)
    }

    fn adapt_order_book(&self, raw: &BitstampOrderBook, pair: &CurrencyPair) -> Result<OrderBook> {
        adapters::adapt_order_book(raw, pair)
    }

    fn adapt_trades(&self, raw: &Vec<BitstampTransaction>, pair: &CurrencyPair) -> Result<Trades> {
        adapters::adapt_trades(raw, pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_partial_depth_is_supported() {
        let adapter = Bitstamp::new();
        assert!(adapter.supports_order_book(OrderBookType::Partial));
        assert!(!adapter.supports_order_book(OrderBookType::Full));
    }

    #[test]
    fn only_btc_usd_is_listed() {
        let adapter = Bitstamp::new();
        let btc_usd = CurrencyPair::from_codes("BTC", "USD").unwrap();
        let btc_eur = CurrencyPair::from_codes("BTC", "EUR").unwrap();
        assert!(adapter.supports_pair(&btc_usd));
        assert!(!adapter.supports_pair(&btc_eur));
        assert_eq!(adapter.supported_pairs(), vec![btc_usd]);
    }

    #[test]
    fn order_book_endpoint_groups_levels() {
        let endpoint = Bitstamp::new()
            .order_book_endpoint(&CurrencyPair::from_codes("BTC", "USD").unwrap(), OrderBookType::Partial);
        assert_eq!(endpoint.path, "/api/order_book/");
        assert_eq!(endpoint.query.get("group").map(String::as_str), Some("1"));
    }
}
