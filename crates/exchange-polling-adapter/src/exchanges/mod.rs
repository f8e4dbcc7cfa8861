/*
[INPUT]:  Exchange identifiers and exchange-native wire formats
[OUTPUT]: Endpoint routing, DTO decoding and normalization per exchange
[POS]:    Adapter layer - pairs a wire format with its normalizer
[UPDATE]: When adding exchanges or changing the adapter contract
*/

use std::collections::BTreeMap;

use crate::http::Result;
use crate::types::{CurrencyPair, ExchangeId, OrderBook, OrderBookType, Ticker, Trades};

pub mod bitstamp;
pub mod mtgox;
pub mod registry;

pub use bitstamp::Bitstamp;
pub use mtgox::MtGox;
pub use registry::ExchangeRegistry;

/// Path and query of one public endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.insert(key.to_string(), value.into());
        self
    }
}

/// Everything that differs between exchanges: routing, wire DTOs and the
/// mapping from those DTOs to the domain model.
///
/// `decode_*` and `adapt_*` are pure; the network lives in
/// [`MarketDataClient`](crate::market_data::MarketDataClient).
pub trait ExchangeAdapter: Send + Sync + 'static {
    type RawTicker: Send + 'static;
    type RawOrderBook: Send + 'static;
    type RawTrades: Send + 'static;

    fn id(&self) -> ExchangeId;

    fn default_base_url(&self) -> &'static str;

    fn supports_pair(&self, pair: &CurrencyPair) -> bool;

    fn supported_pairs(&self) -> Vec<CurrencyPair>;

    fn supports_order_book(&self, mode: OrderBookType) -> bool;

    fn ticker_endpoint(&self, pair: &CurrencyPair) -> Endpoint;

    fn order_book_endpoint(&self, pair: &CurrencyPair, mode: OrderBookType) -> Endpoint;

    fn trades_endpoint(&self, pair: &CurrencyPair) -> Endpoint;

    fn decode_ticker(&self, body: &[u8]) -> Result<Self::RawTicker>;

    fn decode_order_book(&self, body: &[u8]) -> Result<Self::RawOrderBook>;

    fn decode_trades(&self, body: &[u8]) -> Result<Self::RawTrades>;

    fn adapt_ticker(&self, raw: &Self::RawTicker, pair: &CurrencyPair) -> Result<Ticker>;

    fn adapt_order_book(&self, raw: &Self::RawOrderBook, pair: &CurrencyPair) -> Result<OrderBook>;

    fn adapt_trades(&self, raw: &Self::RawTrades, pair: &CurrencyPair) -> Result<Trades>;
}
