/*
[INPUT]:  Currency pairs and order book modes from callers
[OUTPUT]: Normalized or exchange-native market data
[POS]:    Service layer - capability traits exposed to callers
[UPDATE]: When adding market data operations
*/

use std::sync::Arc;

use async_trait::async_trait;

use crate::http::Result;
use crate::types::{CurrencyPair, ExchangeId, OrderBook, OrderBookType, Ticker, Trades};

/// Exchange-independent polling market data.
///
/// Each call is one request/response unit of work. Implementations keep no
/// mutable state between calls and never retry.
#[async_trait]
pub trait PollingMarketDataService: Send + Sync {
    fn exchange(&self) -> ExchangeId;

    fn supported_pairs(&self) -> Vec<CurrencyPair>;

    /// Latest ticker for `pair`.
    ///
    /// Fails with `NotFound` for an unlisted pair, `Transport` when the
    /// request fails and `Parse` when the body cannot be decoded.
    async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Ticker>;

    /// Order book for `pair`. `Full` on an exchange without full depth fails
    /// with `UnsupportedOperation`; it is never downgraded to `Partial`.
    async fn get_order_book(&self, pair: &CurrencyPair, mode: OrderBookType) -> Result<OrderBook>;

    /// Exactly one upstream page of recent trades, oldest first.
    async fn get_trades(&self, pair: &CurrencyPair) -> Result<Trades>;
}

/// Exchange-native responses with no normalization applied.
///
/// Kept separate from [`PollingMarketDataService`] so generic callers never
/// depend on wire types.
#[async_trait]
pub trait RawMarketDataService: Send + Sync {
    type RawTicker: Send;
    type RawOrderBook: Send;
    type RawTrades: Send;

    async fn get_raw_ticker(&self, pair: &CurrencyPair) -> Result<Self::RawTicker>;

    async fn get_raw_order_book(
        &self,
        pair: &CurrencyPair,
        mode: OrderBookType,
    ) -> Result<Self::RawOrderBook>;

    async fn get_raw_trades(&self, pair: &CurrencyPair) -> Result<Self::RawTrades>;
}

#[async_trait]
impl<S: PollingMarketDataService + ?Sized> PollingMarketDataService for Box<S> {
    fn exchange(&self) -> ExchangeId {
        (**self).exchange()
    }

    fn supported_pairs(&self) -> Vec<CurrencyPair> {
        (**self).supported_pairs()
    }

    async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Ticker> {
        (**self).get_ticker(pair).await
    }

    async fn get_order_book(&self, pair: &CurrencyPair, mode: OrderBookType) -> Result<OrderBook> {
        (**self).get_order_book(pair, mode).await
    }

    async fn get_trades(&self, pair: &CurrencyPair) -> Result<Trades> {
        (**self).get_trades(pair).await
    }
}

#[async_trait]
impl<S: PollingMarketDataService + ?Sized> PollingMarketDataService for Arc<S> {
    fn exchange(&self) -> ExchangeId {
        (**self).exchange()
    }

    fn supported_pairs(&self) -> Vec<CurrencyPair> {
        (**self).supported_pairs()
    }

    async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Ticker> {
        (**self).get_ticker(pair).await
    }

    async fn get_order_book(&self, pair: &CurrencyPair, mode: OrderBookType) -> Result<OrderBook> {
        (**self).get_order_book(pair, mode).await
    }

    async fn get_trades(&self, pair: &CurrencyPair) -> Result<Trades> {
        (**self).get_trades(pair).await
    }
}
