/*
[INPUT]:  Exchange adapter, shared transport and request timeout
[OUTPUT]: PollingMarketDataService and RawMarketDataService implementations
[POS]:    Service layer - polling client joining transport and normalizer
[UPDATE]: When request validation or error mapping changes
*/

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::service::{PollingMarketDataService, RawMarketDataService};
use crate::exchanges::{Endpoint, ExchangeAdapter};
use crate::http::{
    ClientConfig, HttpTransport, MarketDataError, Result, Transport, TransportError,
    TransportRequest,
};
use crate::types::{CurrencyPair, ExchangeId, OrderBook, OrderBookType, Ticker, Trades};

/// Polling client for one exchange.
///
/// Implements both capability traits; hand out `&dyn PollingMarketDataService`
/// to generic code and keep the concrete type where raw DTOs are needed.
pub struct MarketDataClient<A: ExchangeAdapter> {
    adapter: A,
    transport: Arc<dyn Transport>,
    request_timeout: Duration,
}

impl<A: ExchangeAdapter> std::fmt::Debug for MarketDataClient<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataClient")
            .field("exchange", &self.adapter.id())
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl<A: ExchangeAdapter> MarketDataClient<A> {
    /// Create a client over any transport
    pub fn new(adapter: A, transport: Arc<dyn Transport>) -> Self {
        Self {
            adapter,
            transport,
            request_timeout: ClientConfig::default().timeout,
        }
    }

    /// Create a client talking HTTP to the adapter's default base URL
    pub fn over_http(adapter: A, config: &ClientConfig) -> Result<Self> {
        let base_url = adapter.default_base_url();
        Self::over_http_with_base_url(adapter, base_url, config)
    }

    /// Create a client talking HTTP to an explicit base URL
    pub fn over_http_with_base_url(adapter: A, base_url: &str, config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(base_url, config)?;
        Ok(Self::new(adapter, Arc::new(transport)).with_timeout(config.timeout))
    }

    /// Per-request timeout handed to the transport
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn ensure_listed(&self, pair: &CurrencyPair) -> Result<()> {
        if self.adapter.supports_pair(pair) {
            Ok(())
        } else {
            Err(self.not_found(pair))
        }
    }

    fn ensure_mode(&self, mode: OrderBookType) -> Result<()> {
        if self.adapter.supports_order_book(mode) {
            Ok(())
        } else {
            Err(MarketDataError::UnsupportedOperation {
                exchange: self.adapter.id(),
                operation: format!("{mode:?} order book").to_lowercase(),
            })
        }
    }

    fn not_found(&self, pair: &CurrencyPair) -> MarketDataError {
        MarketDataError::NotFound {
            exchange: self.adapter.id(),
            pair: pair.to_string(),
        }
    }

    async fn fetch(&self, endpoint: Endpoint, pair: &CurrencyPair) -> Result<Vec<u8>> {
        debug!(
            exchange = %self.adapter.id(),
            pair = %pair,
            endpoint = %endpoint.path,
            "polling market data"
        );
        let request = TransportRequest::new(endpoint.path, self.request_timeout)
            .with_query(endpoint.query);

        match self.transport.request(request).await {
            Ok(body) => Ok(body),
            Err(TransportError::HttpStatus { status: 404, .. }) => Err(self.not_found(pair)),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl<A: ExchangeAdapter> RawMarketDataService for MarketDataClient<A> {
    type RawTicker = A::RawTicker;
    type RawOrderBook = A::RawOrderBook;
    type RawTrades = A::RawTrades;

    async fn get_raw_ticker(&self, pair: &CurrencyPair) -> Result<A::RawTicker> {
        self.ensure_listed(pair)?;
        let body = self.fetch(self.adapter.ticker_endpoint(pair), pair).await?;
        self.adapter.decode_ticker(&body)
    }

    async fn get_raw_order_book(
        &self,
        pair: &CurrencyPair,
        mode: OrderBookType,
    ) -> Result<A::RawOrderBook> {
        self.ensure_mode(mode)?;
        self.ensure_listed(pair)?;
        let body = self
            .fetch(self.adapter.order_book_endpoint(pair, mode), pair)
            .await?;
        self.adapter.decode_order_book(&body)
    }

    async fn get_raw_trades(&self, pair: &CurrencyPair) -> Result<A::RawTrades> {
        self.ensure_listed(pair)?;
        let body = self.fetch(self.adapter.trades_endpoint(pair), pair).await?;
        self.adapter.decode_trades(&body)
    }
}

#[async_trait]
impl<A: ExchangeAdapter> PollingMarketDataService for MarketDataClient<A> {
    fn exchange(&self) -> ExchangeId {
        self.adapter.id()
    }

    fn supported_pairs(&self) -> Vec<CurrencyPair> {
        self.adapter.supported_pairs()
    }

    async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Ticker> {
        let raw = self.get_raw_ticker(pair).await?;
        self.adapter.adapt_ticker(&raw, pair)
    }

    async fn get_order_book(&self, pair: &CurrencyPair, mode: OrderBookType) -> Result<OrderBook> {
        let raw = self.get_raw_order_book(pair, mode).await?;
        self.adapter.adapt_order_book(&raw, pair)
    }

    async fn get_trades(&self, pair: &CurrencyPair) -> Result<Trades> {
        let raw = self.get_raw_trades(pair).await?;
        self.adapter.adapt_trades(&raw, pair)
    }
}
