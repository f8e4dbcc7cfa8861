/*
[INPUT]:  Any PollingMarketDataService
[OUTPUT]: Synchronous ticker/order book/trades calls
[POS]:    Service layer - blocking facade for callers without a runtime
[UPDATE]: When the polling service surface changes
*/

use tokio::runtime::{Builder, Runtime};

use crate::http::{MarketDataError, Result};
use crate::market_data::PollingMarketDataService;
use crate::types::{CurrencyPair, ExchangeId, OrderBook, OrderBookType, Ticker, Trades};

/// Drives a [`PollingMarketDataService`] on a private current-thread runtime.
///
/// Must not be used from inside an async context; the calls block the
/// current thread until the request completes or times out.
pub struct BlockingMarketDataClient {
    inner: Box<dyn PollingMarketDataService>,
    runtime: Runtime,
}

impl std::fmt::Debug for BlockingMarketDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingMarketDataClient")
            .field("exchange", &self.inner.exchange())
            .finish_non_exhaustive()
    }
}

impl BlockingMarketDataClient {
    pub fn new(inner: Box<dyn PollingMarketDataService>) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| MarketDataError::Config(format!("failed to start runtime: {e}")))?;
        Ok(Self { inner, runtime })
    }

    pub fn exchange(&self) -> ExchangeId {
        self.inner.exchange()
    }

    pub fn supported_pairs(&self) -> Vec<CurrencyPair> {
        self.inner.supported_pairs()
    }

    pub fn get_ticker(&self, pair: &CurrencyPair) -> Result<Ticker> {
        self.runtime.block_on(self.inner.get_ticker(pair))
    }

    pub fn get_order_book(&self, pair: &CurrencyPair, mode: OrderBookType) -> Result<OrderBook> {
        self.runtime.block_on(self.inner.get_order_book(pair, mode))
    }

    pub fn get_trades(&self, pair: &CurrencyPair) -> Result<Trades> {
        self.runtime.block_on(self.inner.get_trades(pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchanges::{Bitstamp, MtGox};
    use crate::http::{Transport, TransportError, TransportRequest};
    use crate::market_data::MarketDataClient;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct Canned(&'static str);

    #[async_trait]
    impl Transport for Canned {
        async fn request(
            &self,
            _request: TransportRequest,
        ) -> std::result::Result<Vec<u8>, TransportError> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    struct Stalled;

    #[async_trait]
    impl Transport for Stalled {
        async fn request(
            &self,
            request: TransportRequest,
        ) -> std::result::Result<Vec<u8>, TransportError> {
            tokio::time::sleep(request.timeout).await;
            Err(TransportError::Timeout {
                after: request.timeout,
            })
        }
    }

    #[test]
    fn blocking_ticker_is_normalized() {
        let service = MarketDataClient::new(
            Bitstamp::new(),
            Arc::new(Canned(r#"{"last":"92.65","bid":"92.60","ask":"92.70","timestamp":"1364767200"}"#)),
        );
        let client = BlockingMarketDataClient::new(Box::new(service)).unwrap();
        let pair = CurrencyPair::from_codes("BTC", "USD").unwrap();

        let ticker = client.get_ticker(&pair).unwrap();

        assert_eq!(client.exchange(), ExchangeId::Bitstamp);
        assert_eq!(ticker.last, Some("92.65".parse().unwrap()));
    }

    #[test]
    fn blocking_calls_surface_timeouts() {
        let service = MarketDataClient::new(MtGox::new(), Arc::new(Stalled))
            .with_timeout(Duration::from_millis(5));
        let client = BlockingMarketDataClient::new(Box::new(service)).unwrap();
        let pair = CurrencyPair::from_codes("BTC", "USD").unwrap();

        assert!(client.get_trades(&pair).unwrap_err().is_timeout());
        assert!(
            client
                .get_order_book(&pair, OrderBookType::Full)
                .unwrap_err()
                .is_timeout()
        );
    }
}
