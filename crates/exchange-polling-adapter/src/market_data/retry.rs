/*
[INPUT]:  Any PollingMarketDataService plus a retry policy
[OUTPUT]: The same service with bounded retries on transient failures
[POS]:    Service layer - caller-composed retry decorator
[UPDATE]: When changing backoff or retry classification
*/

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::service::PollingMarketDataService;
use crate::http::Result;
use crate::types::{CurrencyPair, ExchangeId, OrderBook, OrderBookType, Ticker, Trades};

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_DELAY_MS: u64 = 500;
const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY_MS
}

fn default_max_delay_ms() -> u64 {
    DEFAULT_MAX_DELAY_MS
}

impl RetryPolicy {
    /// Delay after the `retry_count`-th failure: base, 2x base, 4x base, ...
    /// clamped to `max_delay_ms`.
    pub fn backoff(&self, retry_count: u32) -> Duration {
        let exp = retry_count.saturating_sub(1).min(63);
        let factor = 1u64.checked_shl(exp).unwrap_or(u64::MAX);
        let millis = self.base_delay_ms.saturating_mul(factor);
        Duration::from_millis(millis.min(self.max_delay_ms))
    }

    fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

/// Retries retryable failures of the wrapped service.
///
/// Non-retryable errors (`Parse`, `NotFound`, `UnsupportedOperation`, ...)
/// are returned on first sight.
#[derive(Debug, Clone)]
pub struct Retrying<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: PollingMarketDataService> Retrying<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    async fn run<T, F, Fut>(&self, operation: &'static str, pair: &CurrencyPair, call: F) -> Result<T>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = Result<T>> + Send,
        T: Send,
    {
        let mut retry_count: u32 = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    retry_count = retry_count.saturating_add(1);
                    if !err.is_retryable() || retry_count >= self.policy.max_attempts {
                        return Err(err);
                    }

                    let hinted = err.retry_delay().unwrap_or_default();
                    let delay = self
                        .policy
                        .backoff(retry_count)
                        .max(hinted)
                        .min(self.policy.max_delay());
                    warn!(
                        exchange = %self.inner.exchange(),
                        pair = %pair,
                        operation,
                        retry_count,
                        ?delay,
                        error = %err,
                        "market data request failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl<S: PollingMarketDataService> PollingMarketDataService for Retrying<S> {
    fn exchange(&self) -> ExchangeId {
        self.inner.exchange()
    }

    fn supported_pairs(&self) -> Vec<CurrencyPair> {
        self.inner.supported_pairs()
    }

    async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Ticker> {
        self.run("ticker", pair, || self.inner.get_ticker(pair)).await
    }

    async fn get_order_book(&self, pair: &CurrencyPair, mode: OrderBookType) -> Result<OrderBook> {
        self.run("order_book", pair, || self.inner.get_order_book(pair, mode))
            .await
    }

    async fn get_trades(&self, pair: &CurrencyPair) -> Result<Trades> {
        self.run("trades", pair, || self.inner.get_trades(pair)).await
    }
}
