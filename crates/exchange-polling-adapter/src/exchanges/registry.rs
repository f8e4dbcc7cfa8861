/*
[INPUT]:  ExchangeConfig (exchange id, base URL, timeouts, retry policy)
[OUTPUT]: Ready-to-use Box<dyn PollingMarketDataService>
[POS]:    Adapter layer - startup-time mapping from exchange id to adapter
[UPDATE]: When registering new exchanges
*/

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::{Bitstamp, ExchangeAdapter, MtGox};
use crate::config::ExchangeConfig;
use crate::http::{HttpTransport, MarketDataError, Result, Transport};
use crate::market_data::{MarketDataClient, PollingMarketDataService, Retrying};
use crate::types::ExchangeId;

/// Builds a generic service from a transport and per-request timeout
pub type ServiceFactory = fn(Arc<dyn Transport>, Duration) -> Box<dyn PollingMarketDataService>;

#[derive(Debug, Clone, Copy)]
struct RegistryEntry {
    default_base_url: &'static str,
    build: ServiceFactory,
}

/// Explicit exchange id → adapter table, resolved once at startup
#[derive(Debug, Clone, Default)]
pub struct ExchangeRegistry {
    entries: HashMap<ExchangeId, RegistryEntry>,
}

fn build_client<A>(transport: Arc<dyn Transport>, timeout: Duration) -> Box<dyn PollingMarketDataService>
where
    A: ExchangeAdapter + Default,
{
    Box::new(MarketDataClient::new(A::default(), transport).with_timeout(timeout))
}

impl ExchangeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in exchange
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_adapter::<MtGox>();
        registry.register_adapter::<Bitstamp>();
        registry
    }

    /// Register an adapter type under its own id
    pub fn register_adapter<A: ExchangeAdapter + Default>(&mut self) {
        let adapter = A::default();
        self.register(adapter.id(), adapter.default_base_url(), build_client::<A>);
    }

    /// Register (or replace) a factory for `id`
    pub fn register(&mut self, id: ExchangeId, default_base_url: &'static str, build: ServiceFactory) {
        self.entries.insert(
            id,
            RegistryEntry {
                default_base_url,
                build,
            },
        );
    }

    pub fn contains(&self, id: ExchangeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Registered exchanges, sorted by name
    pub fn exchanges(&self) -> Vec<ExchangeId> {
        let mut ids: Vec<ExchangeId> = self.entries.keys().copied().collect();
        ids.sort_by_key(|id| id.as_str());
        ids
    }

    fn entry(&self, id: ExchangeId) -> Result<&RegistryEntry> {
        self.entries
            .get(&id)
            .ok_or_else(|| MarketDataError::Config(format!("exchange {id} is not registered")))
    }

    /// Build an HTTP-backed service as described by `config`
    pub fn create(&self, config: &ExchangeConfig) -> Result<Box<dyn PollingMarketDataService>> {
        let entry = self.entry(config.exchange)?;
        let base_url = config.base_url.as_deref().unwrap_or(entry.default_base_url);
        let transport = HttpTransport::with_config(base_url, &config.client_config())?;
        info!(exchange = %config.exchange, base_url, "market data service created");
        self.create_with_transport(config, Arc::new(transport))
    }

    /// Build a service over a caller-supplied transport
    pub fn create_with_transport(
        &self,
        config: &ExchangeConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Box<dyn PollingMarketDataService>> {
        let entry = self.entry(config.exchange)?;
        let service = (entry.build)(transport, config.request_timeout());
        Ok(match config.retry {
            Some(policy) => Box::new(Retrying::new(service, policy)),
            None => service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{TransportError, TransportRequest};
    use crate::market_data::RetryPolicy;
    use crate::types::{CurrencyPair, OrderBookType};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Unreachable(AtomicUsize);

    #[async_trait]
    impl Transport for Unreachable {
        async fn request(
            &self,
            _request: TransportRequest,
        ) -> std::result::Result<Vec<u8>, TransportError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Connection("unreachable".to_string()))
        }
    }

    #[test]
    fn defaults_register_builtin_exchanges() {
        let registry = ExchangeRegistry::with_defaults();
        assert_eq!(
            registry.exchanges(),
            vec![ExchangeId::Bitstamp, ExchangeId::MtGox]
        );
        assert!(!ExchangeRegistry::new().contains(ExchangeId::MtGox));
    }

    #[test]
    fn unregistered_exchange_is_config_error() {
        let result = ExchangeRegistry::new().create(&ExchangeConfig::new(ExchangeId::MtGox));
        match result {
            Err(MarketDataError::Config(_)) => {}
            Err(other) => panic!("Expected Config error variant, got {other:?}"),
            Ok(service) => panic!("Expected error, built service for {}", service.exchange()),
        }
    }

    #[test]
    fn create_resolves_adapter_for_id() {
        let registry = ExchangeRegistry::with_defaults();
        let service = registry
            .create(&ExchangeConfig::new(ExchangeId::Bitstamp))
            .expect("service");
        assert_eq!(service.exchange(), ExchangeId::Bitstamp);
        assert_eq!(service.supported_pairs().len(), 1);
    }

    #[tokio::test]
    async fn retry_policy_wraps_service() {
        let transport = Arc::new(Unreachable(AtomicUsize::new(0)));
        let mut config = ExchangeConfig::new(ExchangeId::MtGox);
        config.retry = Some(RetryPolicy {
            max_attempts: 2,
            base_delay_ms: 1,
            max_delay_ms: 1,
        });

        let service = ExchangeRegistry::with_defaults()
            .create_with_transport(&config, transport.clone())
            .expect("service");
        let pair = CurrencyPair::from_codes("BTC", "USD").unwrap();
        let err = service
            .get_order_book(&pair, OrderBookType::Partial)
            .await
            .unwrap_err();

        assert!(matches!(err, MarketDataError::Transport(TransportError::Connection(_))));
        assert_eq!(transport.0.load(Ordering::SeqCst), 2);
    }
}
