/*
[INPUT]:  Failing transports and slow mock servers
[OUTPUT]: Test results for timeout, lookup and retry behavior
[POS]:    Integration tests - failure paths
[UPDATE]: When error mapping or retry rules change
*/

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{AlwaysTimeout, MTGOX_TICKER, pair, setup_mock_server};
use exchange_polling_adapter::{
    Bitstamp, ClientConfig, ExchangeConfig, ExchangeId, ExchangeRegistry, MarketDataClient,
    MarketDataError, MtGox, OrderBookType, PollingMarketDataService, RawMarketDataService,
    RetryPolicy, Transport, TransportError,
};
use rstest::rstest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn assert_timeout<T: std::fmt::Debug>(result: exchange_polling_adapter::Result<T>) {
    match result {
        Err(MarketDataError::Transport(TransportError::Timeout { .. })) => {}
        other => panic!("Expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_every_operation_surfaces_timeout() {
    let transport = AlwaysTimeout::new();
    let client = MarketDataClient::new(MtGox::new(), transport.clone() as Arc<dyn Transport>)
        .with_timeout(Duration::from_millis(50));
    let btc_usd = pair("BTC", "USD");

    assert_timeout(client.get_ticker(&btc_usd).await);
    assert_timeout(client.get_order_book(&btc_usd, OrderBookType::Partial).await);
    assert_timeout(client.get_order_book(&btc_usd, OrderBookType::Full).await);
    assert_timeout(client.get_trades(&btc_usd).await);
    assert_timeout(client.get_raw_ticker(&btc_usd).await);
    assert_timeout(client.get_raw_order_book(&btc_usd, OrderBookType::Full).await);
    assert_timeout(client.get_raw_trades(&btc_usd).await);

    assert_eq!(transport.calls(), 7);
}

#[tokio::test]
async fn test_slow_server_times_out_over_http() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/2/BTCUSD/money/ticker"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(MTGOX_TICKER, "application/json")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig {
        timeout: Duration::from_millis(50),
        connect_timeout: Duration::from_secs(1),
    };
    let client = MarketDataClient::over_http_with_base_url(MtGox::new(), &server.uri(), &config)
        .expect("client init");

    assert_timeout(client.get_ticker(&pair("BTC", "USD")).await);
}

#[rstest]
#[case::unknown_base("LTC", "USD")]
#[case::unknown_counter("BTC", "XYZ")]
#[case::inverted("USD", "BTC")]
#[tokio::test]
async fn test_unlisted_pair_is_not_found_without_request(#[case] base: &str, #[case] counter: &str) {
    let transport = AlwaysTimeout::new();
    let client = MarketDataClient::new(MtGox::new(), transport.clone() as Arc<dyn Transport>);

    let err = client.get_trades(&pair(base, counter)).await.unwrap_err();

    assert!(matches!(err, MarketDataError::NotFound { exchange: ExchangeId::MtGox, .. }));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_full_book_unsupported_before_any_request() {
    let transport = AlwaysTimeout::new();
    let client = MarketDataClient::new(Bitstamp::new(), transport.clone() as Arc<dyn Transport>);

    for candidate in [pair("BTC", "USD"), pair("BTC", "EUR")] {
        let err = client
            .get_order_book(&candidate, OrderBookType::Full)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::UnsupportedOperation { .. }));
    }
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_registry_retries_configured_attempts() {
    let transport = AlwaysTimeout::new();
    let mut config = ExchangeConfig::new(ExchangeId::MtGox);
    config.retry = Some(RetryPolicy {
        max_attempts: 3,
        base_delay_ms: 1,
        max_delay_ms: 5,
    });

    let service = ExchangeRegistry::with_defaults()
        .create_with_transport(&config, transport.clone())
        .expect("service");

    assert_timeout(service.get_ticker(&pair("BTC", "USD")).await);
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn test_retry_skips_non_retryable_errors() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ExchangeConfig::new(ExchangeId::MtGox);
    config.base_url = Some(server.uri());
    config.retry = Some(RetryPolicy::default());

    let service = ExchangeRegistry::with_defaults()
        .create(&config)
        .expect("service");
    let err = service.get_ticker(&pair("BTC", "USD")).await.unwrap_err();

    assert!(matches!(err, MarketDataError::NotFound { .. }));
}
