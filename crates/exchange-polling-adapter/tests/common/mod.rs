/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for exchange-polling-adapter tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use exchange_polling_adapter::{CurrencyPair, TransportError, TransportRequest, Transport};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Serve `body` as JSON for GET `endpoint`
pub async fn mount_json(server: &MockServer, endpoint: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_raw(body.to_owned(), "application/json"),
        )
        .expect(1)
        .mount(server)
        .await;
}

pub fn pair(base: &str, counter: &str) -> CurrencyPair {
    CurrencyPair::from_codes(base, counter).expect("pair")
}

/// Transport that times out on every request
#[derive(Debug, Default)]
pub struct AlwaysTimeout {
    pub calls: AtomicUsize,
}

impl AlwaysTimeout {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for AlwaysTimeout {
    async fn request(&self, request: TransportRequest) -> Result<Vec<u8>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::Timeout {
            after: request.timeout,
        })
    }
}

pub const MTGOX_TICKER: &str = r#"{
    "result": "success",
    "data": {
        "high": {"value": "95.00000", "value_int": "9500000", "display": "$95.00", "currency": "USD"},
        "low": {"value": "88.50000", "value_int": "8850000", "display": "$88.50", "currency": "USD"},
        "avg": {"value": "91.20000", "value_int": "9120000", "currency": "USD"},
        "vwap": {"value": "91.51234", "value_int": "9151234", "currency": "USD"},
        "vol": {"value": "46591.12345678", "value_int": "4659112345678", "currency": "BTC"},
        "last_local": {"value": "92.65000", "value_int": "9265000", "currency": "USD"},
        "last": {"value": "92.65000", "value_int": "9265000", "currency": "USD"},
        "buy": {"value": "92.60000", "value_int": "9260000", "currency": "USD"},
        "sell": {"value": "92.70000", "value_int": "9270000", "currency": "USD"},
        "item": "BTC",
        "now": "1364767201381791"
    }
}"#;

pub const MTGOX_DEPTH_PARTIAL: &str = r#"{
    "result": "success",
    "data": {
        "now": "1364767201381791",
        "cached": "1364767190964182",
        "asks": [
            {"price": 100.5, "amount": 2.0, "price_int": "10050000", "amount_int": "200000000", "stamp": "1364767190964182"},
            {"price": 101, "amount": 0.5, "price_int": "10100000", "amount_int": "50000000", "stamp": "1364767190964183"}
        ],
        "bids": [
            {"price": 98.1, "amount": 3, "price_int": "9810000", "amount_int": "300000000", "stamp": "1364767190964184"},
            {"price": 99.9, "amount": 1.25, "price_int": "9990000", "amount_int": "125000000", "stamp": "1364767190964185"}
        ],
        "filter_min_price": {"value": "83.38", "value_int": "8338000", "currency": "USD"},
        "filter_max_price": {"value": "101.92", "value_int": "10192000", "currency": "USD"}
    }
}"#;

pub const MTGOX_DEPTH_FULL: &str = r#"{
    "result": "success",
    "data": {
        "now": "1364767201381791",
        "asks": [
            {"price": 100.5, "amount": 2.0, "price_int": "10050000", "amount_int": "200000000"},
            {"price": 101, "amount": 0.5, "price_int": "10100000", "amount_int": "50000000"},
            {"price": 150, "amount": 10, "price_int": "15000000", "amount_int": "1000000000"}
        ],
        "bids": [
            {"price": 1, "amount": 100, "price_int": "100000", "amount_int": "10000000000"},
            {"price": 98.1, "amount": 3, "price_int": "9810000", "amount_int": "300000000"},
            {"price": 99.9, "amount": 1.25, "price_int": "9990000", "amount_int": "125000000"}
        ]
    }
}"#;

pub const MTGOX_TRADES_PLN: &str = r#"{
    "result": "success",
    "data": [
        {"date": 1364767200, "price": "300.10000", "amount": "0.50000000", "price_int": "30010000", "amount_int": "50000000", "tid": "1364767200123456", "price_currency": "PLN", "item": "BTC", "trade_type": "bid", "primary": "Y", "properties": "limit"},
        {"date": 1364767260, "price": "301.00000", "amount": "1.00000000", "price_int": "30100000", "amount_int": "100000000", "tid": "1364767260654321", "price_currency": "PLN", "item": "BTC", "trade_type": "ask", "primary": "Y", "properties": "limit"}
    ]
}"#;
