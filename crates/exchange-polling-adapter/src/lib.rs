/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public polling market data crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod blocking;
pub mod config;
pub mod exchanges;
pub mod http;
pub mod market_data;
pub mod normalize;
pub mod types;

pub use blocking::BlockingMarketDataClient;
pub use config::ExchangeConfig;

// Re-export commonly used types from exchanges
pub use exchanges::{Bitstamp, Endpoint, ExchangeAdapter, ExchangeRegistry, MtGox};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    HttpTransport,
    MarketDataError,
    Result,
    Transport,
    TransportError,
    TransportRequest,
};

pub use market_data::{
    MarketDataClient,
    PollingMarketDataService,
    RawMarketDataService,
    RetryPolicy,
    Retrying,
};

// Re-export all types
pub use types::*;
