/*
[INPUT]:  Exchange adapters and transports
[OUTPUT]: Polling market data services and decorators
[POS]:    Service layer - public market data API
[UPDATE]: When adding services or decorators
*/

pub mod client;
pub mod retry;
pub mod service;

pub use client::MarketDataClient;
pub use retry::{RetryPolicy, Retrying};
pub use service::{PollingMarketDataService, RawMarketDataService};
