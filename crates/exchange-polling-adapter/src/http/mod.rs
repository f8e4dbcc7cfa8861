/*
[INPUT]:  HTTP client configuration and endpoint requests
[OUTPUT]: Raw response bytes and the crate error taxonomy
[POS]:    HTTP layer - REST transport boundary
[UPDATE]: When changing the transport contract or client behavior
*/

pub mod client;
pub mod error;
pub mod transport;

pub use error::{MarketDataError, Result, TransportError};
pub use transport::{Transport, TransportRequest};

pub use client::{ClientConfig, HttpTransport};
