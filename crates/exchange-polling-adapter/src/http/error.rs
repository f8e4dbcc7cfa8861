/*
[INPUT]:  Error sources (transport, decoding, consistency checks, config)
[OUTPUT]: Structured error types with retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::time::Duration;

use thiserror::Error;

use crate::types::ExchangeId;

/// Failure reported by a [`Transport`](crate::http::Transport).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request exceeded the caller-supplied timeout
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    /// Connection could not be established or was dropped
    #[error("connection failed: {0}")]
    Connection(String),

    /// Server answered with a non-success status
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

/// Main error type for market data operations
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// Network or transport failure
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Response could not be decoded or failed a consistency check
    #[error("parse error: {0}")]
    Parse(String),

    /// Pair or resource does not exist on the exchange
    #[error("{pair} not found on {exchange}")]
    NotFound { exchange: ExchangeId, pair: String },

    /// Exchange adapter does not implement the requested operation
    #[error("{operation} is not supported by {exchange}")]
    UnsupportedOperation {
        exchange: ExchangeId,
        operation: String,
    },

    /// Exchange returned a well-formed error payload
    #[error("API error: {message}")]
    Api { message: String },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for MarketDataError {
    fn from(err: serde_json::Error) -> Self {
        MarketDataError::Parse(err.to_string())
    }
}

impl From<rust_decimal::Error> for MarketDataError {
    fn from(err: rust_decimal::Error) -> Self {
        MarketDataError::Parse(err.to_string())
    }
}

impl MarketDataError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            MarketDataError::Transport(TransportError::HttpStatus { status, .. }) => {
                *status == 429 || *status >= 500
            }
            MarketDataError::Transport(_) => true,
            _ => false,
        }
    }

    /// Suggested delay before retrying, if any
    pub fn retry_delay(&self) -> Option<Duration> {
        match self {
            MarketDataError::Transport(TransportError::HttpStatus { status: 429, .. }) => {
                Some(Duration::from_secs(5))
            }
            MarketDataError::Transport(TransportError::Timeout { .. }) => {
                Some(Duration::from_secs(1))
            }
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            MarketDataError::Transport(TransportError::Timeout { .. })
        )
    }
}

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, MarketDataError>;
