/*
[INPUT]:  Endpoint path, query parameters and a per-request timeout
[OUTPUT]: Raw response bytes or a TransportError
[POS]:    HTTP layer - transport capability consumed by market data clients
[UPDATE]: When the transport contract changes
*/

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;

use super::error::TransportError;

/// One outbound GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Path relative to the transport's base URL
    pub endpoint: String,
    pub query: BTreeMap<String, String>,
    pub timeout: Duration,
}

impl TransportRequest {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: BTreeMap::new(),
            timeout,
        }
    }

    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }
}

/// Byte-level request capability.
///
/// Implementations never retry and never decode the body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: TransportRequest) -> Result<Vec<u8>, TransportError>;
}
