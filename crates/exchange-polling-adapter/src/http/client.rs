/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: reqwest-backed Transport ready for market data requests
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing status mapping
*/

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::error::{MarketDataError, Result, TransportError};
use super::transport::{Transport, TransportRequest};

/// Upper bound on how much of an error body is kept in `HttpStatus`
const ERROR_BODY_MAX_BYTES: usize = 512;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Default per-request timeout handed to the transport
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Transport issuing GET requests against one exchange base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, &ClientConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(base_url: &str, config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| MarketDataError::Config(format!("failed to build HTTP client: {e}")))?;

        let mut base_url = Url::parse(base_url)?;
        // Endpoints are joined relative to the base path, which must end in `/`
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base URL, always ending in `/`
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> std::result::Result<Url, TransportError> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| TransportError::Connection(format!("invalid endpoint {endpoint}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<Vec<u8>, TransportError> {
        let url = self.url(&request.endpoint)?;
        let timeout = request.timeout;
        let started = Instant::now();

        let response = self
            .http_client
            .get(url)
            .query(&request.query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| classify(e, timeout))?;

        debug!(
            endpoint = %request.endpoint,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "market data request completed"
        );

        if !status.is_success() {
            let end = body.len().min(ERROR_BODY_MAX_BYTES);
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body[..end]).into_owned(),
            });
        }

        Ok(body.to_vec())
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout { after: timeout }
    } else if let Some(status) = err.status() {
        TransportError::HttpStatus {
            status: status.as_u16(),
            body: err.to_string(),
        }
    } else {
        TransportError::Connection(err.to_string())
    }
}
