//! Endpoint fetching for cache refresh cycles

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::time::Duration;

use crate::utils::error::Result;

/// Bound on any single endpoint fetch within a refresh cycle.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One GET returning a JSON body. Failures are recorded per endpoint by the
/// cache, never propagated out of a refresh cycle.
#[async_trait]
pub trait EndpointFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// reqwest-backed fetcher with a bounded timeout and optional default headers
/// (e.g. an API auth token).
pub struct HttpEndpointFetcher {
    client: reqwest::Client,
}

impl HttpEndpointFetcher {
    pub fn new() -> Result<Self> {
        Self::with_headers(HeaderMap::new())
    }

    pub fn with_headers(headers: HeaderMap) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_FETCH_TIMEOUT)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl EndpointFetcher for HttpEndpointFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let payload = response.json::<Value>().await?;
        Ok(payload)
    }
}
