//! # HTTP Client
//!
//! Sends an `ApiRequest` with reqwest and classifies failures into
//! connection, timeout and generic request errors.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::redirect::Policy;
use tracing::debug;

use crate::domain::traits::HttpFetcher;
use crate::domain::types::{ApiRequest, RawResponse, TransportError};

/// Fetcher backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// 3xx responses are returned as-is instead of being followed.
    pub fn without_redirects() -> Result<Self, reqwest::Error> {
        let client = Client::builder().redirect(Policy::none()).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn fetch(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        debug!("GET {} ({} query params)", request.url, request.query.len());

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        debug!("GET {} -> {}", request.url, status);
        Ok(RawResponse { status, body })
    }
}

/// Connection failures take precedence over timeouts, so a connect timeout reports as a connection error.
fn classify(e: reqwest::Error) -> TransportError {
    if e.is_connect() {
        TransportError::Connection(e.to_string())
    } else if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}
