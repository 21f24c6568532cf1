//! # Lookup Service
//!
//! Drives the `get` tool. Each call:
//! - re-resolves configuration (env first, then `~/.api/config.json`)
//! - fails fast with `MissingConfig` before touching the network
//! - issues one GET to `<base_url>/` with the non-empty parameters
//! - interprets the response as JSON or raw text

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::domain::config::ApiConfig;
use crate::domain::traits::HttpFetcher;
use crate::domain::types::{
    ApiRequest, LookupError, LookupOutcome, LookupRequest, Payload, RawResponse,
};

type ConfigResolver = Arc<dyn Fn() -> ApiConfig + Send + Sync>;

#[derive(Clone)]
pub struct LookupService {
    fetcher: Arc<dyn HttpFetcher>,
    resolver: ConfigResolver,
}

impl LookupService {
    /// Service reading configuration from the process environment and home directory.
    pub fn new(fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self::with_resolver(fetcher, ApiConfig::resolve)
    }

    pub fn with_resolver<R>(fetcher: Arc<dyn HttpFetcher>, resolver: R) -> Self
    where
        R: Fn() -> ApiConfig + Send + Sync + 'static,
    {
        Self {
            fetcher,
            resolver: Arc::new(resolver),
        }
    }

    /// Configuration as a fresh call would see it.
    pub fn config(&self) -> ApiConfig {
        (self.resolver)()
    }

    pub async fn get(&self, params: &LookupRequest) -> LookupOutcome {
        let config = self.config();
        let Some(request) = build_request(&config, params) else {
            warn!("Lookup skipped: base URL or bearer token not configured");
            return LookupOutcome::Failure(LookupError::MissingConfig);
        };

        info!(
            "Looking up ip={}",
            params.ip.as_deref().filter(|ip| !ip.is_empty()).unwrap_or("<caller>")
        );

        match self.fetcher.fetch(&request).await {
            Ok(response) => interpret(response),
            Err(e) => {
                error!("Request to {} failed: {}", request.url, e);
                LookupOutcome::Failure(LookupError::Transport(e))
            }
        }
    }
}

/// Builds the outbound request, or `None` when the configuration is incomplete.
pub fn build_request(config: &ApiConfig, params: &LookupRequest) -> Option<ApiRequest> {
    let (Some(base_url), Some(token)) = (&config.base_url, &config.bearer_token) else {
        return None;
    };

    let url = format!("{}/", base_url.trim_end_matches('/'));
    let request = params
        .query_pairs()
        .into_iter()
        .fold(ApiRequest::get(url), |req, (name, value)| req.query(&name, value))
        .header("Authorization", format!("Bearer {token}"))
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .timeout(config.timeout_secs.map(Duration::from_secs));

    Some(request)
}

fn interpret(response: RawResponse) -> LookupOutcome {
    let status = response.status;
    let is_error = response.is_error();
    let payload = Payload::from_body(response.body);

    if is_error {
        warn!("Upstream returned HTTP {}", status);
        LookupOutcome::Failure(LookupError::Upstream { status, payload })
    } else {
        LookupOutcome::Success(payload)
    }
}
