//! # Domain Traits
//!
//! The seam between lookup logic and the network. The reqwest implementation
//! lives in the Infrastructure layer; tests substitute their own.

use crate::domain::types::{ApiRequest, RawResponse, TransportError};
use async_trait::async_trait;

/// Performs a single outbound GET.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Any status code is a successful fetch. Only failures to obtain a response are errors.
    async fn fetch(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}
