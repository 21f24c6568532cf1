//! Test doubles shared by the unit tests.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::traits::HttpFetcher;
use crate::domain::types::{ApiRequest, RawResponse, TransportError};

/// Fetcher that replays a canned reply and records every request it sees.
pub struct RecordingFetcher {
    reply: Result<RawResponse, TransportError>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingFetcher {
    pub fn replying(reply: Result<RawResponse, TransportError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(status: u16, body: &str) -> Self {
        Self::replying(Ok(RawResponse::new(status, body)))
    }

    pub fn failing(error: TransportError) -> Self {
        Self::replying(Err(error))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpFetcher for RecordingFetcher {
    async fn fetch(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}

/// URL of a local port that had a listener a moment ago and now refuses connections.
pub fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
