//! # Domain Types
//!
//! Requests, raw responses and lookup outcomes. Outcomes stay typed until the
//! tool boundary, where `LookupOutcome::render` flattens them to the text the
//! MCP client sees.

use crate::strings::messages;
use serde_json::Value;
use std::time::Duration;

/// Parameters of a lookup, forwarded verbatim as query parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub key: Option<String>,
    pub ip: Option<String>,
    pub format: Option<String>,
    pub lang: Option<String>,
}

impl LookupRequest {
    pub fn for_ip(ip: impl Into<String>) -> Self {
        Self {
            ip: Some(ip.into()),
            ..Self::default()
        }
    }

    /// Non-empty parameters in upstream order: key, ip, format, lang.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        [
            ("key", &self.key),
            ("ip", &self.ip),
            ("format", &self.format),
            ("lang", &self.lang),
        ]
        .into_iter()
        .filter_map(|(name, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((name.to_string(), v.to_string())),
            _ => None,
        })
        .collect()
    }
}

/// A fully-built outbound GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.push((name.to_string(), value.into()));
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Case-insensitive header lookup.
    #[cfg(test)]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body as received, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Strictly 2xx; redirects and informational codes are not successes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A response body: parsed JSON when possible, the raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(body),
        }
    }

    /// Pretty JSON (two-space indent) or the text unchanged.
    pub fn render(&self) -> String {
        match self {
            Payload::Json(value) => pretty_json(value),
            Payload::Text(text) => text.clone(),
        }
    }
}

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Why the request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    Connection(String),
    Timeout(String),
    Request(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Connection(msg) => write!(f, "Connection error - {msg}"),
            TransportError::Timeout(msg) => write!(f, "Request timeout - {msg}"),
            TransportError::Request(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Base URL or bearer token is not configured. No request was made.
    MissingConfig,
    /// Upstream answered with status >= 400.
    Upstream { status: u16, payload: Payload },
    Transport(TransportError),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::MissingConfig => f.write_str(messages::MISSING_API_CONFIG),
            LookupError::Upstream { payload, .. } => {
                f.write_str(&messages::api_error(&payload.render()))
            }
            LookupError::Transport(e) => f.write_str(&messages::request_failed(&e.to_string())),
        }
    }
}

impl std::error::Error for LookupError {}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Success(Payload),
    Failure(LookupError),
}

impl LookupOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, LookupOutcome::Failure(_))
    }

    /// The text handed back to the MCP client.
    pub fn render(&self) -> String {
        match self {
            LookupOutcome::Success(payload) => payload.render(),
            LookupOutcome::Failure(e) => e.to_string(),
        }
    }
}
