//! # ip2location.io Service
//!
//! Drives the `get_geolocation` tool against the public ip2location.io endpoint.
//! Every failure, including a non-2xx status, collapses to `None`; the reason
//! is only logged.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::domain::config::Ip2LocationConfig;
use crate::domain::traits::HttpFetcher;
use crate::domain::types::{ApiRequest, Payload};

pub const IP2LOCATION_API_BASE: &str = "https://api.ip2location.io";
pub const USER_AGENT: &str = "ip2locationio-app/1.0";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type ConfigResolver = Arc<dyn Fn() -> Ip2LocationConfig + Send + Sync>;

#[derive(Clone)]
pub struct Ip2LocationService {
    fetcher: Arc<dyn HttpFetcher>,
    resolver: ConfigResolver,
    endpoint: String,
}

impl Ip2LocationService {
    pub fn new(fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self::with_resolver(fetcher, Ip2LocationConfig::resolve)
    }

    pub fn with_resolver<R>(fetcher: Arc<dyn HttpFetcher>, resolver: R) -> Self
    where
        R: Fn() -> Ip2LocationConfig + Send + Sync + 'static,
    {
        Self {
            fetcher,
            resolver: Arc::new(resolver),
            endpoint: IP2LOCATION_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn build_request(&self, ip: &str) -> ApiRequest {
        let config = (self.resolver)();
        let request = ApiRequest::get(self.endpoint.clone()).query("ip", ip);
        let request = match config.api_key {
            Some(key) => request.query("key", key),
            None => request,
        };

        request
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .timeout(Some(REQUEST_TIMEOUT))
    }

    /// Geolocation JSON for `ip`, or `None` if anything went wrong.
    pub async fn get_geolocation(&self, ip: &str) -> Option<Value> {
        let request = self.build_request(ip);
        info!("Looking up ip={} via {}", ip, self.endpoint);

        let response = match self.fetcher.fetch(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("ip2location.io request for {} failed: {}", ip, e);
                return None;
            }
        };

        if !response.is_success() {
            warn!(
                "ip2location.io returned HTTP {} for {}: {}",
                response.status, ip, response.body
            );
            return None;
        }

        match Payload::from_body(response.body) {
            Payload::Json(value) if is_usable(&value) => Some(value),
            Payload::Json(_) => {
                warn!("ip2location.io returned an empty result for {}", ip);
                None
            }
            Payload::Text(_) => {
                warn!("ip2location.io returned a non-JSON body for {}", ip);
                None
            }
        }
    }
}

/// Empty objects, arrays, strings, `null`, `false` and zero carry no geolocation.
fn is_usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TransportError;
    use crate::infrastructure::http::ReqwestFetcher;
    use crate::testing::{RecordingFetcher, unused_local_url};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn keyed(key: Option<&str>) -> impl Fn() -> Ip2LocationConfig + Send + Sync + 'static {
        let key = key.map(str::to_string);
        move || Ip2LocationConfig {
            api_key: key.clone(),
        }
    }

    #[test]
    fn test_request_without_key() {
        let service = Ip2LocationService::with_resolver(
            Arc::new(RecordingFetcher::ok(200, "{}")),
            keyed(None),
        );
        let request = service.build_request("8.8.8.8");

        assert_eq!(request.url, IP2LOCATION_API_BASE);
        assert_eq!(request.query, vec![("ip".to_string(), "8.8.8.8".to_string())]);
        assert_eq!(request.header_value("User-Agent"), Some(USER_AGENT));
        assert_eq!(request.header_value("Accept"), Some("application/json"));
        assert_eq!(request.header_value("Authorization"), None);
        assert_eq!(request.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_request_with_key() {
        let service = Ip2LocationService::with_resolver(
            Arc::new(RecordingFetcher::ok(200, "{}")),
            keyed(Some("ABC123")),
        );
        let request = service.build_request("2001:4860:4860::8888");
        assert_eq!(request.query_value("ip"), Some("2001:4860:4860::8888"));
        assert_eq!(request.query_value("key"), Some("ABC123"));
    }

    #[tokio::test]
    async fn test_success() {
        let body = json!({"ip": "8.8.8.8", "country_code": "US", "city_name": "Mountain View"});
        let fetcher = Arc::new(RecordingFetcher::ok(200, &body.to_string()));
        let service = Ip2LocationService::with_resolver(fetcher.clone(), keyed(None));

        assert_eq!(service.get_geolocation("8.8.8.8").await, Some(body));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_failures_collapse_to_none() {
        let fetchers = [
            RecordingFetcher::failing(TransportError::Connection("refused".to_string())),
            RecordingFetcher::failing(TransportError::Timeout("slow".to_string())),
            RecordingFetcher::ok(401, r#"{"error":{"error_message":"Invalid API key."}}"#),
            RecordingFetcher::ok(200, "not json"),
            RecordingFetcher::ok(200, "{}"),
            RecordingFetcher::ok(200, "null"),
        ];

        for fetcher in fetchers {
            let service = Ip2LocationService::with_resolver(Arc::new(fetcher), keyed(None));
            assert_eq!(service.get_geolocation("8.8.8.8").await, None);
        }
    }

    #[test]
    fn test_is_usable() {
        assert!(is_usable(&json!({"country_code": "US"})));
        assert!(is_usable(&json!([1])));
        assert!(is_usable(&json!(1)));
        assert!(!is_usable(&json!({})));
        assert!(!is_usable(&json!([])));
        assert!(!is_usable(&json!("")));
        assert!(!is_usable(&json!(0)));
        assert!(!is_usable(&json!(false)));
        assert!(!is_usable(&Value::Null));
    }

    #[tokio::test]
    async fn test_against_local_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("ip", "8.8.8.8"))
            .and(query_param("key", "k"))
            .and(header("User-Agent", USER_AGENT))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"country_code":"US"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let service = Ip2LocationService::with_resolver(
            Arc::new(ReqwestFetcher::without_redirects().unwrap()),
            keyed(Some("k")),
        )
        .with_endpoint(server.uri());

        let result = service.get_geolocation("8.8.8.8").await;
        assert_eq!(result, Some(json!({"country_code": "US"})));
    }

    #[tokio::test]
    async fn test_result_keeps_upstream_key_order() {
        let body = r#"{"ip":"8.8.8.8","country_code":"US","country_name":"United States of America"}"#;
        let fetcher = Arc::new(RecordingFetcher::ok(200, body));
        let service = Ip2LocationService::with_resolver(fetcher, keyed(None));

        let value = service.get_geolocation("8.8.8.8").await.unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ip", "country_code", "country_name"]);
    }

    #[tokio::test]
    async fn test_redirect_is_not_followed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/moved", server.uri()).as_str()),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/moved"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"country_code":"US"}"#))
            .expect(0)
            .mount(&server)
            .await;

        let service = Ip2LocationService::with_resolver(
            Arc::new(ReqwestFetcher::without_redirects().unwrap()),
            keyed(None),
        )
        .with_endpoint(server.uri());

        assert_eq!(service.get_geolocation("8.8.8.8").await, None);
    }

    #[tokio::test]
    async fn test_non_2xx_status_is_a_failure() {
        for status in [204, 301, 304] {
            let body = if status == 204 { "" } else { r#"{"country_code":"US"}"# };
            let fetcher = Arc::new(RecordingFetcher::ok(status, body));
            let service = Ip2LocationService::with_resolver(fetcher, keyed(None));
            assert_eq!(service.get_geolocation("8.8.8.8").await, None, "status {status}");
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let service = Ip2LocationService::with_resolver(
            Arc::new(ReqwestFetcher::without_redirects().unwrap()),
            keyed(None),
        )
        .with_endpoint(unused_local_url());

        assert_eq!(service.get_geolocation("8.8.8.8").await, None);
    }
}
