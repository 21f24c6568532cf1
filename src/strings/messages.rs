//! # Messages
//!
//! Constant strings and format functions for tool results.

pub const MISSING_API_CONFIG: &str = "Error: Missing API configuration. Please set API_BASE_URL and API_BEARER_TOKEN environment variables.";

pub const API_ERROR_PREFIX: &str = "API error: ";

pub fn api_error(body: &str) -> String {
    format!("{API_ERROR_PREFIX}{body}")
}

pub fn request_failed(err: &str) -> String {
    format!("Request failed: {err}")
}

pub fn unable_to_fetch(ip: &str) -> String {
    format!("Unable to fetch geolocation for IP {ip}.")
}

pub const SERVER_INSTRUCTIONS: &str = "Looks up geolocation data for IPv4/IPv6 addresses. \
Call `get` with an `ip`; read `config://settings` to check which API endpoint is configured.";
pub const IP2LOCATIONIO_INSTRUCTIONS: &str =
    "Looks up geolocation data for IPv4/IPv6 addresses via api.ip2location.io. Call `get_geolocation` with an `ip`.";
