//! # Configuration
//!
//! Resolves the upstream API settings. Environment variables win; any field they
//! leave unset is filled from `~/.api/config.json`. Resolution runs on every tool
//! call and never fails: an incomplete result is checked by the caller.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const BASE_URL_ENV: &str = "API_BASE_URL";
pub const BEARER_TOKEN_ENV: &str = "API_BEARER_TOKEN";
pub const TIMEOUT_ENV: &str = "API_TIMEOUT_SECS";
pub const IP2LOCATION_KEY_ENV: &str = "IP2LOCATION_API_KEY";

pub const CONFIG_DIR: &str = ".api";
pub const CONFIG_FILE: &str = "config.json";

/// Settings for the generic geolocation API adapter.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub bearer_token: Option<String>,
    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub timeout_secs: Option<u64>,
}

/// Layout of `~/.api/config.json`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(rename = "baseURL", default)]
    base_url: Option<String>,
    #[serde(rename = "bearerToken", default)]
    bearer_token: Option<String>,
}

/// What the `config://settings` resource exposes. The token itself never leaves the process.
#[derive(Debug, Serialize)]
struct SettingsView<'a> {
    base_url: Option<&'a str>,
    bearer_token: Option<&'static str>,
}

impl ApiConfig {
    /// Resolve from the process environment and the user's home directory.
    pub fn resolve() -> Self {
        let home = dirs::home_dir();
        Self::resolve_from(|name| std::env::var(name).ok(), home.as_deref())
    }

    /// Resolve from an arbitrary environment lookup and home directory.
    pub fn resolve_from<F>(env: F, home: Option<&Path>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            base_url: non_empty(env(BASE_URL_ENV)),
            bearer_token: non_empty(env(BEARER_TOKEN_ENV)),
            timeout_secs: non_empty(env(TIMEOUT_ENV)).and_then(|raw| parse_timeout(&raw)),
        };

        if config.is_complete() {
            return config;
        }

        if let Some(file) = home.and_then(load_config_file) {
            if config.base_url.is_none() {
                config.base_url = non_empty(file.base_url);
            }
            if config.bearer_token.is_none() {
                config.bearer_token = non_empty(file.bearer_token);
            }
        }

        config
    }

    /// Both the base URL and the bearer token are known.
    pub fn is_complete(&self) -> bool {
        self.base_url.is_some() && self.bearer_token.is_some()
    }

    /// Pretty JSON for the `config://settings` resource, with the token masked.
    pub fn settings_json(&self) -> Result<String, serde_json::Error> {
        let view = SettingsView {
            base_url: self.base_url.as_deref(),
            bearer_token: self.bearer_token.as_ref().map(|_| "***"),
        };
        serde_json::to_string_pretty(&view)
    }
}

/// Settings for the ip2location.io adapter.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Ip2LocationConfig {
    pub api_key: Option<String>,
}

impl Ip2LocationConfig {
    pub fn resolve() -> Self {
        Self::resolve_from(|name| std::env::var(name).ok())
    }

    pub fn resolve_from<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: non_empty(env(IP2LOCATION_KEY_ENV)),
        }
    }
}

/// Returns the config file location under a given home directory (e.g. `~/.api/config.json`)
pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join(CONFIG_FILE)
}

fn load_config_file(home: &Path) -> Option<ConfigFile> {
    let path = config_path(home);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_timeout(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => {
            warn!("Ignoring invalid {}={:?}", TIMEOUT_ENV, raw);
            None
        }
        Ok(secs) => Some(secs),
    }
}
