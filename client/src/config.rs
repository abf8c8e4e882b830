//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const API_PREFIX: &str = "/api";

const STORAGE_DIR: &str = ".photolens";
const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server origin without the API prefix, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    pub timeout: Duration,
    /// File backing the durable key-value store.
    pub storage_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            storage_path: default_storage_path(std::env::var("HOME").ok().as_deref()),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `PHOTOLENS_BASE_URL`: server origin, default `http://127.0.0.1:8000`
    /// - `PHOTOLENS_TIMEOUT_SECS`: default 60
    /// - `PHOTOLENS_STORAGE_PATH`: default `$HOME/.photolens/storage.json`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("PHOTOLENS_BASE_URL")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map_or(defaults.base_url, |raw| normalize_base_url(&raw));
        let timeout = Duration::from_secs(env_parse_u64("PHOTOLENS_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS));
        let storage_path = std::env::var("PHOTOLENS_STORAGE_PATH")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map_or(defaults.storage_path, PathBuf::from);

        Self { base_url, timeout, storage_path }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Absolute URL every API path is resolved against.
    pub fn api_base(&self) -> String {
        format!("{}{API_PREFIX}", self.base_url)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn default_storage_path(home: Option<&str>) -> PathBuf {
    let root = home.filter(|h| !h.is_empty()).map_or_else(|| PathBuf::from("."), PathBuf::from);
    root.join(STORAGE_DIR).join(STORAGE_FILE)
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
