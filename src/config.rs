//! Environment-driven configuration.
//!
//! Every field has a default so the proxy starts with no environment at all;
//! values are overridden by env vars of the same (uppercased) name, e.g.
//! `PORT`, `RATE_LIMIT_WINDOW`, `RATE_LIMIT_MAX`, `CACHE_DURATION`, `API_URL`,
//! `SNAPSHOT_PATH`, `LOG_LEVEL`.

use anyhow::Context;
use figment::{Figment, providers::Env};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Admission window length, in minutes.
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window: u64,
    /// Maximum admitted requests per identity per window.
    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max: u32,
    /// Volatile cache TTL, in seconds.
    #[serde(default = "default_cache_duration")]
    pub cache_duration: u64,
    /// Upstream todos resource URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Path of the on-disk snapshot file.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Figment::new()
            .merge(Env::raw())
            .extract()
            .context("Failed to load config")
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_duration)
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window * 60)
    }
}

fn default_port() -> u16 {
    3000
}

fn default_rate_limit_window() -> u64 {
    1
}

fn default_rate_limit_max() -> u32 {
    10
}

fn default_cache_duration() -> u64 {
    60
}

fn default_api_url() -> String {
    "https://jsonplaceholder.typicode.com/todos".to_string()
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("todos-snapshot.json")
}

fn default_log_level() -> String {
    "info".to_string()
}
