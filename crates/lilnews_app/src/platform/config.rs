use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lilnews_core::FeedFailureDisplay;
use lilnews_engine::{EngineConfig, FetchSettings, DEFAULT_FEED_URL};
use lilnews_logging::{news_info, news_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "lilnews.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeedFailureMode {
    #[default]
    ShowError,
    KeepSpinner,
}

impl From<FeedFailureMode> for FeedFailureDisplay {
    fn from(mode: FeedFailureMode) -> Self {
        match mode {
            FeedFailureMode::ShowError => FeedFailureDisplay::ShowError,
            FeedFailureMode::KeepSpinner => FeedFailureDisplay::KeepSpinner,
        }
    }
}

/// Optional settings read from `lilnews.ron`. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feed_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub page_max_bytes: u64,
    pub thumbnail_cache_capacity: usize,
    pub feed_failure: FeedFailureMode,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            page_max_bytes: fetch.page_max_bytes,
            thumbnail_cache_capacity: EngineConfig::default().thumbnail_cache_capacity,
            feed_failure: FeedFailureMode::default(),
            log_file: PathBuf::from("lilnews.log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            feed_url: self.feed_url.clone(),
            fetch: FetchSettings {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                page_max_bytes: self.page_max_bytes,
                ..FetchSettings::default()
            },
            thumbnail_cache_capacity: self.thumbnail_cache_capacity,
        }
    }
}

/// Reads the config file. A missing or malformed file yields the defaults.
///
/// Runs before the logger exists, so problems are returned as notes for the
/// caller to log once logging is up.
pub fn load(path: &Path) -> (AppConfig, Option<String>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), None);
        }
        Err(err) => {
            return (
                AppConfig::default(),
                Some(format!("Failed to read config from {:?}: {}", path, err)),
            );
        }
    };

    match ron::from_str(&content) {
        Ok(config) => (config, None),
        Err(err) => (
            AppConfig::default(),
            Some(format!("Failed to parse config from {:?}: {}", path, err)),
        ),
    }
}

pub fn log_load_outcome(path: &Path, note: Option<&str>) {
    match note {
        Some(note) => news_warn!("{}; using defaults", note),
        None => news_info!("Configuration resolved (file {:?})", path),
    }
}
