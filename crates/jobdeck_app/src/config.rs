//! App configuration, loaded from `jobdeck.ron` in the working directory.
//!
//! A missing file falls back to defaults; a malformed one is logged and
//! ignored rather than aborting the run.

use std::fs;
use std::path::Path;
use std::time::Duration;

use deck_logging::deck_warn;
use jobdeck_engine::{ApiSettings, PollSettings};
use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "jobdeck.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub poll_interval_ms: u64,
    pub poll_retry_delay_ms: u64,
    pub poll_max_attempts: u32,
    pub request_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        let poll = PollSettings::default();
        Self {
            api_base_url: api.base_url,
            poll_interval_ms: poll.interval.as_millis() as u64,
            poll_retry_delay_ms: poll.retry_delay.as_millis() as u64,
            poll_max_attempts: poll.max_attempts,
            request_timeout_ms: api.request_timeout.as_millis() as u64,
        }
    }
}

impl AppConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            ..ApiSettings::default()
        }
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
            retry_delay: Duration::from_millis(self.poll_retry_delay_ms),
            max_attempts: self.poll_max_attempts,
        }
    }
}

pub fn load(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            deck_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            deck_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
