//! Viewer configuration loaded from an optional YAML file.
//!
//! Every field has a default, so running without a config file works against
//! a backend on `http://localhost:8000`. Command-line flags override whatever
//! the file sets (see [`Config::apply_overrides`]).
//!
//! ```yaml
//! api_base_url: https://trends.example.com
//! session_cookie: "session=abc123"
//! request_timeout_secs: 30
//! topics_stale_secs: 300
//! cache_ttl_secs: 300
//! hyperlinks: true
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the API paths are appended to.
    pub api_base_url: String,
    /// Raw `Cookie` header value forwarded with every request.
    pub session_cookie: Option<String>,
    pub request_timeout_secs: u64,
    /// How long the topic list is considered fresh.
    pub topics_stale_secs: u64,
    /// How long any cached response is retained before eviction.
    pub cache_ttl_secs: u64,
    /// Emit OSC-8 terminal hyperlinks for article URLs.
    pub hyperlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_cookie: None,
            request_timeout_secs: 30,
            topics_stale_secs: 5 * 60,
            cache_ttl_secs: 5 * 60,
            hyperlinks: true,
        }
    }
}

impl Config {
    /// Load the config from `path`, or return the defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })?;
        info!(path, base_url = %config.api_base_url, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply command-line overrides on top of the file values.
    pub fn apply_overrides(
        mut self,
        base_url: Option<String>,
        session_cookie: Option<String>,
        no_hyperlinks: bool,
    ) -> Self {
        if let Some(url) = base_url {
            self.api_base_url = url;
        }
        if session_cookie.is_some() {
            self.session_cookie = session_cookie;
        }
        if no_hyperlinks {
            self.hyperlinks = false;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn topics_stale_time(&self) -> Duration {
        Duration::from_secs(self.topics_stale_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
