use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::nav::RetryPolicy;
use crate::route::PluginTab;
use crate::util::paths::config_path;

use super::ConfigError;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Default dashboard server address
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8888";

/// Upper bound on delayed lookups before a direct fetch
pub const MAX_RESOLVE_ATTEMPTS: u32 = 10;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the dashboard REST API
    pub api_base_url: String,
    /// Per-request timeout for API calls
    pub http_timeout: Duration,
    /// Deferred resolution schedule for project and plugin links
    pub resolve: RetryPolicy,
    /// Plugin detail tab used when a link does not name one
    pub default_plugin_tab: PluginTab,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            resolve: RetryPolicy::default(),
            default_plugin_tab: PluginTab::Web,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlHttpConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlResolveConfig {
    pub delay_ms: Option<u64>,
    pub max_attempts: Option<u32>,
    pub backoff: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlAiUiConfig {
    pub default_plugin_tab: Option<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub api_base_url: Option<String>,
    pub http: Option<TomlHttpConfig>,
    pub resolve: Option<TomlResolveConfig>,
    pub ai_ui: Option<TomlAiUiConfig>,
}

impl Config {
    /// Load configuration from the default location, merging with defaults.
    ///
    /// Writes the bundled example on first run. A file that cannot be read or
    /// parsed is reported and ignored.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %config_file.display(),
                    error = %e,
                    "Ignoring config file"
                );
                Config::default()
            }
        }
    }

    /// Load a specific config file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();
        config.merge(toml_config);
        Ok(config)
    }

    fn merge(&mut self, toml_config: TomlConfig) {
        if let Some(url) = toml_config.api_base_url {
            self.api_base_url = url;
        }

        if let Some(http) = toml_config.http {
            if let Some(secs) = http.timeout_secs {
                self.http_timeout = Duration::from_secs(secs);
            }
        }

        if let Some(resolve) = toml_config.resolve {
            if let Some(delay_ms) = resolve.delay_ms {
                self.resolve.delay = Duration::from_millis(delay_ms);
            }
            if let Some(max_attempts) = resolve.max_attempts {
                if max_attempts > MAX_RESOLVE_ATTEMPTS {
                    tracing::warn!(
                        max_attempts,
                        limit = MAX_RESOLVE_ATTEMPTS,
                        "resolve.max_attempts too large, clamping"
                    );
                }
                self.resolve.max_attempts = max_attempts.min(MAX_RESOLVE_ATTEMPTS);
            }
            if let Some(backoff) = resolve.backoff {
                if backoff.is_finite() && backoff >= 1.0 {
                    self.resolve.backoff = backoff;
                } else {
                    tracing::warn!(backoff, "resolve.backoff must be at least 1.0, keeping default");
                }
            }
        }

        if let Some(tab) = toml_config.ai_ui.and_then(|ai_ui| ai_ui.default_plugin_tab) {
            match PluginTab::parse(&tab) {
                Some(tab) => self.default_plugin_tab = tab,
                None => tracing::warn!(tab = %tab, "Unknown default_plugin_tab, keeping default"),
            }
        }
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}
