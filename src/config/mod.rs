mod settings;

use thiserror::Error;

pub use settings::{Config, DEFAULT_API_BASE_URL, EXAMPLE_CONFIG, MAX_RESOLVE_ATTEMPTS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
