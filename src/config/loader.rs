//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `upstream.api_key`.
pub const API_KEY_ENV: &str = "GATEWAY_API_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: GatewayConfig = toml::from_str(&content)?;
    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the configuration used when no file is given: defaults plus env.
pub fn default_config() -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::default();
    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides on top of file/default values.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    apply_api_key(config, std::env::var(API_KEY_ENV).ok());
}

fn apply_api_key(config: &mut GatewayConfig, value: Option<String>) {
    if let Some(key) = value.filter(|k| !k.is_empty()) {
        config.upstream.api_key = key;
    }
}
