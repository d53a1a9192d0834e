//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable {var} has invalid value {value:?}")]
    Env { var: &'static str, value: String },

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

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay connection settings taken from the environment.
///
/// `lookup` abstracts `std::env::var` so tests need not touch process state.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let db = &mut config.database;
    if let Some(user) = lookup("DB_USER") {
        db.user = user;
    }
    if let Some(password) = lookup("DB_PASSWORD") {
        db.password = password;
    }
    if let Some(host) = lookup("DB_HOST") {
        db.host = host;
    }
    if let Some(name) = lookup("DB_NAME") {
        db.name = name;
    }
    if let Some(port) = lookup("DB_PORT") {
        db.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var: "DB_PORT", value: port })?;
    }
    if let Some(max) = lookup("DB_MAX_CONNECTIONS") {
        db.max_connections = max
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var: "DB_MAX_CONNECTIONS", value: max })?;
    }
    if let Some(addr) = lookup("CATALOG_BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }
    Ok(())
}
