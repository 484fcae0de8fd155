//! Configuration file loading.
//!
//! ## Responsibility
//! Read a TOML file from disk, parse it into a [`DashConfig`], apply
//! environment overrides, and validate before returning.
//!
//! ## Guarantees
//! - A successfully loaded config is always validated
//! - I/O errors and parse errors are distinguished in the error type
//! - File path is included in every error message
//!
//! ## NOT Responsible For
//! - Defining the config schema (that belongs to `mod.rs`)

use std::path::Path;

use tracing::{debug, info};

use super::validation::{self, ConfigError};
use super::DashConfig;

/// Overrides `server.host`.
pub const ENV_HOST: &str = "DEVDASH_HOST";
/// Overrides `server.port`.
pub const ENV_PORT: &str = "DEVDASH_PORT";
/// Overrides `client.base_url`.
pub const ENV_BASE_URL: &str = "DEVDASH_BASE_URL";

/// Load a [`DashConfig`] from a TOML file and validate it.
///
/// # Errors
///
/// - [`ConfigError::Io`] if the file cannot be read.
/// - [`ConfigError::Parse`] if the TOML is malformed.
/// - [`ConfigError::Validation`] if semantic constraints are violated.
///
/// # Panics
///
/// This function never panics.
pub fn load_from_file(path: &Path) -> Result<DashConfig, ConfigError> {
    let config = parse_file(path)?;
    check(&config)?;
    Ok(config)
}

/// Load a [`DashConfig`] from a TOML string and validate it.
///
/// `source_name` only appears in error messages.
///
/// # Errors
///
/// - [`ConfigError::Parse`] if the TOML is malformed.
/// - [`ConfigError::Validation`] if semantic constraints are violated.
///
/// # Panics
///
/// This function never panics.
pub fn load_from_str(content: &str, source_name: &str) -> Result<DashConfig, ConfigError> {
    let config = parse_str(content, source_name)?;
    check(&config)?;
    Ok(config)
}

/// Startup entry point used by the binaries.
///
/// Starts from the file at `path` (or the defaults when `None`), applies the
/// `DEVDASH_*` environment overrides, then validates.
///
/// # Errors
///
/// Any [`ConfigError`]; a malformed override is reported as
/// [`ConfigError::InvalidField`].
pub fn load(path: Option<&Path>) -> Result<DashConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => {
            debug!("no config file given, using defaults");
            DashConfig::default()
        }
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    check(&config)?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        base_url = %config.client.base_url,
        "configuration loaded"
    );
    Ok(config)
}

/// Apply `DEVDASH_*` overrides read through `lookup`.
///
/// Setting `DEVDASH_PORT` without `DEVDASH_BASE_URL` also points the client
/// at the new port when the base URL is still the default.
///
/// # Errors
///
/// [`ConfigError::InvalidField`] if `DEVDASH_PORT` is not a valid port.
pub fn apply_env_overrides<F>(config: &mut DashConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let default_base = config.client.base_url == DashConfig::default().client.base_url;

    if let Some(host) = lookup(ENV_HOST) {
        info!("{ENV_HOST} set, overriding server.host");
        config.server.host = host;
    }

    if let Some(raw) = lookup(ENV_PORT) {
        let port = raw
            .trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidField {
                field: ENV_PORT.into(),
                value: raw.clone(),
                reason: e.to_string(),
            })?;
        info!("{ENV_PORT} set, overriding server.port");
        config.server.port = port;
        if default_base {
            config.client.base_url = format!("http://{}:{}", config.server.host, port);
        }
    }

    if let Some(url) = lookup(ENV_BASE_URL) {
        info!("{ENV_BASE_URL} set, overriding client.base_url");
        config.client.base_url = url;
    }

    Ok(())
}

fn parse_file(path: &Path) -> Result<DashConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        file: path.display().to_string(),
        source: e,
    })?;
    parse_str(&content, &path.display().to_string())
}

fn parse_str(content: &str, source_name: &str) -> Result<DashConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse {
        file: source_name.to_string(),
        source: e,
    })
}

fn check(config: &DashConfig) -> Result<(), ConfigError> {
    validation::validate(config).map_err(|errors| {
        ConfigError::Validation(
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    })
}
