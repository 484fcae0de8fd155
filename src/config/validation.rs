//! Configuration validation engine.
//!
//! ## Responsibility
//! Check semantic constraints on a parsed [`DashConfig`] that serde cannot
//! express (ranges, URL shape).
//!
//! ## Guarantees
//! - Validation collects *all* errors before returning (no short-circuit)
//! - Error messages include the field path and the invalid value
//!
//! ## NOT Responsible For
//! - Parsing TOML or reading files (that belongs to `loader`)

use super::DashConfig;

/// Upper bound for any artificial delay.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Errors arising from configuration parsing, validation, or I/O.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing failed.
    #[error("Parse error in {file}: {source}")]
    Parse {
        /// Path of the file that failed to parse.
        file: String,
        /// Underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// One or more semantic validation rules failed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A specific field has an out-of-range value.
    #[error("Field '{field}' has invalid value {value}: {reason}")]
    InvalidField {
        /// Dot-separated field path (e.g., "client.base_url").
        field: String,
        /// String representation of the invalid value.
        value: String,
        /// Human-readable explanation of the constraint.
        reason: String,
    },

    /// File I/O error.
    #[error("IO error reading {file}: {source}")]
    Io {
        /// Path of the file that could not be read.
        file: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfigError> for crate::DashError {
    fn from(e: ConfigError) -> Self {
        crate::DashError::ConfigError(e.to_string())
    }
}

/// Validate all semantic constraints on a [`DashConfig`].
///
/// # Errors
///
/// Every violation found, in field order.
///
/// # Panics
///
/// This function never panics.
pub fn validate(config: &DashConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // ── Server ───────────────────────────────────────────────────────
    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::InvalidField {
            field: "server.host".into(),
            value: String::new(),
            reason: "must not be empty".into(),
        });
    }

    if config.server.response_delay_ms > MAX_DELAY_MS {
        errors.push(ConfigError::InvalidField {
            field: "server.response_delay_ms".into(),
            value: config.server.response_delay_ms.to_string(),
            reason: format!("must be \u{2264} {MAX_DELAY_MS}"),
        });
    }

    // ── Client ───────────────────────────────────────────────────────
    let url = config.client.base_url.trim();
    let has_scheme = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_scheme {
        errors.push(ConfigError::InvalidField {
            field: "client.base_url".into(),
            value: config.client.base_url.clone(),
            reason: "must be an http:// or https:// URL".into(),
        });
    }

    if config.client.timeout_ms == 0 {
        errors.push(ConfigError::InvalidField {
            field: "client.timeout_ms".into(),
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }

    // ── Mock data ────────────────────────────────────────────────────
    if config.mock.delay_ms > MAX_DELAY_MS {
        errors.push(ConfigError::InvalidField {
            field: "mock.delay_ms".into(),
            value: config.mock.delay_ms.to_string(),
            reason: format!("must be \u{2264} {MAX_DELAY_MS}"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
