//! # Module: Dashboard Configuration
//!
//! ## Responsibility
//! Describe, parse, and validate the TOML configuration shared by the
//! `devdash` server and the `devdash-tui` client:
//! ```text
//! devdash --config devdash.toml
//! ```
//!
//! ## Guarantees
//! - Every field has a default, so an empty file (or no file) is a valid config
//! - Validated: semantic constraints are checked before a config is accepted
//! - Env overrides (`DEVDASH_HOST`, `DEVDASH_PORT`, `DEVDASH_BASE_URL`) are
//!   applied after the file and before validation
//! - Schema-exportable: JSON Schema output enables IDE autocomplete
//!
//! ## NOT Responsible For
//! - Binding sockets (that belongs to `web_api`)
//! - Building HTTP clients (that belongs to `source`)

pub mod loader;
pub mod validation;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

// ── Default value functions ──────────────────────────────────────────────

fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default server port: 3000.
fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    format!("http://{}:{}", default_host(), default_port())
}

/// Default client timeout: 10s.
fn default_timeout_ms() -> u64 {
    10_000
}

/// Default artificial delay for locally synthesized views: 1000ms.
fn default_mock_delay_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_theme() -> Theme {
    Theme::System
}

// ── Top-level config ─────────────────────────────────────────────────────

/// Root configuration.
///
/// # Example
///
/// ```toml
/// [server]
/// port = 8080
///
/// [mock]
/// delay_ms = 250
///
/// [theme]
/// default = "dark"
/// enable_system = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct DashConfig {
    /// Endpoint server settings.
    pub server: ServerSection,
    /// HTTP client settings used by the dashboard views.
    pub client: ClientSection,
    /// Locally synthesized data settings.
    pub mock: MockSection,
    /// Theme preference.
    pub theme: ThemeSection,
    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Endpoint server settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ServerSection {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port. `0` picks an ephemeral port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Fixed delay added before every endpoint response.
    pub response_delay_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            response_delay_ms: 0,
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ClientSection {
    /// Base URL of the endpoint server, e.g. `http://127.0.0.1:3000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Settings for the GitHub, Codeforces, and catalog views.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct MockSection {
    /// Artificial latency before fixture data is returned.
    #[serde(default = "default_mock_delay_ms")]
    pub delay_ms: u64,
}

impl Default for MockSection {
    fn default() -> Self {
        Self {
            delay_ms: default_mock_delay_ms(),
        }
    }
}

/// Theme preference.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ThemeSection {
    /// Theme used when system detection is off.
    #[serde(default = "default_theme")]
    pub default: Theme,
    /// Start from the detected terminal appearance.
    #[serde(default = "default_true")]
    pub enable_system: bool,
}

impl Default for ThemeSection {
    fn default() -> Self {
        Self {
            default: default_theme(),
            enable_system: true,
        }
    }
}

// ── Observability ────────────────────────────────────────────────────────

/// Logging and metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log output format.
    pub log_format: LogFormat,
    /// Register Prometheus metrics and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable, colorized log output.
    #[default]
    Pretty,
    /// Structured JSON log output for machine consumption.
    Json,
}

impl LogFormat {
    /// Name accepted by [`crate::init_tracing_with`].
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Export the JSON Schema for [`DashConfig`].
///
/// # Errors
///
/// Returns `serde_json::Error` if schema serialization fails.
///
/// # Panics
///
/// This function never panics.
pub fn export_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(DashConfig);
    serde_json::to_string_pretty(&schema)
}
