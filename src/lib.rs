//! # devdash
//!
//! A developer dashboard served from fixtures.
//!
//! ## Architecture
//!
//! One interaction pattern instantiated per view, plus two JSON endpoints:
//! ```text
//! search input ─▶ FetchController ─▶ FetchSource ─▶ /api/weather | fixtures
//!                      │
//!                      └─▶ LoadState (Idle → Loading → Resolved | Error) ─▶ tui
//! ```
//!
//! - [`fixtures`] builds the canned datasets.
//! - [`web_api`] serves them over HTTP with a structured `{error}` envelope.
//! - [`controller`] drives one request cycle per search, last request wins.
//! - [`tui`] renders the resolved data in the terminal.

// ── Lint policy ───────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(missing_docs)]

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod controller;
pub mod fixtures;
pub mod metrics;
pub mod models;
pub mod source;
pub mod theme;

#[cfg(feature = "web-api")]
pub mod web_api;

#[cfg(feature = "tui")]
pub mod tui;

// Re-exports for convenience
pub use controller::{FetchController, LoadState, Notice, NoticeLevel, SearchOutcome};
pub use source::{
    FetchSource, HttpDevelopersSource, HttpWeatherSource, MockActivitySource, MockCatalogSource,
    MockCodeforcesSource, MockGitHubSource,
};
pub use theme::{Appearance, Theme, ThemeContext, ThemeHandle};

/// Initialise the global tracing subscriber.
///
/// Reads the `LOG_FORMAT` environment variable to choose output format:
/// - `"json"` — structured JSON output for log aggregators
/// - anything else (including unset) — human-readable pretty output
///
/// Filter level is controlled by `RUST_LOG` (e.g. `RUST_LOG=info`).
///
/// # Errors
///
/// Returns [`DashError::Other`] if the global subscriber has already
/// been set (e.g. by a previous call or a test harness).
///
/// # Panics
///
/// This function never panics.
pub fn init_tracing() -> Result<(), DashError> {
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    init_tracing_with(&format)
}

/// Initialise tracing with an explicit output format (`"json"` or `"pretty"`).
///
/// Used by the binaries once the configuration file has been read.
///
/// # Errors
///
/// Returns [`DashError::Other`] if a global subscriber is already installed.
pub fn init_tracing_with(format: &str) -> Result<(), DashError> {
    let result = match format {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_current_span(true)
            .with_span_list(true)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init(),
    };

    result.map_err(|e| DashError::Other(format!("tracing init failed: {e}")))
}

/// Top-level dashboard errors.
///
/// Every failure a fetch cycle can hit maps to a variant here. Endpoint
/// errors have their own HTTP-facing type in `web_api`.
#[derive(Error, Debug)]
pub enum DashError {
    /// The search field was empty or whitespace-only; no request was issued.
    #[error("{0}")]
    EmptyQuery(String),

    /// The endpoint answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Message from the `{error}` body, or the status reason.
        message: String,
    },

    /// The request never produced a response (connect, timeout, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected schema.
    #[error("malformed response: {0}")]
    Decode(String),

    /// A configuration value is missing or invalid.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// A theme handle was used after its context was torn down.
    #[error("theme context has been torn down")]
    ThemeTornDown,

    /// Catch-all for errors that do not fit a specific variant.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for DashError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DashError::Decode(e.to_string())
        } else {
            DashError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_includes_code_and_message() {
        let err = DashError::Status {
            status: 400,
            message: "City parameter is required".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("City parameter is required"));
    }

    #[test]
    fn test_empty_query_displays_bare_message() {
        let err = DashError::EmptyQuery("Please enter a city name".to_string());
        assert_eq!(err.to_string(), "Please enter a city name");
    }

    #[test]
    fn test_config_error_display_includes_message() {
        let err = DashError::ConfigError("port must be non-zero".to_string());
        assert!(err.to_string().contains("port must be non-zero"));
    }

    #[test]
    fn test_init_tracing_second_call_returns_err() {
        // First call may succeed or fail depending on test execution order.
        let _ = init_tracing();
        let result = init_tracing();
        assert!(result.is_err(), "double init must return Err, not panic");
    }
}
