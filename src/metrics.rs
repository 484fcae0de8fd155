//! Prometheus metrics for the dashboard endpoints and fetch controllers.
//!
//! ## Usage
//!
//! Call [`init_metrics`] once at process startup. The recording helpers are
//! no-ops until then, so the controller and router never depend on metrics
//! being enabled.
//!
//! ## Metrics Exposed
//!
//! | Name | Type | Labels |
//! |------|------|--------|
//! | `devdash_http_requests_total` | Counter | `route`, `status` |
//! | `devdash_http_request_duration_seconds` | Histogram | `route` |
//! | `devdash_fetch_cycles_total` | Counter | `view`, `outcome` |

use crate::DashError;
use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;
use std::time::Duration;

// ── Internal metrics bundle ────────────────────────────────────────────────

/// All dashboard metrics, stored together in one [`OnceLock`].
pub struct Metrics {
    /// Registry that owns all metric descriptors.
    pub registry: Registry,
    /// Endpoint responses by route template and status code.
    pub http_requests: CounterVec,
    /// Endpoint latency by route template.
    pub http_duration: HistogramVec,
    /// Completed controller cycles by view and outcome.
    pub fetch_cycles: CounterVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

fn init_err(e: prometheus::Error) -> DashError {
    DashError::Other(format!("metrics init failed: {e}"))
}

impl Metrics {
    /// Build a bundle registered under `prefix` in a fresh registry.
    fn build(prefix: &str) -> Result<Self, DashError> {
        let registry = Registry::new();

        let http_requests = CounterVec::new(
            Opts::new(
                format!("{prefix}_http_requests_total"),
                "Endpoint responses by route and status",
            ),
            &["route", "status"],
        )
        .map_err(init_err)?;
        registry
            .register(Box::new(http_requests.clone()))
            .map_err(init_err)?;

        let http_duration = HistogramVec::new(
            HistogramOpts::new(
                format!("{prefix}_http_request_duration_seconds"),
                "Endpoint latency by route",
            ),
            &["route"],
        )
        .map_err(init_err)?;
        registry
            .register(Box::new(http_duration.clone()))
            .map_err(init_err)?;

        let fetch_cycles = CounterVec::new(
            Opts::new(
                format!("{prefix}_fetch_cycles_total"),
                "Completed fetch cycles by view and outcome",
            ),
            &["view", "outcome"],
        )
        .map_err(init_err)?;
        registry
            .register(Box::new(fetch_cycles.clone()))
            .map_err(init_err)?;

        Ok(Self {
            registry,
            http_requests,
            http_duration,
            fetch_cycles,
        })
    }
}

// ── Initialisation ─────────────────────────────────────────────────────────

/// Initialise the global metrics registry.
///
/// Calling it a second time is a no-op (returns `Ok(())`).
///
/// # Errors
///
/// Returns [`DashError::Other`] if metric construction or registration fails.
///
/// # Panics
///
/// This function never panics.
pub fn init_metrics() -> Result<(), DashError> {
    if METRICS.get().is_some() {
        return Ok(());
    }
    let bundle = Metrics::build("devdash")?;
    // A racing initialiser builds identical descriptors; first one wins.
    let _ = METRICS.set(bundle);
    Ok(())
}

fn metrics() -> Option<&'static Metrics> {
    METRICS.get()
}

// ── Public helper functions ────────────────────────────────────────────────

/// Record one endpoint response. No-op if metrics have not been initialised.
///
/// # Panics
///
/// This function never panics.
pub fn record_http(route: &str, status: u16, d: Duration) {
    if let Some(m) = metrics() {
        let status = status.to_string();
        if let Ok(c) = m
            .http_requests
            .get_metric_with_label_values(&[route, status.as_str()])
        {
            c.inc();
        }
        if let Ok(h) = m.http_duration.get_metric_with_label_values(&[route]) {
            h.observe(d.as_secs_f64());
        }
    }
}

/// Count one completed fetch cycle. No-op if metrics have not been initialised.
///
/// # Panics
///
/// This function never panics.
pub fn inc_fetch_cycle(view: &str, outcome: &str) {
    if let Some(m) = metrics() {
        if let Ok(c) = m.fetch_cycles.get_metric_with_label_values(&[view, outcome]) {
            c.inc();
        }
    }
}

/// Encode all metrics in the Prometheus text exposition format.
///
/// Returns an empty string if metrics are not initialised or encoding fails.
///
/// # Panics
///
/// This function never panics.
pub fn gather_metrics() -> String {
    let Some(m) = metrics() else {
        return String::new();
    };
    encode(&m.registry)
}

fn encode(registry: &Registry) -> String {
    let families = registry.gather();
    if families.is_empty() {
        return String::new();
    }
    let mut buffer = Vec::new();
    if TextEncoder::new().encode(&families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
