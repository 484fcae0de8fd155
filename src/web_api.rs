//! Fixture endpoint server
//!
//! Serves the dashboard's canned datasets as JSON. Every error leaves the
//! server as `{"error": "<message>"}` with a matching status code.
//!
//! ## Endpoints
//!
//! - `GET /api/weather?city=<name>` — weather report echoing `city`
//! - `GET /api/mock/developers` — suggested developers page
//! - `GET /health` — Health check
//! - `GET /metrics` — Prometheus metrics
//!
//! Anything else answers 404 `{"error": "Not found"}`, and a known path with
//! the wrong method answers 405 `{"error": "Method not allowed"}`.

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, MatchedPath, Query, State},
    http::{header::CONTENT_TYPE, HeaderValue, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::ServerSection;
use crate::models::ErrorBody;
use crate::{fixtures, metrics, DashError};

/// Message for a missing or blank `city` parameter.
pub const CITY_REQUIRED: &str = "City parameter is required";

// ============================================================================
// State
// ============================================================================

#[derive(Debug)]
struct AppState {
    response_delay: Duration,
}

impl AppState {
    async fn simulate_latency(&self) {
        if !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }
    }
}

/// Query string of `GET /api/weather`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherQuery {
    /// City to report on. Absent and blank are both rejected.
    pub city: Option<String>,
}

impl WeatherQuery {
    /// Build from decoded query pairs. A repeated `city` keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let city = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "city").then_some(value));
        Self { city }
    }

    /// The trimmed city, or `None` when absent or blank.
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

// ============================================================================
// Router
// ============================================================================

/// Build the full router: routes, fallback, and middleware.
///
/// # Panics
///
/// This function never panics.
pub fn build_router(config: &ServerSection) -> Router {
    let state = Arc::new(AppState {
        response_delay: Duration::from_millis(config.response_delay_ms),
    });
    with_middleware(routes(state))
}

fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/weather", get(weather_handler))
        .route("/api/mock/developers", get(developers_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(metrics_middleware))
        .method_not_allowed_fallback(method_not_allowed_handler)
        .fallback(not_found_handler)
        .with_state(state)
}

fn with_middleware(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

/// Bind `config.host:config.port` and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns [`DashError::Other`] if the address cannot be bound or the
/// server fails.
pub async fn start_server(config: &ServerSection) -> Result<(), DashError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| DashError::Other(format!("failed to bind {addr}: {e}")))?;
    serve(listener, config, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`DashError::Other`] if the server fails.
pub async fn serve<F>(
    listener: TcpListener,
    config: &ServerSection,
    shutdown: F,
) -> Result<(), DashError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(config);
    match listener.local_addr() {
        Ok(addr) => info!("Fixture API ready on http://{addr}"),
        Err(e) => warn!(error = %e, "listener has no local address"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| DashError::Other(format!("server error: {e}")))?;

    info!("Fixture API stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Adds an `x-request-id` header to every response, preserving the client's.
///
/// # Panics
///
/// This function never panics.
async fn request_id_middleware(req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// Records status and latency per matched route template.
async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_string(), |p| p.as_str().to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed = start.elapsed();
    debug!(route = %route, status, elapsed_ms = elapsed.as_millis() as u64, "request served");
    metrics::record_http(&route, status, elapsed);
    response
}

fn panic_response(_payload: Box<dyn std::any::Any + Send + 'static>) -> Response {
    error!("handler panicked");
    AppError::Internal("Internal server error".to_string()).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/weather`: fixed weather report for the requested city.
///
/// # Panics
///
/// This function never panics.
async fn weather_handler(
    State(state): State<Arc<AppState>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Query(pairs) = pairs.map_err(|e| {
        debug!(error = %e, "unparseable weather query");
        AppError::BadRequest(CITY_REQUIRED.to_string())
    })?;
    let query = WeatherQuery::from_pairs(pairs);
    let city = query
        .city()
        .ok_or_else(|| AppError::BadRequest(CITY_REQUIRED.to_string()))?;

    state.simulate_latency().await;

    let report = fixtures::weather_for(city);
    let body = serde_json::to_value(&report).map_err(|e| {
        error!(error = %e, "weather serialization failed");
        AppError::Internal("Failed to fetch weather data".to_string())
    })?;
    Ok(Json(body))
}

/// `GET /api/mock/developers` — fixed page of suggested developers.
///
/// # Panics
///
/// This function never panics.
async fn developers_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.simulate_latency().await;

    let page = fixtures::developers();
    let body = serde_json::to_value(&page).map_err(|e| {
        error!(error = %e, "developers serialization failed");
        AppError::Internal("Failed to fetch developers data".to_string())
    })?;
    Ok(Json(body))
}

/// `GET /health` — Health check endpoint.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /metrics` — Prometheus metrics endpoint.
async fn metrics_handler() -> String {
    metrics::gather_metrics()
}

async fn not_found_handler() -> AppError {
    AppError::NotFound
}

async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}

// ============================================================================
// Error Type
// ============================================================================

/// Errors returned by handlers, each mapped to a status and an `{error}` body.
#[derive(Debug)]
pub enum AppError {
    /// A required input is missing or malformed (400).
    BadRequest(String),
    /// No route matched (404).
    NotFound,
    /// The path exists but not for this method (405).
    MethodNotAllowed,
    /// Something failed while building the response (500).
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            AppError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %message, "request failed");
        }

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(&ServerSection::default())
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        send_json(router, Method::GET, uri).await
    }

    async fn send_json(
        router: Router,
        method: Method,
        uri: &str,
    ) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("infallible");
        let status = response.status();
        assert_eq!(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json"),
            "{uri}"
        );
        let body = axum::body::to_bytes(response.into_body(), 1_000_000)
            .await
            .expect("body");
        let json = serde_json::from_slice(&body).expect("json body");
        (status, json)
    }

    #[tokio::test]
    async fn test_weather_echoes_city() {
        let (status, json) = get_json(app(), "/api/weather?city=Paris").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Paris");
        assert_eq!(json["main"]["temp"], 293.15);
        assert_eq!(json["weather"][0]["main"], "Clear");
    }

    #[tokio::test]
    async fn test_weather_decodes_percent_encoding() {
        let (_, json) = get_json(app(), "/api/weather?city=New%20York").await;
        assert_eq!(json["name"], "New York");
    }

    #[tokio::test]
    async fn test_weather_without_city_is_400() {
        for uri in ["/api/weather", "/api/weather?city=", "/api/weather?city=%20%20"] {
            let (status, json) = get_json(app(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(json, serde_json::json!({"error": CITY_REQUIRED}), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_repeated_city_uses_first_value() {
        let (status, json) = get_json(app(), "/api/weather?city=Paris&city=Rome").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Paris");

        let (_, json) = get_json(app(), "/api/weather?units=metric&city=Oslo").await;
        assert_eq!(json["name"], "Oslo");
    }

    #[tokio::test]
    async fn test_wrong_method_is_json_405() {
        for uri in ["/api/weather?city=Paris", "/api/mock/developers"] {
            let (status, json) = send_json(app(), Method::POST, uri).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
            assert_eq!(json["error"], "Method not allowed", "{uri}");
        }
    }

    #[test]
    fn test_weather_query_from_pairs() {
        let q = WeatherQuery::from_pairs(vec![
            ("city".to_string(), "  Lima ".to_string()),
            ("city".to_string(), "Quito".to_string()),
        ]);
        assert_eq!(q.city(), Some("Lima"));
        assert_eq!(WeatherQuery::from_pairs(Vec::new()).city(), None);
        let blank = WeatherQuery::from_pairs(vec![("city".to_string(), " ".to_string())]);
        assert_eq!(blank.city(), None);
    }

    #[tokio::test]
    async fn test_developers_page() {
        let (status, json) = get_json(app(), "/api/mock/developers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 5);
        assert_eq!(json["users"].as_array().map(Vec::len), Some(5));
        assert!(json["users"][0].get("firstName").is_some());
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, json) = get_json(app(), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Not found");
    }

    #[allow(clippy::panic)]
    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_panicking_handler_becomes_json_500() {
        let state = Arc::new(AppState {
            response_delay: Duration::ZERO,
        });
        let router = with_middleware(routes(state).route("/boom", get(boom)));
        let (status, json) = get_json(router, "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_request_id_preserved() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("infallible");
        assert_eq!(
            response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
            Some("abc-123")
        );
    }

    #[test]
    fn test_app_error_statuses() {
        assert_eq!(
            AppError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::Internal("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
