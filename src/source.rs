//! Data sources behind each dashboard view.
//!
//! Provides the [`FetchSource`] trait and one implementation per view:
//! - [`HttpWeatherSource`]: `GET /api/weather?city=…`
//! - [`HttpDevelopersSource`]: `GET /api/mock/developers`
//! - [`MockGitHubSource`], [`MockCodeforcesSource`], [`MockActivitySource`],
//!   [`MockCatalogSource`]: local fixture synthesis after a fixed delay
//!
//! A source performs exactly one request (or one delayed synthesis) per
//! call. Retries, caching, and ordering are not its concern; the controller
//! owns the lifecycle.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientSection;
use crate::fixtures;
use crate::models::{
    ActivityFeed, Catalog, CodeforcesProfile, DeveloperPage, ErrorBody, GitHubProfile,
    WeatherReport,
};
use crate::DashError;

/// Default artificial delay for locally synthesized data.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1000);

/// A single-request data source for one view.
///
/// Implementations must be thread-safe (Send + Sync) so a controller can be
/// shared across tasks.
#[async_trait]
pub trait FetchSource: Send + Sync {
    /// The payload a successful fetch yields.
    type Output: Clone + Send + Sync + 'static;

    /// Short view label used in logs and metrics, e.g. `"weather"`.
    fn view(&self) -> &'static str;

    /// Whether a non-blank query is required before a request may be issued.
    fn requires_query(&self) -> bool {
        true
    }

    /// Warning shown when the query is blank.
    fn empty_query_notice(&self) -> String {
        "Please enter a search term".to_string()
    }

    /// Toast shown on success, if any.
    fn success_notice(&self, _query: &str, _data: &Self::Output) -> Option<String> {
        None
    }

    /// Toast shown on failure.
    fn failure_notice(&self) -> String;

    /// Perform the request. `query` is already trimmed.
    async fn fetch(&self, query: &str) -> Result<Self::Output, DashError>;
}

// ============================================================================
// HTTP sources
// ============================================================================

/// Build a reqwest client from the client section of the config.
///
/// # Errors
///
/// Returns [`DashError::ConfigError`] if the TLS backend cannot be initialised.
pub fn build_client(config: &ClientSection) -> Result<reqwest::Client, DashError> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .build()
        .map_err(|e| DashError::ConfigError(format!("http client: {e}")))
}

/// Turn a response into `T`, mapping non-success statuses to
/// [`DashError::Status`] with the message from the `{error}` body.
async fn decode_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, DashError> {
    let status = resp.status();
    if !status.is_success() {
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        };
        warn!(status = status.as_u16(), message = %message, "endpoint returned error");
        return Err(DashError::Status {
            status: status.as_u16(),
            message,
        });
    }

    resp.json::<T>()
        .await
        .map_err(|e| DashError::Decode(e.to_string()))
}

/// Weather widget source, backed by `GET /api/weather`.
#[derive(Debug, Clone)]
pub struct HttpWeatherSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWeatherSource {
    /// Create a source that talks to the server at `base_url`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl FetchSource for HttpWeatherSource {
    type Output = WeatherReport;

    fn view(&self) -> &'static str {
        "weather"
    }

    fn empty_query_notice(&self) -> String {
        "Please enter a city name".to_string()
    }

    fn failure_notice(&self) -> String {
        "Error fetching weather data".to_string()
    }

    async fn fetch(&self, city: &str) -> Result<WeatherReport, DashError> {
        let url = format!("{}/api/weather", self.base_url);
        debug!(url = %url, city = %city, "fetching weather");
        let resp = self.client.get(&url).query(&[("city", city)]).send().await?;
        decode_response(resp).await
    }
}

/// Suggested-developers source, backed by `GET /api/mock/developers`.
#[derive(Debug, Clone)]
pub struct HttpDevelopersSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDevelopersSource {
    /// Create a source that talks to the server at `base_url`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl FetchSource for HttpDevelopersSource {
    type Output = DeveloperPage;

    fn view(&self) -> &'static str {
        "developers"
    }

    fn requires_query(&self) -> bool {
        false
    }

    fn failure_notice(&self) -> String {
        "Error fetching suggested developers".to_string()
    }

    async fn fetch(&self, _query: &str) -> Result<DeveloperPage, DashError> {
        let url = format!("{}/api/mock/developers", self.base_url);
        debug!(url = %url, "fetching developers");
        let resp = self.client.get(&url).send().await?;
        let page: DeveloperPage = decode_response(resp).await?;
        page.validate().map_err(DashError::Decode)?;
        Ok(page)
    }
}

// ============================================================================
// Mock sources
// ============================================================================

/// GitHub explorer source: a profile synthesized after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockGitHubSource {
    /// Simulated request latency.
    pub delay: Duration,
}

impl MockGitHubSource {
    /// Source with an explicit delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockGitHubSource {
    fn default() -> Self {
        Self::with_delay(DEFAULT_MOCK_DELAY)
    }
}

#[async_trait]
impl FetchSource for MockGitHubSource {
    type Output = GitHubProfile;

    fn view(&self) -> &'static str {
        "github"
    }

    fn empty_query_notice(&self) -> String {
        "Please enter a GitHub username".to_string()
    }

    fn success_notice(&self, query: &str, _data: &GitHubProfile) -> Option<String> {
        Some(format!("Found GitHub user: {query}"))
    }

    fn failure_notice(&self) -> String {
        "Error fetching GitHub user data".to_string()
    }

    async fn fetch(&self, username: &str) -> Result<GitHubProfile, DashError> {
        tokio::time::sleep(self.delay).await;
        Ok(fixtures::github_profile(username, Utc::now()))
    }
}

/// Codeforces explorer source: a profile synthesized after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockCodeforcesSource {
    /// Simulated request latency.
    pub delay: Duration,
}

impl MockCodeforcesSource {
    /// Source with an explicit delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockCodeforcesSource {
    fn default() -> Self {
        Self::with_delay(DEFAULT_MOCK_DELAY)
    }
}

#[async_trait]
impl FetchSource for MockCodeforcesSource {
    type Output = CodeforcesProfile;

    fn view(&self) -> &'static str {
        "codeforces"
    }

    fn empty_query_notice(&self) -> String {
        "Please enter a Codeforces handle".to_string()
    }

    fn success_notice(&self, query: &str, _data: &CodeforcesProfile) -> Option<String> {
        Some(format!("Found user: {query}"))
    }

    fn failure_notice(&self) -> String {
        "Error fetching Codeforces user data".to_string()
    }

    async fn fetch(&self, handle: &str) -> Result<CodeforcesProfile, DashError> {
        tokio::time::sleep(self.delay).await;
        Ok(fixtures::codeforces_profile(handle, Utc::now()))
    }
}

/// Home-page activity feed. No query, no delay.
#[derive(Debug, Clone, Default)]
pub struct MockActivitySource;

#[async_trait]
impl FetchSource for MockActivitySource {
    type Output = ActivityFeed;

    fn view(&self) -> &'static str {
        "activity"
    }

    fn requires_query(&self) -> bool {
        false
    }

    fn failure_notice(&self) -> String {
        "Error fetching Codeforces data".to_string()
    }

    async fn fetch(&self, _query: &str) -> Result<ActivityFeed, DashError> {
        Ok(fixtures::codeforces_activity(Utc::now()))
    }
}

/// Product catalog, loaded once after a fixed delay and filtered locally.
#[derive(Debug, Clone)]
pub struct MockCatalogSource {
    /// Simulated request latency.
    pub delay: Duration,
}

impl MockCatalogSource {
    /// Source with an explicit delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockCatalogSource {
    fn default() -> Self {
        Self::with_delay(DEFAULT_MOCK_DELAY)
    }
}

#[async_trait]
impl FetchSource for MockCatalogSource {
    type Output = Catalog;

    fn view(&self) -> &'static str {
        "catalog"
    }

    fn requires_query(&self) -> bool {
        false
    }

    fn failure_notice(&self) -> String {
        "Error fetching product data".to_string()
    }

    async fn fetch(&self, _query: &str) -> Result<Catalog, DashError> {
        tokio::time::sleep(self.delay).await;
        Ok(fixtures::product_catalog())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_github_echoes_username() {
        let source = MockGitHubSource::with_delay(Duration::from_millis(1));
        let profile = source.fetch("octocat").await.expect("mock never fails");
        assert_eq!(profile.user.login, "octocat");
        assert_eq!(
            source.success_notice("octocat", &profile).as_deref(),
            Some("Found GitHub user: octocat")
        );
    }

    #[tokio::test]
    async fn test_mock_codeforces_echoes_handle() {
        let source = MockCodeforcesSource::with_delay(Duration::from_millis(1));
        let profile = source.fetch("tourist").await.expect("mock never fails");
        assert_eq!(profile.user.handle, "tourist");
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_catalog_waits_for_delay() {
        let source = MockCatalogSource::with_delay(Duration::from_millis(1000));
        let start = tokio::time::Instant::now();
        let catalog = source.fetch("").await.expect("mock never fails");
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(catalog.products.len(), 8);
    }

    #[test]
    fn test_query_requirements() {
        assert!(MockGitHubSource::default().requires_query());
        assert!(MockCodeforcesSource::default().requires_query());
        assert!(!MockActivitySource.requires_query());
        assert!(!MockCatalogSource::default().requires_query());
    }

    #[test]
    fn test_empty_query_notices() {
        assert_eq!(
            MockGitHubSource::default().empty_query_notice(),
            "Please enter a GitHub username"
        );
        assert_eq!(
            MockCodeforcesSource::default().empty_query_notice(),
            "Please enter a Codeforces handle"
        );
    }

    #[test]
    fn test_http_source_trims_trailing_slash() {
        let source = HttpWeatherSource::new(reqwest::Client::new(), "http://localhost:8080/");
        assert_eq!(source.base_url, "http://localhost:8080");
        assert_eq!(source.empty_query_notice(), "Please enter a city name");
    }

    #[tokio::test]
    async fn test_http_weather_unreachable_is_network_error() {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .expect("client");
        // Port 9 (discard) is not listening in test environments.
        let source = HttpWeatherSource::new(client, "http://127.0.0.1:9");
        let err = source.fetch("Paris").await.expect_err("nothing listens");
        assert!(matches!(err, DashError::Network(_)), "got {err:?}");
    }
}
