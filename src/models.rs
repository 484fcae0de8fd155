//! Typed payload schemas.
//!
//! ## Responsibility
//! One struct per wire shape. Everything that crosses the fetch boundary is
//! deserialized into these types before the renderer sees it, so a payload
//! with the wrong shape fails as a decode error instead of rendering garbage.
//!
//! ## Guarantees
//! - Field names on the wire match the JSON the endpoints emit
//!   (`feels_like`, `firstName`, `contestId`, …)
//! - Helpers are pure and never panic
//!
//! ## NOT Responsible For
//! - Producing data (that belongs to `fixtures`)
//! - Styling (that belongs to `tui`)

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Offset between Kelvin and Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

// ── Envelope ──────────────────────────────────────────────────────────────

/// Structured error body returned by every endpoint on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

impl ErrorBody {
    /// Build an error body from any string-like message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ── Weather ───────────────────────────────────────────────────────────────

/// `GET /api/weather` response body. Temperatures are in Kelvin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    /// City name, echoed from the request.
    pub name: String,
    /// Temperature and humidity readings.
    pub main: WeatherMain,
    /// Current conditions, most significant first.
    pub weather: Vec<WeatherCondition>,
}

/// Numeric readings of a [`WeatherReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherMain {
    /// Air temperature in Kelvin.
    pub temp: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Perceived temperature in Kelvin.
    pub feels_like: f64,
}

/// A single weather condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherCondition {
    /// Condition group, e.g. `"Clear"` or `"Rain"`.
    pub main: String,
    /// Free-text description, e.g. `"clear sky"`.
    pub description: String,
}

impl WeatherReport {
    /// Air temperature in whole degrees Celsius.
    pub fn temp_celsius(&self) -> i64 {
        kelvin_to_celsius(self.main.temp)
    }

    /// Perceived temperature in whole degrees Celsius.
    pub fn feels_like_celsius(&self) -> i64 {
        kelvin_to_celsius(self.main.feels_like)
    }

    /// The first reported condition, if any.
    pub fn primary_condition(&self) -> Option<&WeatherCondition> {
        self.weather.first()
    }
}

/// Convert Kelvin to Celsius, rounded half away from zero.
pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - KELVIN_OFFSET).round() as i64
}

// ── Developers ────────────────────────────────────────────────────────────

/// A suggested developer from `GET /api/mock/developers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    /// Numeric identifier, unique within a page.
    pub id: u32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address.
    pub email: String,
    /// Avatar reference.
    pub image: String,
    /// Handle shown under the name.
    pub username: String,
}

impl Developer {
    /// `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Avatar fallback letters, e.g. `"JD"`.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}

/// Paged developer listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeveloperPage {
    /// Developers on this page.
    pub users: Vec<Developer>,
    /// Total developers across all pages.
    pub total: usize,
    /// Offset of the first user on this page.
    pub skip: usize,
    /// Page size.
    pub limit: usize,
}

impl DeveloperPage {
    /// Check the page is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint: more users
    /// than `limit`, a `total` smaller than the page, or a duplicate id.
    pub fn validate(&self) -> Result<(), String> {
        if self.users.len() > self.limit {
            return Err(format!(
                "page holds {} users but limit is {}",
                self.users.len(),
                self.limit
            ));
        }
        if self.total < self.users.len() {
            return Err(format!(
                "total {} is smaller than page size {}",
                self.total,
                self.users.len()
            ));
        }
        let mut seen = HashSet::with_capacity(self.users.len());
        for user in &self.users {
            if !seen.insert(user.id) {
                return Err(format!("duplicate developer id {}", user.id));
            }
        }
        Ok(())
    }
}

// ── GitHub ────────────────────────────────────────────────────────────────

/// A GitHub account profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GitHubUser {
    /// Account login.
    pub login: String,
    /// Display name.
    pub name: String,
    /// Avatar reference.
    pub avatar_url: String,
    /// Profile URL.
    pub html_url: String,
    /// Short biography.
    pub bio: String,
    /// Free-text location.
    pub location: String,
    /// Employer.
    pub company: String,
    /// Personal site, with or without a scheme.
    pub blog: String,
    /// Number of public repositories.
    pub public_repos: u32,
    /// Follower count.
    pub followers: u32,
    /// Following count.
    pub following: u32,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl GitHubUser {
    /// The blog as a clickable URL, adding `https://` when no scheme is present.
    pub fn blog_href(&self) -> String {
        if self.blog.starts_with("http") {
            self.blog.clone()
        } else {
            format!("https://{}", self.blog)
        }
    }
}

/// A public repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GitHubRepo {
    /// Repository id.
    pub id: u64,
    /// Short name.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Repository URL.
    pub html_url: String,
    /// One-line description.
    pub description: String,
    /// Star count.
    pub stargazers_count: u32,
    /// Fork count.
    pub forks_count: u32,
    /// Primary language.
    pub language: String,
    /// Last push time.
    pub updated_at: DateTime<Utc>,
}

/// Everything the GitHub view shows for one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GitHubProfile {
    /// The account.
    pub user: GitHubUser,
    /// Its repositories.
    pub repos: Vec<GitHubRepo>,
}

// ── Codeforces ────────────────────────────────────────────────────────────

/// A Codeforces account profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesUser {
    /// Account handle.
    pub handle: String,
    /// Current rating.
    pub rating: i32,
    /// Rank title, e.g. `"candidate master"`.
    pub rank: String,
    /// Highest rating ever reached.
    pub max_rating: i32,
    /// Community contribution score.
    pub contribution: i32,
    /// Number of users who friended this account.
    pub friend_of_count: u32,
    /// Avatar reference.
    pub avatar: String,
    /// Large profile photo reference.
    pub title_photo: String,
    /// Registration time, Unix seconds.
    pub registration_time_seconds: i64,
    /// Last seen time, Unix seconds.
    pub last_online_time_seconds: i64,
}

/// A contest problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Problem {
    /// Problem title.
    pub name: String,
    /// Letter within the contest, e.g. `"A"`.
    pub index: String,
    /// Topic tags.
    pub tags: Vec<String>,
}

/// Judge verdict of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Accepted.
    #[serde(rename = "OK")]
    Ok,
    /// Wrong answer on some test.
    WrongAnswer,
    /// Ran out of time on some test.
    TimeLimitExceeded,
    /// Any other verdict.
    #[serde(other)]
    Other,
}

impl Verdict {
    /// The judge's label for this verdict.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::WrongAnswer => "WRONG_ANSWER",
            Self::TimeLimitExceeded => "TIME_LIMIT_EXCEEDED",
            Self::Other => "OTHER",
        }
    }
}

/// A single judged submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Submission id.
    pub id: u64,
    /// Contest the problem belongs to.
    pub contest_id: u64,
    /// The problem attempted.
    pub problem: Problem,
    /// Judge verdict.
    pub verdict: Verdict,
    /// Language the solution was written in.
    pub programming_language: String,
    /// Maximum running time over all tests.
    pub time_consumed_millis: u64,
    /// Submission time, Unix seconds.
    pub creation_time_seconds: i64,
}

/// Everything the Codeforces view shows for one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CodeforcesProfile {
    /// The account.
    pub user: CodeforcesUser,
    /// Its recent submissions, newest first.
    pub submissions: Vec<Submission>,
}

/// A top-rated user on the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatedUser {
    /// Account handle.
    pub handle: String,
    /// Current rating.
    pub rating: i32,
    /// Rank title.
    pub rank: String,
    /// Highest rating ever reached.
    pub max_rating: i32,
    /// Avatar reference.
    pub avatar: String,
}

/// A recent contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    /// Contest id.
    pub id: u64,
    /// Contest title.
    pub name: String,
    /// Start time, Unix seconds.
    pub start_time_seconds: i64,
    /// Length in seconds.
    pub duration_seconds: u64,
}

impl Contest {
    /// Length in hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration_seconds as f64 / 3600.0
    }
}

/// The dashboard's "recent activity" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActivityFeed {
    /// Top users by rating.
    pub users: Vec<RatedUser>,
    /// Recent contests.
    pub contests: Vec<Contest>,
    /// Latest submissions.
    pub submissions: Vec<Submission>,
}

// ── Catalog ───────────────────────────────────────────────────────────────

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id.
    pub id: u32,
    /// Product name.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// List price in dollars.
    pub price: f64,
    /// Discount off the list price, in percent.
    pub discount_percentage: f64,
    /// Average review score out of 5.
    pub rating: f64,
    /// Units in stock.
    pub stock: u32,
    /// Manufacturer.
    pub brand: String,
    /// Category slug.
    pub category: String,
    /// Thumbnail reference.
    pub thumbnail: String,
    /// Full-size image references.
    pub images: Vec<String>,
}

impl Product {
    /// Price after discount, rounded to cents.
    pub fn discounted_price(&self) -> f64 {
        let raw = self.price * (100.0 - self.discount_percentage) / 100.0;
        (raw * 100.0).round() / 100.0
    }

    /// Whether the product is discounted at all.
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0.0
    }

    /// Case-insensitive substring match over title, description, brand and category.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.title, &self.description, &self.brand, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// The full product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    /// All products, in id order.
    pub products: Vec<Product>,
}

impl Catalog {
    /// Products matching `term`. A blank term matches everything.
    pub fn filter(&self, term: &str) -> Vec<&Product> {
        let term = term.trim();
        if term.is_empty() {
            return self.products.iter().collect();
        }
        self.products.iter().filter(|p| p.matches(term)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn developer(id: u32) -> Developer {
        Developer {
            id,
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            email: "jane.smith@example.com".into(),
            image: "/placeholder.svg".into(),
            username: "janesmith".into(),
        }
    }

    fn product(discount: f64) -> Product {
        Product {
            id: 1,
            title: "iPhone 13".into(),
            description: "A15 Bionic chip".into(),
            price: 999.0,
            discount_percentage: discount,
            rating: 4.7,
            stock: 45,
            brand: "Apple".into(),
            category: "smartphones".into(),
            thumbnail: String::new(),
            images: vec![],
        }
    }

    #[test]
    fn test_kelvin_to_celsius_rounds() {
        assert_eq!(kelvin_to_celsius(293.15), 20);
        assert_eq!(kelvin_to_celsius(292.15), 19);
        assert_eq!(kelvin_to_celsius(273.15), 0);
        assert_eq!(kelvin_to_celsius(263.65), -10);
    }

    #[test]
    fn test_weather_report_wire_names() {
        let json = serde_json::json!({
            "name": "Paris",
            "main": {"temp": 293.15, "humidity": 65, "feels_like": 292.15},
            "weather": [{"main": "Clear", "description": "clear sky"}]
        });
        let report: WeatherReport = serde_json::from_value(json).expect("deser");
        assert_eq!(report.temp_celsius(), 20);
        assert_eq!(report.feels_like_celsius(), 19);
        assert_eq!(
            report.primary_condition().map(|c| c.main.as_str()),
            Some("Clear")
        );
    }

    #[test]
    fn test_weather_report_missing_field_fails() {
        let json = serde_json::json!({"name": "Paris", "weather": []});
        assert!(serde_json::from_value::<WeatherReport>(json).is_err());
    }

    #[test]
    fn test_developer_serializes_camel_case() {
        let json = serde_json::to_value(developer(2)).expect("ser");
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["lastName"], "Smith");
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_developer_initials_and_full_name() {
        let dev = developer(1);
        assert_eq!(dev.initials(), "JS");
        assert_eq!(dev.full_name(), "Jane Smith");
    }

    #[test]
    fn test_developer_page_validate_accepts_consistent_page() {
        let page = DeveloperPage {
            users: vec![developer(1), developer(2)],
            total: 2,
            skip: 0,
            limit: 2,
        };
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_developer_page_validate_rejects_duplicate_ids() {
        let page = DeveloperPage {
            users: vec![developer(1), developer(1)],
            total: 2,
            skip: 0,
            limit: 5,
        };
        let err = page.validate().expect_err("duplicate ids");
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn test_developer_page_validate_rejects_oversized_page() {
        let page = DeveloperPage {
            users: vec![developer(1), developer(2)],
            total: 2,
            skip: 0,
            limit: 1,
        };
        assert!(page.validate().is_err());
    }

    #[test]
    fn test_developer_page_validate_rejects_short_total() {
        let page = DeveloperPage {
            users: vec![developer(1), developer(2)],
            total: 1,
            skip: 0,
            limit: 5,
        };
        assert!(page.validate().is_err());
    }

    #[test]
    fn test_verdict_wire_labels() {
        let ok: Verdict = serde_json::from_str("\"OK\"").expect("deser");
        assert_eq!(ok, Verdict::Ok);
        let wa: Verdict = serde_json::from_str("\"WRONG_ANSWER\"").expect("deser");
        assert_eq!(wa, Verdict::WrongAnswer);
        let other: Verdict = serde_json::from_str("\"COMPILATION_ERROR\"").expect("deser");
        assert_eq!(other, Verdict::Other);
        assert_eq!(
            serde_json::to_string(&Verdict::TimeLimitExceeded).expect("ser"),
            "\"TIME_LIMIT_EXCEEDED\""
        );
    }

    #[test]
    fn test_blog_href_adds_scheme() {
        let mut user = GitHubUser {
            login: "octo".into(),
            name: "Octo".into(),
            avatar_url: String::new(),
            html_url: String::new(),
            bio: String::new(),
            location: String::new(),
            company: String::new(),
            blog: "example.com".into(),
            public_repos: 0,
            followers: 0,
            following: 0,
            created_at: Utc::now(),
        };
        assert_eq!(user.blog_href(), "https://example.com");
        user.blog = "http://example.com".into();
        assert_eq!(user.blog_href(), "http://example.com");
    }

    #[test]
    fn test_contest_duration_hours() {
        let contest = Contest {
            id: 1,
            name: "Round".into(),
            start_time_seconds: 0,
            duration_seconds: 7200,
        };
        assert_eq!(contest.duration_hours(), 2.0);
    }

    #[test]
    fn test_discounted_price_two_decimals() {
        let p = product(10.0);
        assert_eq!(p.discounted_price(), 899.1);
        assert!(p.has_discount());
        assert!(!product(0.0).has_discount());
    }

    #[test]
    fn test_product_matches_any_field_case_insensitive() {
        let p = product(0.0);
        assert!(p.matches("iphone"));
        assert!(p.matches("BIONIC"));
        assert!(p.matches("apple"));
        assert!(p.matches("phones"));
        assert!(!p.matches("samsung"));
    }

    #[test]
    fn test_catalog_filter_blank_returns_all() {
        let catalog = Catalog {
            products: vec![product(0.0), product(5.0)],
        };
        assert_eq!(catalog.filter("   ").len(), 2);
        assert_eq!(catalog.filter("nothing").len(), 0);
    }
}
