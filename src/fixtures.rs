//! Fixture provider.
//!
//! Canned, deterministic datasets standing in for the weather service, the
//! developer directory, GitHub, Codeforces, and a product catalog. Every
//! function builds a fresh value; nothing here is cached or mutated.
//!
//! Relative timestamps ("one week ago") are computed from the `now` argument
//! so callers and tests control the clock.

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    ActivityFeed, Catalog, CodeforcesProfile, CodeforcesUser, Contest, Developer, DeveloperPage,
    GitHubProfile, GitHubRepo, GitHubUser, Problem, Product, RatedUser, Submission, Verdict,
    WeatherCondition, WeatherMain, WeatherReport,
};

/// Placeholder avatar used by small profile pictures.
pub const AVATAR_SMALL: &str = "/placeholder.svg?height=100&width=100";
/// Placeholder avatar used by profile cards.
pub const AVATAR_LARGE: &str = "/placeholder.svg?height=200&width=200";
/// Placeholder for full-size product and title images.
pub const IMAGE_FULL: &str = "/placeholder.svg?height=400&width=400";

const ONE_HOUR: i64 = 3_600;
const ONE_DAY: i64 = 86_400;
const ONE_YEAR: i64 = 365 * ONE_DAY;

/// Weather for `city`: 20 °C, clear sky, echoed city name.
pub fn weather_for(city: &str) -> WeatherReport {
    WeatherReport {
        name: city.to_string(),
        main: WeatherMain {
            temp: 293.15,
            humidity: 65,
            feels_like: 292.15,
        },
        weather: vec![WeatherCondition {
            main: "Clear".to_string(),
            description: "clear sky".to_string(),
        }],
    }
}

/// The five suggested developers, as a single page.
pub fn developers() -> DeveloperPage {
    let people = [
        (1, "John", "Doe", "johndoe"),
        (2, "Jane", "Smith", "janesmith"),
        (3, "Alex", "Johnson", "alexj"),
        (4, "Sarah", "Williams", "sarahw"),
        (5, "Michael", "Brown", "mikebrown"),
    ];

    let users: Vec<Developer> = people
        .iter()
        .map(|&(id, first, last, username)| Developer {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
            image: AVATAR_SMALL.to_string(),
            username: username.to_string(),
        })
        .collect();

    DeveloperPage {
        total: users.len(),
        skip: 0,
        limit: users.len(),
        users,
    }
}

/// Capitalise the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A GitHub profile with four repositories for `username`.
pub fn github_profile(username: &str, now: DateTime<Utc>) -> GitHubProfile {
    let user = GitHubUser {
        login: username.to_string(),
        name: capitalize(username),
        avatar_url: AVATAR_LARGE.to_string(),
        html_url: format!("https://github.com/{username}"),
        bio: "Full-stack developer passionate about web technologies and open source."
            .to_string(),
        location: "San Francisco, CA".to_string(),
        company: "Tech Company Inc.".to_string(),
        blog: "https://example.com".to_string(),
        public_repos: 25,
        followers: 150,
        following: 75,
        created_at: now - Duration::seconds(ONE_YEAR),
    };

    let repos = [
        (
            1,
            "awesome-project",
            "A collection of awesome resources for developers",
            120,
            35,
            "JavaScript",
            7,
        ),
        (
            2,
            "react-components",
            "A library of reusable React components",
            85,
            20,
            "TypeScript",
            14,
        ),
        (
            3,
            "api-toolkit",
            "Tools for building and consuming APIs",
            65,
            15,
            "Python",
            30,
        ),
        (
            4,
            "css-framework",
            "A lightweight CSS framework for modern web applications",
            45,
            10,
            "CSS",
            60,
        ),
    ]
    .iter()
    .map(
        |&(id, name, description, stars, forks, language, days_ago)| GitHubRepo {
            id,
            name: name.to_string(),
            full_name: format!("{username}/{name}"),
            html_url: format!("https://github.com/{username}/{name}"),
            description: description.to_string(),
            stargazers_count: stars,
            forks_count: forks,
            language: language.to_string(),
            updated_at: now - Duration::days(days_ago),
        },
    )
    .collect();

    GitHubProfile { user, repos }
}

fn submission(
    id: u64,
    contest_id: u64,
    (name, index, tags): (&str, &str, &[&str]),
    verdict: Verdict,
    language: &str,
    millis: u64,
    created: i64,
) -> Submission {
    Submission {
        id,
        contest_id,
        problem: Problem {
            name: name.to_string(),
            index: index.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        },
        verdict,
        programming_language: language.to_string(),
        time_consumed_millis: millis,
        creation_time_seconds: created,
    }
}

/// The first three submissions are shared by the profile view and the feed.
fn recent_submissions(now: i64, count: usize) -> Vec<Submission> {
    let all = vec![
        submission(
            101,
            1,
            ("Binary Search", "A", &["binary search", "implementation"]),
            Verdict::Ok,
            "C++",
            15,
            now - ONE_HOUR,
        ),
        submission(
            102,
            1,
            ("Dynamic Programming", "B", &["dp", "math"]),
            Verdict::WrongAnswer,
            "Python",
            100,
            now - 2 * ONE_HOUR,
        ),
        submission(
            103,
            2,
            ("Graph Theory", "C", &["graphs", "dfs and similar"]),
            Verdict::Ok,
            "Java",
            250,
            now - 3 * ONE_HOUR,
        ),
        submission(
            104,
            3,
            ("String Algorithms", "D", &["strings", "hashing"]),
            Verdict::TimeLimitExceeded,
            "JavaScript",
            2000,
            now - 4 * ONE_HOUR,
        ),
        submission(
            105,
            3,
            ("Greedy Algorithm", "E", &["greedy", "sortings"]),
            Verdict::Ok,
            "C++",
            50,
            now - 5 * ONE_HOUR,
        ),
    ];
    all.into_iter().take(count).collect()
}

/// A Codeforces profile with five submissions for `handle`.
pub fn codeforces_profile(handle: &str, now: DateTime<Utc>) -> CodeforcesProfile {
    let ts = now.timestamp();
    CodeforcesProfile {
        user: CodeforcesUser {
            handle: handle.to_string(),
            rating: 1850,
            rank: "candidate master".to_string(),
            max_rating: 1920,
            contribution: 42,
            friend_of_count: 150,
            avatar: AVATAR_LARGE.to_string(),
            title_photo: IMAGE_FULL.to_string(),
            registration_time_seconds: ts - ONE_YEAR,
            last_online_time_seconds: ts - ONE_HOUR,
        },
        submissions: recent_submissions(ts, 5),
    }
}

/// Top users, recent contests, and latest submissions for the home page.
pub fn codeforces_activity(now: DateTime<Utc>) -> ActivityFeed {
    let ts = now.timestamp();
    let rated = |handle: &str, rating, rank: &str, max_rating| RatedUser {
        handle: handle.to_string(),
        rating,
        rank: rank.to_string(),
        max_rating,
        avatar: AVATAR_SMALL.to_string(),
    };
    let contest = |id, name: &str, days_ago: i64| Contest {
        id,
        name: name.to_string(),
        start_time_seconds: ts - days_ago * ONE_DAY,
        duration_seconds: 7200,
    };

    ActivityFeed {
        users: vec![
            rated("tourist", 3779, "legendary grandmaster", 3825),
            rated("Petr", 3602, "international grandmaster", 3743),
            rated("Um_nik", 3559, "international grandmaster", 3670),
        ],
        contests: vec![
            contest(1, "Codeforces Round #835 (Div. 1)", 1),
            contest(2, "Codeforces Round #834 (Div. 2)", 2),
            contest(3, "Educational Codeforces Round 148", 3),
        ],
        submissions: recent_submissions(ts, 3),
    }
}

/// The eight-product catalog.
pub fn product_catalog() -> Catalog {
    let rows: [(u32, &str, &str, f64, f64, f64, u32, &str, &str); 8] = [
        (
            1,
            "iPhone 13",
            "The latest iPhone with A15 Bionic chip, Super Retina XDR display, and improved camera system",
            999.0,
            10.5,
            4.7,
            45,
            "Apple",
            "smartphones",
        ),
        (
            2,
            "Samsung Galaxy S21",
            "5G smartphone with 120Hz display, 8K video, and all-day battery life",
            899.0,
            15.0,
            4.5,
            30,
            "Samsung",
            "smartphones",
        ),
        (
            3,
            "MacBook Pro",
            "Apple M1 Pro chip, 16-inch Liquid Retina XDR display, and up to 21 hours of battery life",
            1999.0,
            5.0,
            4.9,
            20,
            "Apple",
            "laptops",
        ),
        (
            4,
            "Dell XPS 15",
            "15.6-inch 4K UHD display, 11th Gen Intel Core processors, and NVIDIA GeForce graphics",
            1599.0,
            8.0,
            4.6,
            25,
            "Dell",
            "laptops",
        ),
        (
            5,
            "Sony WH-1000XM4",
            "Industry-leading noise canceling wireless headphones with exceptional sound quality",
            349.0,
            12.0,
            4.8,
            50,
            "Sony",
            "headphones",
        ),
        (
            6,
            "iPad Pro",
            "M1 chip, Liquid Retina XDR display, and Thunderbolt support",
            799.0,
            7.0,
            4.7,
            35,
            "Apple",
            "tablets",
        ),
        (
            7,
            "Logitech MX Master 3",
            "Advanced wireless mouse with ultrafast scrolling and app-specific customizations",
            99.0,
            5.0,
            4.6,
            60,
            "Logitech",
            "peripherals",
        ),
        (
            8,
            "Samsung QLED TV",
            "4K Smart TV with Quantum Processor and Alexa built-in",
            1299.0,
            20.0,
            4.5,
            15,
            "Samsung",
            "televisions",
        ),
    ];

    Catalog {
        products: rows
            .iter()
            .map(
                |&(id, title, description, price, discount, rating, stock, brand, category)| {
                    Product {
                        id,
                        title: title.to_string(),
                        description: description.to_string(),
                        price,
                        discount_percentage: discount,
                        rating,
                        stock,
                        brand: brand.to_string(),
                        category: category.to_string(),
                        thumbnail: AVATAR_LARGE.to_string(),
                        images: vec![IMAGE_FULL.to_string()],
                    }
                },
            )
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("test: valid timestamp")
    }

    #[test]
    fn test_weather_echoes_city() {
        let report = weather_for("Paris");
        assert_eq!(report.name, "Paris");
        assert_eq!(report.main.temp, 293.15);
        assert_eq!(report.main.humidity, 65);
        assert_eq!(report.main.feels_like, 292.15);
        assert_eq!(report.weather.len(), 1);
    }

    #[test]
    fn test_developers_page_shape() {
        let page = developers();
        assert_eq!(page.total, 5);
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 5);
        let ids: Vec<u32> = page.users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_developer_emails_follow_name() {
        let page = developers();
        assert_eq!(page.users[0].email, "john.doe@example.com");
        assert_eq!(page.users[4].email, "michael.brown@example.com");
    }

    #[test]
    fn test_github_profile_uses_username() {
        let profile = github_profile("octocat", fixed_now());
        assert_eq!(profile.user.login, "octocat");
        assert_eq!(profile.user.name, "Octocat");
        assert_eq!(profile.user.html_url, "https://github.com/octocat");
        assert_eq!(profile.repos.len(), 4);
        assert_eq!(profile.repos[0].full_name, "octocat/awesome-project");
    }

    #[test]
    fn test_github_profile_relative_dates() {
        let now = fixed_now();
        let profile = github_profile("octocat", now);
        assert_eq!(profile.user.created_at, now - Duration::days(365));
        assert_eq!(profile.repos[0].updated_at, now - Duration::days(7));
        assert_eq!(profile.repos[3].updated_at, now - Duration::days(60));
    }

    #[test]
    fn test_capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
    }

    #[test]
    fn test_codeforces_profile_shape() {
        let now = fixed_now();
        let profile = codeforces_profile("jiangly", now);
        assert_eq!(profile.user.handle, "jiangly");
        assert_eq!(profile.user.rating, 1850);
        assert_eq!(profile.user.rank, "candidate master");
        assert_eq!(profile.submissions.len(), 5);
        assert_eq!(
            profile.user.last_online_time_seconds,
            now.timestamp() - 3600
        );
    }

    #[test]
    fn test_activity_feed_shape() {
        let feed = codeforces_activity(fixed_now());
        assert_eq!(feed.users.len(), 3);
        assert_eq!(feed.users[0].handle, "tourist");
        assert_eq!(feed.contests.len(), 3);
        assert_eq!(feed.submissions.len(), 3);
        assert!(feed.contests.iter().all(|c| c.duration_hours() == 2.0));
    }

    #[test]
    fn test_fixtures_are_deterministic() {
        let now = fixed_now();
        assert_eq!(github_profile("a", now), github_profile("a", now));
        assert_eq!(codeforces_activity(now), codeforces_activity(now));
        assert_eq!(product_catalog(), product_catalog());
    }

    #[test]
    fn test_catalog_has_eight_products() {
        let catalog = product_catalog();
        assert_eq!(catalog.products.len(), 8);
        assert_eq!(catalog.filter("apple").len(), 3);
        assert_eq!(catalog.filter("laptops").len(), 2);
    }
}
