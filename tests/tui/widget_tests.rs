//! Full-frame rendering tests on a `TestBackend`.
//!
//! Each test puts the app into a state, draws one frame, and checks the
//! visible text.

use chrono::Utc;
use devdash::controller::LoadState;
use devdash::fixtures;
use devdash::tui::app::{CatalogLayout, Route, SubmissionView, MIN_COLS, MIN_ROWS};

use super::{dark_app, render_to_text};

const W: u16 = 120;
const H: u16 = 40;

fn resolved<T>(data: T) -> LoadState<T> {
    LoadState::Resolved { seq: 1, data }
}

#[test]
fn test_too_small_terminal_shows_guard() {
    let (_ctx, app) = dark_app();
    let screen = render_to_text(&app, MIN_COLS - 1, MIN_ROWS);
    assert!(screen.contains("Terminal too small"));
}

#[test]
fn test_minimum_size_renders_dashboard() {
    let (_ctx, app) = dark_app();
    let screen = render_to_text(&app, MIN_COLS, MIN_ROWS);
    assert!(!screen.contains("Terminal too small"));
    assert!(screen.contains("devdash"));
}

#[test]
fn test_dashboard_idle_and_loading_states() {
    let (_ctx, mut app) = dark_app();
    app.developers = LoadState::Loading {
        seq: 1,
        query: String::new(),
    };
    let screen = render_to_text(&app, W, H);
    assert!(screen.contains("Search for a city to see the weather"));
    assert!(screen.contains("Loading..."));
    assert!(screen.contains("Enter city name"));
}

#[test]
fn test_dashboard_resolved_widgets() {
    let (_ctx, mut app) = dark_app();
    app.weather = resolved(fixtures::weather_for("Paris"));
    app.developers = resolved(fixtures::developers());
    app.activity = resolved(fixtures::codeforces_activity(Utc::now()));

    let screen = render_to_text(&app, W, H);
    assert!(screen.contains("Paris"));
    assert!(screen.contains("20°C"));
    assert!(screen.contains("Humidity: 65%"));
    assert!(screen.contains("John Doe"));
    assert!(!screen.contains("Sarah Williams"), "only three developers");
    assert!(screen.contains("tourist"));
}

#[test]
fn test_weather_error_is_rendered() {
    let (_ctx, mut app) = dark_app();
    app.weather = LoadState::Error {
        seq: 3,
        message: "network error: connection refused".to_string(),
    };
    let screen = render_to_text(&app, W, H);
    assert!(screen.contains("Error: network error"));
}

#[test]
fn test_github_profile_page() {
    let (_ctx, mut app) = dark_app();
    app.navigate(Route::GitHub);
    app.github = resolved(fixtures::github_profile("octocat", Utc::now()));

    let screen = render_to_text(&app, W, H);
    assert!(screen.contains("@octocat"));
    assert!(screen.contains("awesome-project"));
    assert!(screen.contains("Repositories (4)"));
}

#[test]
fn test_codeforces_table_and_cards() {
    let (_ctx, mut app) = dark_app();
    app.navigate(Route::Codeforces);
    app.codeforces = resolved(fixtures::codeforces_profile("tourist", Utc::now()));

    let table = render_to_text(&app, W, H);
    assert!(table.contains("[table]"));
    assert!(table.contains("WRONG_ANSWER"));
    assert!(table.contains("candidate master"));

    app.submission_view = SubmissionView::Cards;
    let cards = render_to_text(&app, W, H);
    assert!(cards.contains("[cards]"));
    assert!(cards.contains("1A Binary Search"));
}

#[test]
fn test_catalog_count_and_filter() {
    let (_ctx, mut app) = dark_app();
    app.navigate(Route::MockData);
    app.catalog = resolved(fixtures::product_catalog());

    let screen = render_to_text(&app, W, H);
    assert!(screen.contains("8 products found"));

    app.catalog_filter = "apple".to_string();
    app.catalog_layout = CatalogLayout::List;
    let screen = render_to_text(&app, W, H);
    assert!(screen.contains("3 products found"));
    assert!(screen.contains("[list]"));

    app.catalog_filter = "zzz-no-match".to_string();
    let screen = render_to_text(&app, W, H);
    assert!(screen.contains("0 products found"));
    assert!(screen.contains("No products match your search"));
}

#[test]
fn test_not_found_page() {
    let (_ctx, mut app) = dark_app();
    assert_eq!(app.open_path("/does-not-exist"), Route::NotFound);
    let screen = render_to_text(&app, W, H);
    assert!(screen.contains("404"));
    assert!(screen.contains("Page not found"));
    assert!(!screen.contains("Enter city name"), "not-found page has no search bar");

    assert_eq!(app.open_path("/github/"), Route::GitHub);
    let screen = render_to_text(&app, W, H);
    assert!(!screen.contains("Page not found"));
}

#[test]
fn test_help_overlay_and_notices() {
    let (_ctx, mut app) = dark_app();
    app.push_notice(devdash::Notice::warning("Please enter a city name"));
    app.show_help = true;
    let screen = render_to_text(&app, W, H);
    assert!(screen.contains("Press any key to close"));
    assert!(screen.contains("Please enter a city name"));
}
