//! Integration tests for App state transitions and update logic.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use devdash::controller::{FetchController, LoadState, NoticeLevel};
use devdash::source::{MockCatalogSource, MockGitHubSource};
use devdash::theme::Appearance;
use devdash::tui::app::{App, Command, Route, SubmissionView, NOTICE_CAP};
use devdash::tui::events::{apply_event, translate_key};
use tokio::sync::mpsc;

use super::dark_app;

/// Feed `keys` through the key map the way the event loop does.
fn press(app: &mut App, keys: &[KeyCode]) -> Vec<Command> {
    keys.iter()
        .filter_map(|code| {
            let event = translate_key(KeyEvent::new(*code, KeyModifiers::NONE), app.editing);
            apply_event(app, event)
        })
        .collect()
}

fn type_text(text: &str) -> Vec<KeyCode> {
    text.chars().map(KeyCode::Char).collect()
}

#[test]
fn test_search_flow_on_github_page() {
    let (_ctx, mut app) = dark_app();

    let mut keys = vec![KeyCode::Char('3'), KeyCode::Char('/')];
    keys.extend(type_text("octocat"));
    keys.push(KeyCode::Enter);

    let commands = press(&mut app, &keys);
    assert_eq!(app.route, Route::GitHub);
    assert_eq!(
        commands,
        vec![Command::Search {
            route: Route::GitHub,
            query: "octocat".to_string()
        }]
    );
    assert!(!app.editing);
}

#[test]
fn test_typing_q_while_editing_does_not_quit() {
    let (_ctx, mut app) = dark_app();
    let mut keys = vec![KeyCode::Char('/')];
    keys.extend(type_text("quebec"));
    press(&mut app, &keys);
    assert!(!app.should_quit);
    assert_eq!(app.input, "quebec");

    press(&mut app, &[KeyCode::Backspace, KeyCode::Esc]);
    assert_eq!(app.input, "quebe");
    assert!(!app.editing);
    assert!(!app.should_quit, "Esc only leaves edit mode");

    press(&mut app, &[KeyCode::Esc]);
    assert!(app.should_quit);
}

#[test]
fn test_tab_cycles_all_pages() {
    let (_ctx, mut app) = dark_app();
    let mut seen = vec![app.route];
    for _ in 0..4 {
        press(&mut app, &[KeyCode::Tab]);
        seen.push(app.route);
    }
    assert_eq!(
        seen,
        vec![
            Route::Dashboard,
            Route::Codeforces,
            Route::GitHub,
            Route::MockData,
            Route::Dashboard
        ]
    );
}

#[test]
fn test_theme_and_view_toggles() {
    let (_ctx, mut app) = dark_app();
    press(&mut app, &[KeyCode::Char('t')]);
    assert_eq!(app.appearance, Appearance::Light);

    press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('v')]);
    assert_eq!(app.submission_view, SubmissionView::Cards);
}

#[test]
fn test_catalog_search_is_local_and_toasts() {
    let (_ctx, mut app) = dark_app();
    let mut keys = vec![KeyCode::Char('4'), KeyCode::Char('/')];
    keys.extend(type_text("laptop"));
    keys.push(KeyCode::Enter);

    let commands = press(&mut app, &keys);
    assert!(commands.is_empty());
    assert_eq!(app.catalog_filter, "laptop");
    let toast = app.notices.back().expect("toast");
    assert_eq!(toast.notice.message, "Searching for: laptop");
}

#[test]
fn test_notice_log_stays_bounded_under_burst() {
    let (_ctx, mut app) = dark_app();
    for i in 0..(NOTICE_CAP * 3) {
        app.push_notice(devdash::Notice::error(format!("e{i}")));
    }
    assert_eq!(app.notices.len(), NOTICE_CAP);
}

#[tokio::test(start_paused = true)]
async fn test_controller_snapshots_flow_into_app() {
    let (_ctx, mut app) = dark_app();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let github = Arc::new(
        FetchController::new(MockGitHubSource::with_delay(Duration::from_millis(50)))
            .with_notices(tx.clone()),
    );
    let catalog = Arc::new(
        FetchController::new(MockCatalogSource::with_delay(Duration::from_millis(50)))
            .with_notices(tx),
    );

    let catalog_load = catalog.spawn_search("");
    let search = github.spawn_search("octocat");
    app.github = github.state();
    app.catalog = catalog.state();
    app.navigate(Route::GitHub);
    assert!(app.page_loading());

    search.await.expect("join");
    catalog_load.await.expect("join");
    app.github = github.state();
    app.catalog = catalog.state();
    while let Ok(n) = rx.try_recv() {
        app.push_notice(n);
    }

    assert!(!app.page_loading());
    assert_eq!(
        app.github.data().map(|p| p.user.login.as_str()),
        Some("octocat")
    );
    assert_eq!(app.visible_products().len(), 8);
    let toast = app.notices.back().expect("toast");
    assert_eq!(toast.notice.level, NoticeLevel::Success);
    assert_eq!(toast.notice.message, "Found GitHub user: octocat");
}

#[test]
fn test_error_snapshot_keeps_no_stale_data() {
    let (_ctx, mut app) = dark_app();
    app.github = LoadState::Error {
        seq: 2,
        message: "boom".to_string(),
    };
    assert!(app.github.data().is_none());
    assert_eq!(app.github.error(), Some("boom"));
}
