//! # Module: TUI App State
//!
//! ## Responsibility
//! Owns everything the renderer displays: the active route, the search
//! input, one [`LoadState`] snapshot per view, view toggles, and the notice
//! log. State transitions are deterministic and testable without a terminal.
//!
//! ## Guarantees
//! - The notice log is bounded and never grows past [`NOTICE_CAP`]
//! - Snapshots are replaced wholesale by the event loop, never merged
//! - No method panics

use std::collections::VecDeque;

use crate::controller::{LoadState, Notice};
use crate::models::{
    ActivityFeed, Catalog, CodeforcesProfile, DeveloperPage, GitHubProfile, Product,
    WeatherReport,
};
use crate::theme::{Appearance, ThemeHandle};

/// Maximum number of notices retained for display.
pub const NOTICE_CAP: usize = 20;

/// Maximum search input length in characters.
pub const INPUT_MAX_CHARS: usize = 64;

/// Minimum terminal width for the dashboard to render.
pub const MIN_COLS: u16 = 80;

/// Minimum terminal height for the dashboard to render.
pub const MIN_ROWS: u16 = 24;

/// A dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Home: weather, suggested developers, Codeforces activity.
    Dashboard,
    /// Codeforces profile explorer.
    Codeforces,
    /// GitHub profile explorer.
    GitHub,
    /// Product catalog.
    MockData,
    /// Anything unknown.
    NotFound,
}

impl Route {
    /// Routes shown in the header, in order.
    pub const NAV: [Route; 4] = [
        Route::Dashboard,
        Route::Codeforces,
        Route::GitHub,
        Route::MockData,
    ];

    /// Resolve a URL path. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Dashboard,
            "/codeforces" => Route::Codeforces,
            "/github" => Route::GitHub,
            "/mock-data" => Route::MockData,
            _ => Route::NotFound,
        }
    }

    /// Canonical path.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Codeforces => "/codeforces",
            Route::GitHub => "/github",
            Route::MockData => "/mock-data",
            Route::NotFound => "/404",
        }
    }

    /// Header label.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Codeforces => "Codeforces",
            Route::GitHub => "GitHub",
            Route::MockData => "Mock Data",
            Route::NotFound => "Not Found",
        }
    }

    /// Next header entry, wrapping. The not-found page continues at the start.
    pub fn next(&self) -> Self {
        match self {
            Route::Dashboard => Route::Codeforces,
            Route::Codeforces => Route::GitHub,
            Route::GitHub => Route::MockData,
            Route::MockData | Route::NotFound => Route::Dashboard,
        }
    }

    /// Placeholder for the search field, `None` if the page has none.
    pub fn search_placeholder(&self) -> Option<&'static str> {
        match self {
            Route::Dashboard => Some("Enter city name"),
            Route::Codeforces => Some("Enter Codeforces handle"),
            Route::GitHub => Some("Enter GitHub username"),
            Route::MockData => Some("Search products..."),
            Route::NotFound => None,
        }
    }
}

/// Submission display mode on the Codeforces page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionView {
    /// One row per submission.
    Table,
    /// One bordered card per submission.
    Cards,
}

/// Product display mode on the catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogLayout {
    /// Cards in columns.
    Grid,
    /// One row per product.
    List,
}

/// Tab of the Codeforces activity panel on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityTab {
    /// Top rated users.
    TopUsers,
    /// Recent contests.
    Contests,
    /// Recent submissions.
    Submissions,
}

impl ActivityTab {
    /// All tabs in display order.
    pub const ALL: [ActivityTab; 3] = [
        ActivityTab::TopUsers,
        ActivityTab::Contests,
        ActivityTab::Submissions,
    ];

    /// Tab label.
    pub fn title(&self) -> &'static str {
        match self {
            ActivityTab::TopUsers => "Top Users",
            ActivityTab::Contests => "Contests",
            ActivityTab::Submissions => "Submissions",
        }
    }

    /// Next tab, wrapping.
    pub fn next(&self) -> Self {
        match self {
            ActivityTab::TopUsers => ActivityTab::Contests,
            ActivityTab::Contests => ActivityTab::Submissions,
            ActivityTab::Submissions => ActivityTab::TopUsers,
        }
    }
}

/// A notice with the local time it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeEntry {
    /// Formatted timestamp, e.g. "14:32:01".
    pub timestamp: String,
    /// The notice itself.
    pub notice: Notice,
}

/// Work the event loop must hand to a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a search on the controller behind `route`.
    Search {
        /// Page the search was submitted on.
        route: Route,
        /// Raw input; the controller trims and validates it.
        query: String,
    },
}

/// Primary application state for the TUI dashboard.
#[derive(Debug)]
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Page currently shown.
    pub route: Route,
    /// Search input buffer for the current page.
    pub input: String,
    /// Whether keystrokes go to the search input.
    pub editing: bool,

    /// Weather widget state.
    pub weather: LoadState<WeatherReport>,
    /// Suggested developers state.
    pub developers: LoadState<DeveloperPage>,
    /// Codeforces activity feed state.
    pub activity: LoadState<ActivityFeed>,
    /// GitHub explorer state.
    pub github: LoadState<GitHubProfile>,
    /// Codeforces explorer state.
    pub codeforces: LoadState<CodeforcesProfile>,
    /// Product catalog state.
    pub catalog: LoadState<Catalog>,

    /// Active term for the local catalog filter.
    pub catalog_filter: String,
    /// Selected activity tab.
    pub activity_tab: ActivityTab,
    /// Codeforces submissions display mode.
    pub submission_view: SubmissionView,
    /// Catalog display mode.
    pub catalog_layout: CatalogLayout,

    /// Resolved appearance used by the palette.
    pub appearance: Appearance,
    /// Rolling notices, newest at the back.
    pub notices: VecDeque<NoticeEntry>,
    /// Frame counter for the loading spinner.
    pub spinner_tick: usize,

    theme: ThemeHandle,
}

impl App {
    /// Creates an `App` on the dashboard page with every view idle.
    pub fn new(theme: ThemeHandle) -> Self {
        let appearance = theme.appearance().unwrap_or(Appearance::Dark);
        Self {
            should_quit: false,
            show_help: false,
            route: Route::Dashboard,
            input: String::new(),
            editing: false,

            weather: LoadState::Idle,
            developers: LoadState::Idle,
            activity: LoadState::Idle,
            github: LoadState::Idle,
            codeforces: LoadState::Idle,
            catalog: LoadState::Idle,

            catalog_filter: String::new(),
            activity_tab: ActivityTab::TopUsers,
            submission_view: SubmissionView::Table,
            catalog_layout: CatalogLayout::Grid,

            appearance,
            notices: VecDeque::with_capacity(NOTICE_CAP),
            spinner_tick: 0,

            theme,
        }
    }

    /// Switch page. The search input is per page, so it is cleared.
    pub fn navigate(&mut self, route: Route) {
        if self.route != route {
            self.route = route;
            self.input.clear();
            self.editing = false;
        }
    }

    /// Switch to the page for a URL path. Unknown paths open the not-found page.
    pub fn open_path(&mut self, path: &str) -> Route {
        let route = Route::from_path(path);
        self.navigate(route);
        route
    }

    /// Append a character to the search input, up to [`INPUT_MAX_CHARS`].
    pub fn push_input(&mut self, c: char) {
        if self.input.chars().count() < INPUT_MAX_CHARS {
            self.input.push(c);
        }
    }

    /// Remove the last character of the search input.
    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Submit the search input for the current page.
    ///
    /// The catalog filters locally and returns no command; every other
    /// searchable page yields a [`Command::Search`].
    pub fn submit(&mut self) -> Option<Command> {
        self.editing = false;
        match self.route {
            Route::MockData => {
                self.catalog_filter = self.input.trim().to_string();
                let message = format!("Searching for: {}", self.catalog_filter);
                self.push_notice(Notice::success(message));
                None
            }
            Route::Dashboard | Route::Codeforces | Route::GitHub => Some(Command::Search {
                route: self.route,
                query: self.input.clone(),
            }),
            Route::NotFound => None,
        }
    }

    /// Flip the theme between dark and light.
    pub fn toggle_theme(&mut self) {
        match self.theme.toggle() {
            Ok(_) => {
                if let Ok(appearance) = self.theme.appearance() {
                    self.appearance = appearance;
                }
            }
            Err(e) => self.push_notice(Notice::error(e.to_string())),
        }
    }

    /// Toggle the display mode of the current page, if it has one.
    pub fn toggle_view(&mut self) {
        match self.route {
            Route::Codeforces => {
                self.submission_view = match self.submission_view {
                    SubmissionView::Table => SubmissionView::Cards,
                    SubmissionView::Cards => SubmissionView::Table,
                }
            }
            Route::MockData => {
                self.catalog_layout = match self.catalog_layout {
                    CatalogLayout::Grid => CatalogLayout::List,
                    CatalogLayout::List => CatalogLayout::Grid,
                }
            }
            Route::Dashboard => self.activity_tab = self.activity_tab.next(),
            Route::GitHub | Route::NotFound => {}
        }
    }

    /// Pushes a notice, evicting the oldest if at capacity.
    pub fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() >= NOTICE_CAP {
            self.notices.pop_front();
        }
        self.notices.push_back(NoticeEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            notice,
        });
    }

    /// Advance the spinner by one frame.
    pub fn on_tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    /// Products passing the catalog filter, or empty until the catalog loads.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.catalog
            .data()
            .map(|c| c.filter(&self.catalog_filter))
            .unwrap_or_default()
    }

    /// Whether any view on the current page is waiting on a request.
    pub fn page_loading(&self) -> bool {
        match self.route {
            Route::Dashboard => {
                self.weather.is_loading()
                    || self.developers.is_loading()
                    || self.activity.is_loading()
            }
            Route::Codeforces => self.codeforces.is_loading(),
            Route::GitHub => self.github.is_loading(),
            Route::MockData => self.catalog.is_loading(),
            Route::NotFound => false,
        }
    }
}
