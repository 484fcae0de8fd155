//! # Module: TUI Dashboard
//!
//! ## Responsibility
//! Terminal rendering of the dashboard views using Ratatui: the home page
//! (weather, suggested developers, Codeforces activity), the GitHub and
//! Codeforces explorers, the product catalog, and a not-found page.
//!
//! ## Guarantees
//! - No panics in any rendering or update path
//! - Widgets only read [`crate::LoadState`] snapshots; they never fetch
//! - Clean terminal restore on exit, including on panic (see `bin/tui.rs`)
//!
//! ## NOT Responsible For
//! - Issuing requests (the binary forwards [`app::Command`]s to controllers)
//! - Theme ownership (reads and toggles through a [`crate::ThemeHandle`])

pub mod app;
pub mod events;
pub mod palette;
pub mod ui;
pub mod widgets;
