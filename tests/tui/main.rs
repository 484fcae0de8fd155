//! Integration tests for the TUI dashboard module.
//!
//! These tests verify cross-module interactions: key sequences driving app
//! state and search commands, controller snapshots flowing into the app, and
//! full-frame rendering on a `TestBackend`.

#![cfg(feature = "tui")]

mod app_state;
mod widget_tests;

use devdash::theme::{Appearance, Theme, ThemeContext};
use devdash::tui::app::App;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// A dark-themed app plus the context that keeps its theme alive.
pub fn dark_app() -> (ThemeContext, App) {
    let ctx = ThemeContext::create_with_system(Theme::Dark, false, Appearance::Dark);
    let app = App::new(ctx.handle());
    (ctx, app)
}

/// Render `app` at `width`x`height` and return the screen as text rows.
pub fn render_to_text(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal
        .draw(|f| devdash::tui::ui::draw(f, app))
        .expect("draw");

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
