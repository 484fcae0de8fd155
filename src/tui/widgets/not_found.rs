//! # Widget: Not Found
//!
//! Catch-all page for unknown routes.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::app::App;
use crate::tui::palette::Palette;

/// Renders the not-found page.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = Palette::for_appearance(app.appearance);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "404",
            palette.title().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Page not found", palette.text())),
        Line::from(""),
        Line::from(Span::styled(
            "Press 1 to return to the dashboard",
            palette.dim(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
