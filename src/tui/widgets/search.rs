//! # Widget: Search Bar
//!
//! ## Responsibility
//! Renders the per-page search input with its placeholder, an edit cursor,
//! and a spinner while the page has a request in flight.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::spinner_frame;
use crate::tui::app::App;
use crate::tui::palette::Palette;

/// Renders the search bar. Pages without search render nothing.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(placeholder) = app.route.search_placeholder() else {
        return;
    };
    let palette = Palette::for_appearance(app.appearance);

    let border = if app.editing {
        Style::default().fg(palette.accent)
    } else {
        palette.border()
    };
    let hint = if app.editing {
        " Enter search · Esc cancel "
    } else {
        " / to search "
    };
    let block = Block::default()
        .title(Span::styled(" Search ", palette.title()))
        .title_bottom(Span::styled(hint, palette.dim()))
        .borders(Borders::ALL)
        .border_style(border);

    f.render_widget(Paragraph::new(input_line(app, placeholder, &palette)).block(block), area);
}

/// The input contents, or the placeholder when empty and not editing.
pub fn input_line(app: &App, placeholder: &str, palette: &Palette) -> Line<'static> {
    let mut spans = Vec::with_capacity(3);
    if app.input.is_empty() && !app.editing {
        spans.push(Span::styled(
            placeholder.to_string(),
            palette.dim().add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(app.input.clone(), palette.text()));
    }
    if app.editing {
        spans.push(Span::styled(
            "▏",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    if app.page_loading() {
        spans.push(Span::styled(
            format!("  {} Searching...", spinner_frame(app.spinner_tick)),
            Style::default().fg(palette.accent),
        ));
    }
    Line::from(spans)
}
