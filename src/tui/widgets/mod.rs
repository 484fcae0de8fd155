//! # Module: TUI Widgets
//!
//! ## Responsibility
//! Individual rendering widgets for each dashboard section. Each widget is a
//! pure function that takes app state and a layout rect, and renders into a
//! frame.
//!
//! ## Guarantees
//! - All widgets render idle, loading and error states, not only data
//! - No widget panics on any input, including zero-sized areas

pub mod activity;
pub mod catalog;
pub mod codeforces;
pub mod developers;
pub mod github;
pub mod not_found;
pub mod notices;
pub mod search;
pub mod weather;

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::app::App;
use super::palette::Palette;
use crate::controller::LoadState;

/// Braille spinner frames.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for `tick`.
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Bordered panel with the palette's title and border styles.
pub fn panel<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(Span::styled(format!(" {title} "), palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border())
        .style(palette.text())
}

/// Render the placeholder for an unresolved `state` into `area`.
///
/// Returns the payload when resolved, leaving `area` for the caller.
pub fn render_pending<'s, T>(
    f: &mut Frame,
    area: Rect,
    state: &'s LoadState<T>,
    idle: &str,
    app: &App,
) -> Option<&'s T> {
    let palette = Palette::for_appearance(app.appearance);
    let line = match state {
        LoadState::Resolved { data, .. } => return Some(data),
        LoadState::Idle => Line::from(Span::styled(idle.to_string(), palette.dim())),
        LoadState::Loading { .. } => Line::from(vec![
            Span::styled(
                spinner_frame(app.spinner_tick),
                Style::default().fg(palette.accent),
            ),
            Span::styled(" Loading...", palette.dim()),
        ]),
        LoadState::Error { message, .. } => Line::from(Span::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red),
        )),
    };
    let para = Paragraph::new(vec![Line::from(""), line])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
    None
}

/// Shorten `s` to at most `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}

/// `YYYY-MM-DD` for a unix timestamp, or `"-"` if out of range.
pub fn format_date(unix_seconds: i64) -> String {
    chrono::DateTime::from_timestamp(unix_seconds, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len()));
    }

    #[test]
    fn test_truncate_short_untouched() {
        assert_eq!(truncate("abc", 5), "abc");
    }

    #[test]
    fn test_truncate_marks_cut() {
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
        assert_eq!(truncate("abc", 0), "…");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "1970-01-01");
    }
}
