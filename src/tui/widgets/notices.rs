//! # Widget: Notices
//!
//! Renders the most recent toasts, newest last, colour-coded by level.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::panel;
use crate::tui::app::App;
use crate::tui::palette::{notice_color, Palette};

/// Renders the notice log, showing as many recent entries as fit.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = Palette::for_appearance(app.appearance);
    let block = panel("Notifications", &palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = inner.height as usize;
    let skip = app.notices.len().saturating_sub(visible);
    let lines: Vec<Line<'_>> = app
        .notices
        .iter()
        .skip(skip)
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("{} ", entry.timestamp), palette.dim()),
                Span::styled(
                    entry.notice.message.as_str(),
                    Style::default().fg(notice_color(entry.notice.level)),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
