//! # Widget: Suggested Developers
//!
//! Lists the first few developers from the mock API with their initials,
//! full name, and username.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{panel, render_pending};
use crate::models::DeveloperPage;
use crate::tui::app::App;
use crate::tui::palette::Palette;

/// Number of developers shown.
pub const SHOWN: usize = 3;

/// Renders the suggested developers widget.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = Palette::for_appearance(app.appearance);
    let block = panel("Suggested Developers", &palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(page) = render_pending(f, inner, &app.developers, "Loading developers...", app)
    else {
        return;
    };
    f.render_widget(Paragraph::new(developer_lines(page, &palette)), inner);
}

/// Two lines per shown developer.
pub fn developer_lines(page: &DeveloperPage, palette: &Palette) -> Vec<Line<'static>> {
    page.users
        .iter()
        .take(SHOWN)
        .flat_map(|dev| {
            [
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", dev.initials()),
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(dev.full_name(), palette.text()),
                ]),
                Line::from(Span::styled(format!("     @{}", dev.username), palette.dim())),
            ]
        })
        .collect()
}
