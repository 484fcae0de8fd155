//! # Widget: Codeforces Activity
//!
//! ## Responsibility
//! Tabbed panel on the home page: top rated users, recent contests, and the
//! latest submissions from the activity feed. `v` cycles the tab.
//!
//! ## Guarantees
//! - Ranks and verdicts use the same colours as the profile explorer

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Frame;

use super::codeforces::submission_line;
use super::{format_date, panel, render_pending};
use crate::models::ActivityFeed;
use crate::tui::app::{ActivityTab, App};
use crate::tui::palette::{rank_style, Palette};

/// Renders the activity widget.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = Palette::for_appearance(app.appearance);
    let block = panel("Codeforces Activity", &palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let selected = ActivityTab::ALL
        .iter()
        .position(|t| *t == app.activity_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(ActivityTab::ALL.iter().map(|t| t.title()))
        .select(selected)
        .style(palette.dim())
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    let Some(feed) = render_pending(f, chunks[1], &app.activity, "Loading activity...", app)
    else {
        return;
    };
    let lines = tab_lines(feed, app.activity_tab, &palette);
    f.render_widget(Paragraph::new(lines), chunks[1]);
}

/// Body lines for one tab.
pub fn tab_lines(feed: &ActivityFeed, tab: ActivityTab, palette: &Palette) -> Vec<Line<'static>> {
    match tab {
        ActivityTab::TopUsers => feed
            .users
            .iter()
            .enumerate()
            .map(|(i, u)| {
                Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), palette.dim()),
                    Span::styled(u.handle.clone(), rank_style(&u.rank)),
                    Span::styled(format!("  {}", u.rating), palette.text()),
                    Span::styled(format!("  max {}  {}", u.max_rating, u.rank), palette.dim()),
                ])
            })
            .collect(),
        ActivityTab::Contests => feed
            .contests
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::styled(c.name.clone(), palette.text()),
                    Span::styled(
                        format!(
                            "  {}  {:.1}h",
                            format_date(c.start_time_seconds),
                            c.duration_hours()
                        ),
                        palette.dim(),
                    ),
                ])
            })
            .collect(),
        ActivityTab::Submissions => feed
            .submissions
            .iter()
            .map(|s| submission_line(s, palette))
            .collect(),
    }
}
