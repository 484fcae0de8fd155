//! # Widget: Codeforces Explorer
//!
//! ## Responsibility
//! Renders a Codeforces user card and their recent submissions, as a table
//! or as cards depending on [`App::submission_view`].
//!
//! ## Guarantees
//! - At most two problem tags are listed; the rest collapse to `+N more`

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use super::{format_date, panel, render_pending};
use crate::models::{CodeforcesUser, Submission};
use crate::tui::app::{App, SubmissionView};
use crate::tui::palette::{rank_style, verdict_color, Palette};

/// Shown before the first search.
pub const IDLE_TEXT: &str = "Search for a Codeforces handle to see their profile";

/// Tags listed before collapsing.
pub const TAGS_SHOWN: usize = 2;

const CARD_HEIGHT: u16 = 4;

/// Renders the Codeforces page body.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = Palette::for_appearance(app.appearance);

    let Some(profile) = render_pending(f, area, &app.codeforces, IDLE_TEXT, app) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(area);

    let card = panel("Profile", &palette);
    let card_inner = card.inner(chunks[0]);
    f.render_widget(card, chunks[0]);
    f.render_widget(Paragraph::new(user_lines(&profile.user, &palette)), card_inner);

    let mode = match app.submission_view {
        SubmissionView::Table => "table",
        SubmissionView::Cards => "cards",
    };
    let title = format!("Recent Submissions [{mode}]");
    let block = panel(&title, &palette);
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    match app.submission_view {
        SubmissionView::Table => render_table(f, inner, &profile.submissions, &palette),
        SubmissionView::Cards => render_cards(f, inner, &profile.submissions, &palette),
    }
}

/// `"a, b"` or `"a, b +N more"`.
pub fn tag_summary(tags: &[String]) -> String {
    let shown = tags
        .iter()
        .take(TAGS_SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if tags.len() > TAGS_SHOWN {
        format!("{shown} +{} more", tags.len() - TAGS_SHOWN)
    } else {
        shown
    }
}

/// Problem label, e.g. `"1A Binary Search"`.
pub fn problem_label(s: &Submission) -> String {
    format!("{}{} {}", s.contest_id, s.problem.index, s.problem.name)
}

/// Single-line submission summary used by the activity feed.
pub fn submission_line(s: &Submission, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(problem_label(s), palette.text()),
        Span::styled(
            format!("  {}", s.verdict.label()),
            Style::default().fg(verdict_color(&s.verdict)),
        ),
        Span::styled(format!("  {}", s.programming_language), palette.dim()),
    ])
}

/// Lines of the user card.
pub fn user_lines(user: &CodeforcesUser, palette: &Palette) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(
                user.handle.clone(),
                rank_style(&user.rank).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", user.rank), rank_style(&user.rank)),
        ]),
        Line::from(vec![
            Span::styled("Rating: ", palette.dim()),
            Span::styled(format!("{}", user.rating), palette.text()),
            Span::styled("  Max: ", palette.dim()),
            Span::styled(format!("{}", user.max_rating), palette.text()),
        ]),
        Line::from(vec![
            Span::styled("Contribution: ", palette.dim()),
            Span::styled(format!("{}", user.contribution), palette.text()),
            Span::styled("  Friends of: ", palette.dim()),
            Span::styled(format!("{}", user.friend_of_count), palette.text()),
        ]),
        Line::from(Span::styled(
            format!("Registered {}", format_date(user.registration_time_seconds)),
            palette.dim(),
        )),
    ]
}

fn render_table(f: &mut Frame, area: Rect, subs: &[Submission], palette: &Palette) {
    let header = Row::new(["Problem", "Verdict", "Language", "Time", "Tags"])
        .style(palette.title());
    let rows = subs.iter().map(|s| {
        Row::new(vec![
            Cell::from(problem_label(s)),
            Cell::from(s.verdict.label()).style(Style::default().fg(verdict_color(&s.verdict))),
            Cell::from(s.programming_language.clone()),
            Cell::from(format!("{} ms", s.time_consumed_millis)),
            Cell::from(tag_summary(&s.problem.tags)),
        ])
        .style(palette.text())
    });
    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(22),
        Constraint::Percentage(12),
        Constraint::Percentage(10),
        Constraint::Percentage(26),
    ];
    f.render_widget(Table::new(rows, widths).header(header), area);
}

fn render_cards(f: &mut Frame, area: Rect, subs: &[Submission], palette: &Palette) {
    let fit = (area.height / CARD_HEIGHT) as usize;
    let shown = subs.len().min(fit);
    if shown == 0 {
        return;
    }
    let constraints = vec![Constraint::Length(CARD_HEIGHT); shown];
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (s, slot) in subs.iter().zip(slots.iter()) {
        let block = Block::default()
            .title(Span::styled(problem_label(s), palette.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(verdict_color(&s.verdict)));
        let body = vec![
            Line::from(vec![
                Span::styled(
                    s.verdict.label(),
                    Style::default().fg(verdict_color(&s.verdict)),
                ),
                Span::styled(
                    format!("  {}  {} ms", s.programming_language, s.time_consumed_millis),
                    palette.dim(),
                ),
            ]),
            Line::from(Span::styled(tag_summary(&s.problem.tags), palette.dim())),
        ];
        f.render_widget(Paragraph::new(body).block(block), *slot);
    }
}
