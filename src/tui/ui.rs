//! # Module: TUI Rendering
//!
//! ## Responsibility
//! Orchestrates the dashboard layout: navigation header, search bar, the
//! active page, and the notice log. Handles the minimum size guard and help
//! overlay.
//!
//! ## Guarantees
//! - Minimum size guard displays a centered message if terminal is too small
//! - No panics during rendering regardless of terminal dimensions

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use super::app::{App, Route, MIN_COLS, MIN_ROWS};
use super::palette::Palette;
use super::widgets;

/// Rows reserved for the notice log.
const NOTICE_ROWS: u16 = 5;

/// Renders the complete dashboard UI into the given frame.
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    if size.width < MIN_COLS || size.height < MIN_ROWS {
        draw_too_small(f, size);
        return;
    }

    let palette = Palette::for_appearance(app.appearance);

    let title = format!(
        " devdash {:>width$} ",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        width = (size.width as usize).saturating_sub(14),
    );
    let footer = Line::from(Span::styled(
        " [1-4/Tab] navigate  [/] search  [t]heme  [v]iew  [h]elp  [q]uit ",
        palette.dim(),
    ));
    let outer_block = Block::default()
        .title(Span::styled(title, palette.title()))
        .title_bottom(footer)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(palette.text());

    let inner = outer_block.inner(size);
    f.render_widget(outer_block, size);

    let search_rows = if app.route.search_placeholder().is_some() {
        3
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Navigation
            Constraint::Length(search_rows), // Search bar
            Constraint::Min(6),              // Page body
            Constraint::Length(NOTICE_ROWS), // Notices
        ])
        .split(inner);

    draw_nav(f, chunks[0], app, &palette);
    widgets::search::render(f, chunks[1], app);

    match app.route {
        Route::Dashboard => draw_dashboard(f, chunks[2], app),
        Route::Codeforces => widgets::codeforces::render(f, chunks[2], app),
        Route::GitHub => widgets::github::render(f, chunks[2], app),
        Route::MockData => widgets::catalog::render(f, chunks[2], app),
        Route::NotFound => widgets::not_found::render(f, chunks[2], app),
    }

    widgets::notices::render(f, chunks[3], app);

    if app.show_help {
        draw_help_overlay(f, size, &palette);
    }
}

fn draw_nav(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let titles = Route::NAV
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{} {}", i + 1, r.title()));
    let tabs = Tabs::new(titles)
        .style(palette.dim())
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    let tabs = match Route::NAV.iter().position(|r| *r == app.route) {
        Some(i) => tabs.select(i),
        None => tabs,
    };
    f.render_widget(tabs, area);
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Weather
            Constraint::Min(4),    // Suggested developers
        ])
        .split(columns[0]);

    widgets::weather::render(f, left[0], app);
    widgets::developers::render(f, left[1], app);
    widgets::activity::render(f, columns[1], app);
}

/// Renders the "terminal too small" warning.
fn draw_too_small(f: &mut Frame, area: Rect) {
    let msg = format!("Terminal too small, resize to at least {MIN_COLS}x{MIN_ROWS}");
    let current_size = format!("Current size: {}x{}", area.width, area.height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            msg,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            current_size,
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(para, area);
}

/// Centered popup rect of at most `width`x`height` inside `area`.
fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(4));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

/// Renders the help overlay.
fn draw_help_overlay(f: &mut Frame, area: Rect, palette: &Palette) {
    let popup_area = popup_rect(area, 52, 17);
    f.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("    {k:<12}"), Style::default().fg(palette.accent)),
            Span::styled(what, palette.text()),
        ])
    };
    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  devdash", palette.title())),
        Line::from(""),
        key("1-4, Tab", "Switch page"),
        key("/", "Edit search"),
        key("Enter", "Submit search"),
        key("Esc", "Cancel edit, or quit"),
        key("t", "Toggle light/dark theme"),
        key("v", "Toggle view / activity tab"),
        key("h, ?", "Toggle this help"),
        key("q, Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to close",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(palette.text());

    f.render_widget(Paragraph::new(help_text).block(block), popup_area);
}
