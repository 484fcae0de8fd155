//! # Widget: GitHub Explorer
//!
//! ## Responsibility
//! Renders a GitHub profile card (name, login, bio, location, company, blog,
//! follower counts, join date) above the user's repositories with star and
//! fork counts and a language swatch.
//!
//! ## NOT Responsible For
//! - Fetching; the profile arrives through [`App::github`]

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use super::{panel, render_pending, truncate};
use crate::models::{GitHubRepo, GitHubUser};
use crate::tui::app::App;
use crate::tui::palette::{language_color, Palette};

/// Shown before the first search.
pub const IDLE_TEXT: &str = "Search for a GitHub user to see their profile";

/// Renders the GitHub page body.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = Palette::for_appearance(app.appearance);

    let Some(profile) = render_pending(f, area, &app.github, IDLE_TEXT, app) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(area);

    let card = panel("Profile", &palette);
    let card_inner = card.inner(chunks[0]);
    f.render_widget(card, chunks[0]);
    f.render_widget(
        Paragraph::new(profile_lines(&profile.user, &palette)).wrap(Wrap { trim: true }),
        card_inner,
    );

    let title = format!("Repositories ({})", profile.repos.len());
    let repos = panel(&title, &palette);
    let repos_inner = repos.inner(chunks[1]);
    f.render_widget(repos, chunks[1]);
    let width = repos_inner.width as usize;
    let lines: Vec<Line<'static>> = profile
        .repos
        .iter()
        .flat_map(|r| repo_lines(r, &palette, width))
        .collect();
    f.render_widget(Paragraph::new(lines), repos_inner);
}

/// Lines of the profile card.
pub fn profile_lines(user: &GitHubUser, palette: &Palette) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(user.name.clone(), palette.title()),
            Span::styled(format!("  @{}", user.login), palette.dim()),
        ]),
        Line::from(Span::styled(user.bio.clone(), palette.text())),
        Line::from(vec![
            Span::styled("Location: ", palette.dim()),
            Span::styled(user.location.clone(), palette.text()),
            Span::styled("   Company: ", palette.dim()),
            Span::styled(user.company.clone(), palette.text()),
        ]),
        Line::from(vec![
            Span::styled("Blog: ", palette.dim()),
            Span::styled(
                user.blog_href(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("{}", user.followers), palette.text()),
            Span::styled(" followers  ", palette.dim()),
            Span::styled(format!("{}", user.following), palette.text()),
            Span::styled(" following  ", palette.dim()),
            Span::styled(format!("{}", user.public_repos), palette.text()),
            Span::styled(" repos", palette.dim()),
        ]),
        Line::from(Span::styled(
            format!("Joined {}", user.created_at.format("%B %Y")),
            palette.dim(),
        )),
    ]
}

/// Two lines per repository: name with counts, then description.
pub fn repo_lines(repo: &GitHubRepo, palette: &Palette, width: usize) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(
                repo.name.clone(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ● ", Style::default().fg(language_color(&repo.language))),
            Span::styled(repo.language.clone(), palette.text()),
            Span::styled(
                format!(
                    "  ★ {}  ⑂ {}  updated {}",
                    repo.stargazers_count,
                    repo.forks_count,
                    repo.updated_at.format("%Y-%m-%d")
                ),
                palette.dim(),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {}", truncate(&repo.description, width.saturating_sub(2))),
            palette.dim(),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::theme::Appearance;
    use chrono::Utc;

    fn flat(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_profile_lines_show_counts_and_blog() {
        let profile = fixtures::github_profile("octocat", Utc::now());
        let out = flat(&profile_lines(&profile.user, &Palette::for_appearance(Appearance::Dark)));
        assert!(out.contains("Octocat  @octocat"));
        assert!(out.contains("150 followers"));
        assert!(out.contains("https://example.com"));
    }

    #[test]
    fn test_repo_language_swatch_coloured() {
        let profile = fixtures::github_profile("octocat", Utc::now());
        let lines = repo_lines(
            &profile.repos[1],
            &Palette::for_appearance(Appearance::Dark),
            80,
        );
        assert_eq!(lines[0].spans[1].style.fg, Some(language_color("TypeScript")));
        assert!(flat(&lines).contains("★ 85"));
    }

    #[test]
    fn test_repo_description_truncated_to_width() {
        let profile = fixtures::github_profile("octocat", Utc::now());
        let lines = repo_lines(
            &profile.repos[3],
            &Palette::for_appearance(Appearance::Dark),
            12,
        );
        assert_eq!(lines[1].spans[0].content.chars().count(), 12);
    }
}
