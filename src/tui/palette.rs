//! # Module: Palette
//!
//! ## Responsibility
//! Map the resolved [`Appearance`] and domain values (ranks, verdicts,
//! languages, notice levels) to terminal colours.
//!
//! ## Guarantees
//! - Every function is total; unknown values fall back to gray

use ratatui::style::{Color, Modifier, Style};

use crate::controller::NoticeLevel;
use crate::models::Verdict;
use crate::theme::Appearance;

const ORANGE: Color = Color::Rgb(255, 140, 0);
const PURPLE: Color = Color::Rgb(170, 0, 170);
const PINK: Color = Color::Rgb(243, 75, 125);
const DARK_RED: Color = Color::Rgb(112, 21, 22);

/// Base colours for one appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Background fill.
    pub bg: Color,
    /// Primary text.
    pub fg: Color,
    /// Secondary text and idle borders.
    pub muted: Color,
    /// Titles, focused borders, the active tab.
    pub accent: Color,
}

impl Palette {
    /// Palette for `appearance`.
    pub fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Dark => Self {
                bg: Color::Reset,
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
            },
            Appearance::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
            },
        }
    }

    /// Plain text style.
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Secondary text style.
    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Bold accent style.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Panel border style.
    pub fn border(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

/// Colour of a Codeforces rank title.
pub fn rank_style(rank: &str) -> Style {
    let base = Style::default();
    match rank.to_ascii_lowercase().as_str() {
        "legendary grandmaster" => base.fg(Color::Red).add_modifier(Modifier::BOLD),
        "international grandmaster" => base.fg(Color::Red),
        "grandmaster" => base.fg(Color::LightRed),
        "international master" | "master" => base.fg(ORANGE),
        "candidate master" => base.fg(PURPLE),
        "expert" => base.fg(Color::Blue),
        "specialist" => base.fg(Color::Cyan),
        "pupil" => base.fg(Color::Green),
        _ => base.fg(Color::Gray),
    }
}

/// Colour of a submission verdict.
pub fn verdict_color(verdict: &Verdict) -> Color {
    match verdict {
        Verdict::Ok => Color::Green,
        Verdict::WrongAnswer => Color::Red,
        Verdict::TimeLimitExceeded => Color::Yellow,
        Verdict::Other => Color::Gray,
    }
}

/// Colour of a repository language.
pub fn language_color(language: &str) -> Color {
    match language {
        "JavaScript" => Color::Yellow,
        "TypeScript" => Color::Blue,
        "Python" => Color::Green,
        "CSS" => PURPLE,
        "HTML" => ORANGE,
        "Java" => Color::Red,
        "C++" => PINK,
        "Ruby" => DARK_RED,
        "Go" => Color::Cyan,
        _ => Color::Gray,
    }
}

/// Colour of a notice.
pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}

/// Glyph and colour for a weather condition string.
pub fn weather_glyph(condition: &str) -> (&'static str, Color) {
    let c = condition.to_ascii_lowercase();
    if c.contains("clear") {
        ("☀", Color::Yellow)
    } else if c.contains("rain") || c.contains("drizzle") {
        ("☂", Color::Blue)
    } else {
        ("☁", Color::Gray)
    }
}
