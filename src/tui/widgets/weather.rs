//! # Widget: Weather
//!
//! ## Responsibility
//! Renders the current conditions for the searched city: temperature in
//! whole degrees Celsius, humidity, perceived temperature, and a condition
//! glyph.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{panel, render_pending};
use crate::models::WeatherReport;
use crate::tui::app::App;
use crate::tui::palette::{weather_glyph, Palette};

/// Shown before the first search.
pub const IDLE_TEXT: &str = "Search for a city to see the weather";

/// Renders the weather widget.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = Palette::for_appearance(app.appearance);
    let block = panel("Weather", &palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(report) = render_pending(f, inner, &app.weather, IDLE_TEXT, app) else {
        return;
    };
    f.render_widget(Paragraph::new(report_lines(report, &palette)), inner);
}

/// Text lines describing `report`.
pub fn report_lines(report: &WeatherReport, palette: &Palette) -> Vec<Line<'static>> {
    let (main, description) = report
        .primary_condition()
        .map(|c| (c.main.clone(), c.description.clone()))
        .unwrap_or_default();
    let (glyph, glyph_color) = weather_glyph(&main);

    vec![
        Line::from(Span::styled(report.name.clone(), palette.title())),
        Line::from(vec![
            Span::styled(format!("{glyph} "), Style::default().fg(glyph_color)),
            Span::styled(
                format!("{}°C", report.temp_celsius()),
                Style::default()
                    .fg(palette.fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {description}"), palette.dim()),
        ]),
        Line::from(vec![
            Span::styled("Humidity: ", palette.dim()),
            Span::styled(format!("{}%", report.main.humidity), palette.text()),
        ]),
        Line::from(vec![
            Span::styled("Feels like: ", palette.dim()),
            Span::styled(format!("{}°C", report.feels_like_celsius()), palette.text()),
        ]),
    ]
}
