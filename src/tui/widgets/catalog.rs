//! # Widget: Product Catalog
//!
//! ## Responsibility
//! Renders the locally filtered product catalog as a card grid or a list,
//! with a result count, discounted prices, ratings, and stock.
//!
//! ## Guarantees
//! - An empty filter result renders a message instead of an empty grid
//! - Cards that do not fit the area are skipped, never squashed below
//!   [`CARD_HEIGHT`]

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::{panel, render_pending, truncate};
use crate::models::Product;
use crate::tui::app::{App, CatalogLayout};
use crate::tui::palette::Palette;

/// Cards per grid row.
pub const GRID_COLUMNS: usize = 3;

/// Height of one grid card, borders included.
pub const CARD_HEIGHT: u16 = 6;

/// Renders the catalog page body.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = Palette::for_appearance(app.appearance);
    let mode = match app.catalog_layout {
        CatalogLayout::Grid => "grid",
        CatalogLayout::List => "list",
    };
    let title = format!("Products [{mode}]");
    let block = panel(&title, &palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if render_pending(f, inner, &app.catalog, "Loading products...", app).is_none() {
        return;
    }

    let products = app.visible_products();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let mut header = vec![Span::styled(
        count_label(products.len()),
        palette.title(),
    )];
    if !app.catalog_filter.is_empty() {
        header.push(Span::styled(
            format!("  matching \"{}\"", app.catalog_filter),
            palette.dim(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

    if products.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No products match your search",
                palette.dim(),
            )),
            chunks[1],
        );
        return;
    }

    match app.catalog_layout {
        CatalogLayout::Grid => render_grid(f, chunks[1], &products, &palette),
        CatalogLayout::List => render_list(f, chunks[1], &products, &palette),
    }
}

/// `"{n} products found"`.
pub fn count_label(n: usize) -> String {
    format!("{n} products found")
}

/// Price spans: discounted price, struck list price and badge when discounted.
pub fn price_spans(p: &Product, palette: &Palette) -> Vec<Span<'static>> {
    let bold = Style::default()
        .fg(palette.fg)
        .add_modifier(Modifier::BOLD);
    if !p.has_discount() {
        return vec![Span::styled(format!("${:.2}", p.price), bold)];
    }
    vec![
        Span::styled(format!("${:.2}", p.discounted_price()), bold),
        Span::styled(
            format!(" ${:.2}", p.price),
            palette.dim().add_modifier(Modifier::CROSSED_OUT),
        ),
        Span::styled(
            format!(" -{:.0}%", p.discount_percentage),
            Style::default().fg(Color::Red),
        ),
    ]
}

fn detail_line(p: &Product, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("★ {:.1}", p.rating), Style::default().fg(Color::Yellow)),
        Span::styled(format!("  {} in stock", p.stock), palette.dim()),
    ])
}

fn render_grid(f: &mut Frame, area: Rect, products: &[&Product], palette: &Palette) {
    let rows_fit = (area.height / CARD_HEIGHT) as usize;
    let rows: Vec<&[&Product]> = products.chunks(GRID_COLUMNS).take(rows_fit).collect();
    if rows.is_empty() {
        return;
    }
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows.len()])
        .split(area);

    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);
        for (p, cell) in row.iter().zip(cols.iter()) {
            let width = cell.width.saturating_sub(2) as usize;
            let block = Block::default()
                .title(Span::styled(truncate(&p.title, width), palette.title()))
                .borders(Borders::ALL)
                .border_style(palette.border());
            let body = vec![
                Line::from(Span::styled(
                    format!("{} · {}", p.brand, p.category),
                    palette.dim(),
                )),
                Line::from(Span::styled(truncate(&p.description, width), palette.text())),
                Line::from(price_spans(p, palette)),
                detail_line(p, palette),
            ];
            f.render_widget(Paragraph::new(body).block(block), *cell);
        }
    }
}

fn render_list(f: &mut Frame, area: Rect, products: &[&Product], palette: &Palette) {
    let lines: Vec<Line<'static>> = products
        .iter()
        .flat_map(|p| {
            let mut first = vec![
                Span::styled(format!("{:<24}", truncate(&p.title, 24)), palette.text()),
                Span::styled(format!("{:<12}", truncate(&p.brand, 12)), palette.dim()),
            ];
            first.extend(price_spans(p, palette));
            [Line::from(first), detail_line(p, palette)]
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Appearance;

    fn product(price: f64, discount: f64) -> Product {
        Product {
            id: 1,
            title: "Widget".into(),
            description: "A widget".into(),
            price,
            discount_percentage: discount,
            rating: 4.5,
            stock: 3,
            brand: "Acme".into(),
            category: "tools".into(),
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(8), "8 products found");
        assert_eq!(count_label(0), "0 products found");
    }

    #[test]
    fn test_price_spans_without_discount() {
        let palette = Palette::for_appearance(Appearance::Dark);
        let spans = price_spans(&product(20.0, 0.0), &palette);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "$20.00");
    }

    #[test]
    fn test_price_spans_with_discount() {
        let palette = Palette::for_appearance(Appearance::Dark);
        let spans = price_spans(&product(100.0, 25.0), &palette);
        assert_eq!(spans[0].content, "$75.00");
        assert_eq!(spans[1].content, " $100.00");
        assert!(spans[1].style.add_modifier.contains(Modifier::CROSSED_OUT));
        assert_eq!(spans[2].content, " -25%");
    }
}
