//! Showcase view rendering: featured rail, filter bar, list, detail pane.

use bookverse_core::catalog::{self, Book};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::common::truncate_with_ellipsis;
use crate::state::TuiState;

/// Renders the showcase view into `area`.
pub fn render_showcase(frame: &mut Frame, tui: &TuiState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // featured rail
            Constraint::Length(1), // filter bar
            Constraint::Min(3),    // list + detail
        ])
        .split(area);

    render_featured_rail(frame, tui, chunks[0]);
    render_filter_bar(frame, tui, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    let visible = tui.showcase.visible_books(&tui.books);
    render_book_list(frame, tui, &visible, body[0]);
    render_detail_pane(frame, tui, &visible, body[1]);
}

/// Featured rail: always shown, independent of the active criteria.
fn render_featured_rail(frame: &mut Frame, tui: &TuiState, area: Rect) {
    let featured = catalog::featured_books(&tui.books);

    let line = if featured.is_empty() {
        Line::from(Span::styled(
            "No featured books",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = Vec::new();
        for (i, book) in featured.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled("★ ", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(book.title.clone()));
        }
        Line::from(spans)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Featured ")
        .border_style(Style::default().fg(Color::Yellow));
    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_filter_bar(frame: &mut Frame, tui: &TuiState, area: Rect) {
    let criteria = &tui.showcase.criteria;
    let mut spans = vec![
        Span::styled(" category: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            criteria.category.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  search: ", Style::default().fg(Color::DarkGray)),
    ];

    if tui.showcase.searching {
        spans.push(Span::styled(
            criteria.query.clone(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    } else if criteria.query.is_empty() {
        spans.push(Span::styled("(/)", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(criteria.query.clone()));
    }

    spans.push(Span::styled("  featured: ", Style::default().fg(Color::DarkGray)));
    spans.push(if criteria.featured_only {
        Span::styled("on", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("off", Style::default().fg(Color::DarkGray))
    });

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_book_list(frame: &mut Frame, tui: &TuiState, visible: &[&Book], area: Rect) {
    let title = format!(" Books ({}/{}) ", visible.len(), tui.books.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if visible.is_empty() {
        let message = if !tui.books_loaded {
            if tui.tasks.books.is_running() {
                "Loading books..."
            } else {
                "No books loaded. Press r to retry."
            }
        } else if tui.books.is_empty() {
            "The catalog is empty."
        } else {
            "No books match the current filters. Press x to clear them."
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = visible
        .iter()
        .map(|book| ListItem::new(book_line(book, width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(tui.showcase.selected.min(visible.len() - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn book_line(book: &Book, width: usize) -> Line<'static> {
    let star = if book.is_featured { "★ " } else { "  " };
    let label = format!("{star}{} — {}", book.title, book.author);
    let price = format!(" ${:.2}", book.price);
    let label_width = width.saturating_sub(price.len());

    Line::from(vec![
        Span::raw(truncate_with_ellipsis(&label, label_width)),
        Span::styled(price, Style::default().fg(Color::Green)),
    ])
}

fn render_detail_pane(frame: &mut Frame, tui: &TuiState, visible: &[&Book], area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");

    let Some(book) = visible.get(tui.showcase.selected.min(visible.len().saturating_sub(1)))
    else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Select a book to see details.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let cover = book
        .cover_image_url(tui.api.base_url())
        .unwrap_or_else(|| "(no cover)".to_string());

    let lines = vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("by {}", book.author),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
            Span::raw(book.category.clone()),
        ]),
        Line::from(vec![
            Span::styled("Price:    ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("${:.2}", book.price),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Cover:    ", Style::default().fg(Color::DarkGray)),
            Span::raw(cover),
        ]),
        Line::default(),
        Line::from(Span::raw(book.description.clone())),
        Line::default(),
        Line::from(Span::styled(
            format!("[ {} ]", book.cta_button_text),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
