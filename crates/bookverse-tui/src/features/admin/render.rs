//! Admin panel rendering.

use bookverse_core::catalog::Book;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::common::truncate_with_ellipsis;
use crate::state::TuiState;

/// Renders the admin panel into `area`.
pub fn render_admin(frame: &mut Frame, tui: &TuiState, area: Rect) {
    let title = format!(" Admin — {} books ", tui.books.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Magenta));

    if tui.books.is_empty() {
        let message = if tui.tasks.books.is_running() {
            "Loading books..."
        } else {
            "The catalog is empty. Press n to add a book."
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
    let items: Vec<ListItem> = tui
        .books
        .iter()
        .map(|book| ListItem::new(admin_line(book, width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Magenta)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(tui.admin.selected.min(tui.books.len() - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn admin_line(book: &Book, width: usize) -> Line<'static> {
    let star = if book.is_featured { "★" } else { " " };
    let price = format!("${:>8.2}", book.price);
    let fixed = price.len() + 2 /* star + space */ + 1;
    let category_width = (width / 4).min(12);
    let label_width = width
        .saturating_sub(fixed)
        .saturating_sub(category_width + 2);

    let label = format!("{} — {}", book.title, book.author);
    Line::from(vec![
        Span::styled(format!("{star} "), Style::default().fg(Color::Yellow)),
        Span::raw(format!(
            "{:<label_width$}",
            truncate_with_ellipsis(&label, label_width)
        )),
        Span::styled(
            format!("  {:<category_width$}", truncate_with_ellipsis(&book.category, category_width)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(price, Style::default().fg(Color::Green)),
    ])
}
