//! Shared rendering utilities for overlays.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::truncate_with_ellipsis;

/// Calculates the area for an overlay, centered in the frame.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let overlay_x = area.x + (area.width.saturating_sub(width)) / 2;
    let overlay_y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(overlay_x, overlay_y, width, height)
}

/// Renders the base container for an overlay (clears background, draws
/// border and title) and returns the inner area.
pub fn render_overlay_container(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);

    Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// A labeled single-line input field inside an overlay.
pub struct FieldLine<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub focused: bool,
    /// Replace the value with bullets (password entry).
    pub masked: bool,
}

/// Renders a "label: value█" field row.
pub fn render_field_line(frame: &mut Frame, area: Rect, field: &FieldLine<'_>) {
    let label_style = if field.focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let shown = if field.masked {
        "•".repeat(field.value.chars().count())
    } else {
        field.value.to_string()
    };
    let max_width = area.width.saturating_sub(field.label.len() as u16 + 3) as usize;

    let mut spans = vec![
        Span::styled(format!("{:<12}", field.label), label_style),
        Span::raw(truncate_with_ellipsis(&shown, max_width)),
    ];
    if field.focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Keyboard hint (key + action) for the overlay footer.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders the hint row at the bottom of an overlay body.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint<'_>]) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            hint.key,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders an error (red) or help (gray) line.
pub fn render_status_line(frame: &mut Frame, area: Rect, error: Option<&str>, help: &str) {
    let (text, style) = match error {
        Some(message) => (message, Style::default().fg(Color::Red)),
        None => (help, Style::default().fg(Color::DarkGray)),
    };
    let width = area.width as usize;
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            truncate_with_ellipsis(text, width),
            style,
        ))),
        area,
    );
}
