//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a
//! ratatui Frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use bookverse_core::session::SessionStatus;

use crate::common::{ToastLevel, truncate_with_ellipsis};
use crate::features::{admin, showcase};
use crate::state::{AppState, View};

/// Height of the header row.
const HEADER_HEIGHT: u16 = 1;

/// Height of the status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for the status line animation.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    render_header(app, frame, chunks[0]);

    match app.tui.view {
        View::Showcase => showcase::render_showcase(frame, &app.tui, chunks[1]),
        View::Admin => admin::render_admin(frame, &app.tui, chunks[1]),
    }

    render_status_line(app, frame, chunks[2]);

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area);
    }
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        " BookVerse ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    let view_label = match app.tui.view {
        View::Showcase => "Showcase",
        View::Admin => "Admin",
    };
    spans.push(Span::styled(
        format!("· {view_label} "),
        Style::default().fg(Color::DarkGray),
    ));

    if app.tui.session.is_admin() {
        spans.push(Span::styled(
            "(Tab: switch view)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    // Toasts take priority over the identity line while they last.
    if let Some(toast) = &app.tui.toast {
        let style = match toast.level {
            ToastLevel::Info => Style::default().fg(Color::Green),
            ToastLevel::Error => Style::default().fg(Color::Red),
        };
        let text = truncate_with_ellipsis(&toast.text, area.width.saturating_sub(2) as usize);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!(" {text}"), style))),
            area,
        );
        return;
    }

    let mut spans = Vec::new();

    if app.tui.tasks.any_running() {
        let spinner = SPINNER_FRAMES[app.tui.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!(" {spinner} "),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::raw(" "));
    }

    match app.tui.session.status() {
        SessionStatus::Authenticated => {
            let user = app.tui.session.current_user();
            let identity = user.map_or_else(String::new, |u| {
                format!("{} ({})", u.email, u.role.as_str())
            });
            spans.push(Span::styled(identity, Style::default().fg(Color::Green)));
            spans.push(Span::styled(
                "  o sign out",
                Style::default().fg(Color::DarkGray),
            ));
        }
        SessionStatus::Anonymous => {
            spans.push(Span::styled("anonymous", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                "  l sign in",
                Style::default().fg(Color::DarkGray),
            ));
        }
        SessionStatus::Initializing => {
            // Not reachable: the session gate resolves before the first
            // frame, but render something sane anyway.
            spans.push(Span::styled("starting...", Style::default().fg(Color::DarkGray)));
        }
    }

    spans.push(Span::styled(
        "  / search  f featured  c category  r refresh  q quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
