//! Delete confirmation overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{
    InputHint, calculate_overlay_area, render_hints, render_overlay_container,
};
use super::OverlayUpdate;
use crate::common::truncate_with_ellipsis;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// State for the delete confirmation overlay.
#[derive(Debug)]
pub struct ConfirmDeleteState {
    pub id: String,
    pub title: String,
}

impl ConfirmDeleteState {
    pub fn new(id: String, title: String) -> Self {
        Self { id, title }
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                OverlayUpdate::close().with_effects(vec![UiEffect::DeleteBook {
                    id: self.id.clone(),
                }])
            }
            KeyCode::Esc | KeyCode::Char('n') => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = calculate_overlay_area(area, 50, 6);
        let inner = render_overlay_container(frame, popup, "Delete Book", Color::Red);

        let question = format!(
            "Delete \"{}\"?",
            truncate_with_ellipsis(&self.title, inner.width.saturating_sub(10) as usize)
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::raw(question))),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "This cannot be undone.",
                Style::default().fg(Color::DarkGray),
            ))),
            Rect::new(inner.x, inner.y + 1, inner.width, 1),
        );

        let hints = [
            InputHint::new("y/Enter", "delete"),
            InputHint::new("n/Esc", "cancel"),
        ];
        render_hints(
            frame,
            Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1),
            &hints,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: confirming emits the delete effect and closes.
    #[test]
    fn test_confirm_emits_delete() {
        use crate::overlays::OverlayTransition;

        let mut state = ConfirmDeleteState::new("b1".to_string(), "Dune".to_string());
        let tui = crate::update::tests_support::bare_tui();

        let update = state.handle_key(&tui, KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE));
        assert!(matches!(update.transition, OverlayTransition::Close));
        match &update.effects[0] {
            UiEffect::DeleteBook { id } => assert_eq!(id, "b1"),
            other => panic!("expected DeleteBook, got {other:?}"),
        }
    }

    /// Test: cancel closes with no effects.
    #[test]
    fn test_cancel_is_effect_free() {
        use crate::overlays::OverlayTransition;

        let mut state = ConfirmDeleteState::new("b1".to_string(), "Dune".to_string());
        let tui = crate::update::tests_support::bare_tui();

        let update = state.handle_key(&tui, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert!(update.effects.is_empty());
    }
}
