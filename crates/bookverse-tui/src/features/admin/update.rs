//! Admin panel key handling.

use crossterm::event::{KeyCode, KeyEvent};

use crate::features::KeyOutcome;
use crate::overlays::OverlayRequest;
use crate::state::TuiState;

/// Handles a key press while the admin panel is active.
///
/// The panel itself only selects and dispatches; the actual mutations run
/// through the book form and delete confirmation overlays.
pub fn handle_admin_key(tui: &mut TuiState, key: KeyEvent) -> KeyOutcome {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            tui.admin.selected = tui.admin.selected.saturating_sub(1);
            KeyOutcome::none()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if tui.admin.selected + 1 < tui.books.len() {
                tui.admin.selected += 1;
            }
            KeyOutcome::none()
        }
        KeyCode::Char('n') => KeyOutcome::open(OverlayRequest::BookForm { editing: None }),
        KeyCode::Char('e') | KeyCode::Enter => match tui.books.get(tui.admin.selected) {
            Some(book) => KeyOutcome::open(OverlayRequest::BookForm {
                editing: Some(book.clone()),
            }),
            None => KeyOutcome::none(),
        },
        KeyCode::Char('d') => match tui.books.get(tui.admin.selected) {
            Some(book) => KeyOutcome::open(OverlayRequest::ConfirmDelete {
                id: book.id.clone(),
                title: book.title.clone(),
            }),
            None => KeyOutcome::none(),
        },
        _ => KeyOutcome::none(),
    }
}
