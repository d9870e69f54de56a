//! Showcase key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::features::KeyOutcome;
use crate::state::TuiState;

/// Handles a key press while the showcase view is active.
pub fn handle_showcase_key(tui: &mut TuiState, key: KeyEvent) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if tui.showcase.searching {
        return handle_search_key(tui, key, ctrl);
    }

    match key.code {
        KeyCode::Char('/') => {
            tui.showcase.searching = true;
            KeyOutcome::none()
        }
        KeyCode::Char('f') => {
            tui.showcase.criteria.featured_only = !tui.showcase.criteria.featured_only;
            tui.showcase.selected = 0;
            KeyOutcome::none()
        }
        KeyCode::Char('c') => {
            let options = tui.category_options();
            tui.showcase.cycle_category(&options, true);
            KeyOutcome::none()
        }
        KeyCode::Char('C') => {
            let options = tui.category_options();
            tui.showcase.cycle_category(&options, false);
            KeyOutcome::none()
        }
        KeyCode::Char('x') => {
            tui.showcase.clear_filters();
            KeyOutcome::none()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            tui.showcase.selected = tui.showcase.selected.saturating_sub(1);
            KeyOutcome::none()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let visible = tui.showcase.visible_books(&tui.books).len();
            if tui.showcase.selected + 1 < visible {
                tui.showcase.selected += 1;
            }
            KeyOutcome::none()
        }
        _ => KeyOutcome::none(),
    }
}

fn handle_search_key(tui: &mut TuiState, key: KeyEvent, ctrl: bool) -> KeyOutcome {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            tui.showcase.searching = false;
        }
        KeyCode::Char('u') if ctrl => {
            tui.showcase.criteria.query.clear();
            tui.showcase.selected = 0;
        }
        KeyCode::Backspace => {
            tui.showcase.criteria.query.pop();
            tui.showcase.selected = 0;
        }
        KeyCode::Char(c) if !ctrl => {
            tui.showcase.criteria.query.push(c);
            tui.showcase.selected = 0;
        }
        _ => {}
    }
    KeyOutcome::none()
}
