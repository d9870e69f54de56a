//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard
//! input. Each overlay is self-contained: it owns its state, key handler,
//! and render function.
//!
//! - `login.rs`: sign-in / register dialog
//! - `book_form.rs`: create/edit book form
//! - `confirm_delete.rs`: delete confirmation
//! - `render_utils.rs`: shared rendering utilities for overlays

pub mod book_form;
pub mod confirm_delete;
pub mod login;
pub mod render_utils;

pub use book_form::BookFormState;
pub use confirm_delete::ConfirmDeleteState;
use crossterm::event::KeyEvent;
pub use login::LoginState;
use ratatui::Frame;
use ratatui::layout::Rect;

use bookverse_core::catalog::Book;

use crate::effects::UiEffect;
use crate::state::TuiState;

/// Requests to open a new overlay.
#[derive(Debug)]
pub enum OverlayRequest {
    Login,
    BookForm { editing: Option<Book> },
    ConfirmDelete { id: String, title: String },
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            effects: Vec::new(),
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

/// The active modal overlay.
#[derive(Debug)]
pub enum Overlay {
    Login(LoginState),
    BookForm(BookFormState),
    ConfirmDelete(ConfirmDeleteState),
}

impl Overlay {
    /// Builds the overlay for a request.
    pub fn open(request: OverlayRequest, tui: &TuiState) -> Self {
        match request {
            OverlayRequest::Login => Overlay::Login(LoginState::default()),
            OverlayRequest::BookForm { editing } => match editing {
                Some(book) => Overlay::BookForm(BookFormState::open_edit(&book)),
                None => Overlay::BookForm(BookFormState::open_new(&tui.categories)),
            },
            OverlayRequest::ConfirmDelete { id, title } => {
                Overlay::ConfirmDelete(ConfirmDeleteState::new(id, title))
            }
        }
    }

    /// Routes a key press to the overlay's handler.
    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Login(state) => state.handle_key(tui, key),
            Overlay::BookForm(state) => state.handle_key(tui, key),
            Overlay::ConfirmDelete(state) => state.handle_key(tui, key),
        }
    }

    /// Renders the overlay on top of the main view.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Login(state) => state.render(frame, area),
            Overlay::BookForm(state) => state.render(frame, area),
            Overlay::ConfirmDelete(state) => state.render(frame, area),
        }
    }
}
