//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: SessionStore   (auth state machine, injected)
//! │   ├── books / categories      (directory snapshot)
//! │   ├── showcase / admin        (per-view state)
//! │   └── tasks / toast / spinner (request bookkeeping, notifications)
//! └── overlay: Option<Overlay>    (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay key
//! handlers can borrow both without conflicts.

use std::sync::Arc;

use bookverse_core::api::ApiClient;
use bookverse_core::catalog::{self, Book};
use bookverse_core::session::SessionStore;

use crate::common::{TaskSeq, Tasks, Toast};
use crate::features::admin::AdminState;
use crate::features::showcase::ShowcaseState;
use crate::overlays::Overlay;

/// Which main view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Read-only browsing with the filter bar.
    Showcase,
    /// Mutation-capable panel, gated to admins.
    Admin,
}

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(api: Arc<ApiClient>, session: SessionStore) -> Self {
        Self {
            tui: TuiState::new(api, session),
            overlay: None,
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Active main view.
    pub view: View,
    /// Backend client shared with spawned request tasks.
    pub api: Arc<ApiClient>,
    /// Authentication state machine (already initialized at startup).
    pub session: SessionStore,
    /// Authoritative book list snapshot, server order preserved.
    pub books: Vec<Book>,
    /// Whether an initial book list ever arrived (loading vs. empty state).
    pub books_loaded: bool,
    /// Server-side category strings (no "all" sentinel).
    pub categories: Vec<String>,
    /// Showcase view state (criteria, selection).
    pub showcase: ShowcaseState,
    /// Admin view state (selection).
    pub admin: AdminState,
    /// Task id generator for spawned requests.
    pub task_seq: TaskSeq,
    /// Per-kind request slots.
    pub tasks: Tasks,
    /// Transient status notification.
    pub toast: Option<Toast>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(api: Arc<ApiClient>, session: SessionStore) -> Self {
        Self {
            should_quit: false,
            view: View::Showcase,
            api,
            session,
            books: Vec::new(),
            books_loaded: false,
            categories: Vec::new(),
            showcase: ShowcaseState::default(),
            admin: AdminState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            toast: None,
            spinner_frame: 0,
        }
    }

    /// Category choices for the filter bar: "all" + server categories.
    pub fn category_options(&self) -> Vec<String> {
        catalog::category_options(&self.categories)
    }

    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    /// Replaces a book in the snapshot by id (after an update).
    pub fn replace_book(&mut self, book: Book) {
        if let Some(slot) = self.books.iter_mut().find(|b| b.id == book.id) {
            *slot = book;
        }
    }

    /// Removes a book from the snapshot by id (after a delete).
    pub fn remove_book(&mut self, id: &str) {
        self.books.retain(|b| b.id != id);
        self.admin.clamp_selection(self.books.len());
    }
}
