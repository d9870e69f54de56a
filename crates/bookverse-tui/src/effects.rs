//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent request spawning only; the reducer never performs I/O
//! itself. Requests are fire-and-forget round trips with no cancellation
//! tokens; stale results are dropped by the task-id check instead.

use bookverse_core::catalog::BookDraft;

use crate::overlays::login::AuthMode;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Fetch the book list.
    LoadBooks,
    /// Fetch the category list.
    LoadCategories,
    /// Run a login or register round trip.
    SubmitAuth {
        mode: AuthMode,
        email: String,
        password: String,
        name: String,
    },
    /// Create (editing = None) or update (editing = Some(id)) a book.
    SaveBook {
        editing: Option<String>,
        draft: BookDraft,
    },
    /// Delete a book by id.
    DeleteBook { id: String },
}
