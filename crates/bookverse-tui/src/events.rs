//! Events consumed by the reducer.
//!
//! Async handlers send these through the runtime inbox; the reducer is the
//! only place they mutate state.

use bookverse_core::api::ApiError;
use bookverse_core::api::auth::AuthResponse;
use bookverse_core::catalog::Book;

use crate::common::TaskId;
use crate::overlays::login::AuthMode;

/// Top-level event fed into `update()`.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (spinner animation, toast expiry).
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// Login/register round trip finished.
    Auth(AuthUiEvent),
    /// Book directory round trip finished.
    Book(BookUiEvent),
}

/// Failure payload for request events.
///
/// Carries the display message plus whether the backend rejected the
/// credential (401); the reducer reverts the session on that flag.
#[derive(Debug, Clone)]
pub struct RequestError {
    pub message: String,
    pub unauthorized: bool,
}

impl From<ApiError> for RequestError {
    fn from(err: ApiError) -> Self {
        Self {
            message: err.message(),
            unauthorized: err.is_unauthorized(),
        }
    }
}

#[derive(Debug)]
pub enum AuthUiEvent {
    Completed {
        task: TaskId,
        mode: AuthMode,
        result: Result<AuthResponse, RequestError>,
    },
}

#[derive(Debug)]
pub enum BookUiEvent {
    ListLoaded {
        task: TaskId,
        result: Result<Vec<Book>, RequestError>,
    },
    CategoriesLoaded {
        task: TaskId,
        result: Result<Vec<String>, RequestError>,
    },
    /// Create (editing = None) or update (editing = Some(id)) finished.
    Saved {
        task: TaskId,
        editing: Option<String>,
        result: Result<Book, RequestError>,
    },
    Deleted {
        task: TaskId,
        id: String,
        result: Result<(), RequestError>,
    },
}
