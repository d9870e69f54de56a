//! Effect handler implementations.
//!
//! Each handler runs one backend round trip on a spawned task and returns
//! the event the reducer consumes. Errors are folded into the event; a
//! handler never panics and never bypasses the inbox.

use bookverse_core::api::{ApiClient, auth, books};
use bookverse_core::catalog::{BookDraft, Role};

use crate::common::TaskId;
use crate::events::{AuthUiEvent, BookUiEvent, UiEvent};
use crate::overlays::login::AuthMode;

pub async fn load_books(task: TaskId, api: &ApiClient) -> UiEvent {
    let result = books::list_books(api).await.map_err(Into::into);
    UiEvent::Book(BookUiEvent::ListLoaded { task, result })
}

pub async fn load_categories(task: TaskId, api: &ApiClient) -> UiEvent {
    let result = books::list_categories(api).await.map_err(Into::into);
    UiEvent::Book(BookUiEvent::CategoriesLoaded { task, result })
}

pub async fn submit_auth(
    task: TaskId,
    api: &ApiClient,
    mode: AuthMode,
    email: &str,
    password: &str,
    name: &str,
) -> UiEvent {
    let result = match mode {
        AuthMode::Login => auth::login(api, email, password).await,
        // Registration always sends the plain user role; privilege
        // elevation is the backend's call.
        AuthMode::Register => auth::register(api, email, password, name, Role::User).await,
    }
    .map_err(Into::into);

    UiEvent::Auth(AuthUiEvent::Completed { task, mode, result })
}

pub async fn save_book(
    task: TaskId,
    api: &ApiClient,
    editing: Option<String>,
    draft: &BookDraft,
) -> UiEvent {
    let result = match &editing {
        Some(id) => books::update_book(api, id, draft).await,
        None => books::create_book(api, draft).await,
    }
    .map_err(Into::into);

    UiEvent::Book(BookUiEvent::Saved {
        task,
        editing,
        result,
    })
}

pub async fn delete_book(task: TaskId, api: &ApiClient, id: &str) -> UiEvent {
    let result = books::delete_book(api, id).await.map_err(Into::into);
    UiEvent::Book(BookUiEvent::Deleted {
        task,
        id: id.to_string(),
        result,
    })
}
