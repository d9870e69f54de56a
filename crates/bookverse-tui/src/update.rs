//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Session transitions, optimistic list
//! patching, and the stale-result liveness checks all live in this module;
//! it is the single serialization point for state, so no locking is needed
//! anywhere else.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::Toast;
use crate::effects::UiEffect;
use crate::events::{AuthUiEvent, BookUiEvent, RequestError, UiEvent};
use crate::features::{KeyOutcome, admin, showcase};
use crate::overlays::login::AuthMode;
use crate::overlays::{Overlay, OverlayRequest, OverlayTransition};
use crate::state::{AppState, View};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            if let Some(toast) = app.tui.toast.as_mut() {
                toast.ticks_left = toast.ticks_left.saturating_sub(1);
                if toast.ticks_left == 0 {
                    app.tui.toast = None;
                }
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Auth(auth_event) => handle_auth_event(app, auth_event),
        UiEvent::Book(book_event) => handle_book_event(app, book_event),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        // Resizes redraw on the next frame; mouse input is not captured.
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    // Overlays take over keyboard input entirely.
    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(&app.tui, key);
        if matches!(update.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return update.effects;
    }

    handle_global_key(app, key)
}

fn handle_global_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let searching = app.tui.view == View::Showcase && app.tui.showcase.searching;

    // Global chords first; plain characters fall through to the views while
    // the search input is capturing text.
    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.tui.should_quit = true;
            return vec![];
        }
        KeyCode::Char('q') if !searching => {
            app.tui.should_quit = true;
            return vec![];
        }
        KeyCode::Char('r') if !searching => {
            return vec![UiEffect::LoadBooks, UiEffect::LoadCategories];
        }
        KeyCode::Char('l') if !searching && !app.tui.session.is_authenticated() => {
            app.overlay = Some(Overlay::open(OverlayRequest::Login, &app.tui));
            return vec![];
        }
        KeyCode::Char('o') if !searching && app.tui.session.is_authenticated() => {
            app.tui.session.logout();
            leave_admin(app);
            app.tui.show_toast(Toast::info("Signed out"));
            return vec![];
        }
        KeyCode::Tab if !searching => {
            toggle_view(app);
            return vec![];
        }
        _ => {}
    }

    let outcome = match app.tui.view {
        View::Showcase => showcase::handle_showcase_key(&mut app.tui, key),
        View::Admin => admin::handle_admin_key(&mut app.tui, key),
    };
    apply_outcome(app, outcome)
}

fn apply_outcome(app: &mut AppState, outcome: KeyOutcome) -> Vec<UiEffect> {
    if let Some(request) = outcome.open {
        app.overlay = Some(Overlay::open(request, &app.tui));
    }
    outcome.effects
}

fn toggle_view(app: &mut AppState) {
    match app.tui.view {
        View::Showcase if app.tui.session.is_admin() => {
            app.tui.view = View::Admin;
            app.tui.admin.clamp_selection(app.tui.books.len());
        }
        View::Showcase => {
            app.tui
                .show_toast(Toast::error("Admin panel requires an admin account"));
        }
        View::Admin => app.tui.view = View::Showcase,
    }
}

/// Drops back to the showcase when admin privileges disappear.
fn leave_admin(app: &mut AppState) {
    if app.tui.view == View::Admin {
        app.tui.view = View::Showcase;
    }
}

fn handle_auth_event(app: &mut AppState, event: AuthUiEvent) -> Vec<UiEffect> {
    let AuthUiEvent::Completed { task, mode, result } = event;

    if !app.tui.tasks.auth.finish_if_active(task) {
        // Superseded request; drop the result.
        return vec![];
    }

    match result {
        Ok(response) => {
            let email = response.user.email.clone();
            app.tui.session.apply_auth(response);
            if matches!(app.overlay, Some(Overlay::Login(_))) {
                app.overlay = None;
            }
            let verb = match mode {
                AuthMode::Login => "Signed in as",
                AuthMode::Register => "Registered as",
            };
            app.tui.show_toast(Toast::info(format!("{verb} {email}")));
            vec![]
        }
        Err(err) => {
            // The session state is untouched on failure; only the dialog
            // (or, if it was closed meanwhile, the status line) reports it.
            if let Some(Overlay::Login(login)) = app.overlay.as_mut() {
                login.fail(err.message);
            } else {
                app.tui.show_toast(Toast::error(err.message));
            }
            vec![]
        }
    }
}

fn handle_book_event(app: &mut AppState, event: BookUiEvent) -> Vec<UiEffect> {
    match event {
        BookUiEvent::ListLoaded { task, result } => {
            if !app.tui.tasks.books.finish_if_active(task) {
                return vec![];
            }
            match result {
                Ok(books) => {
                    app.tui.books = books;
                    app.tui.books_loaded = true;
                    let visible = app.tui.showcase.visible_books(&app.tui.books).len();
                    app.tui.showcase.clamp_selection(visible);
                    app.tui.admin.clamp_selection(app.tui.books.len());
                }
                Err(err) => {
                    // Keep whatever snapshot we had; an empty state renders
                    // only if nothing was ever loaded.
                    fail_toast(app, err);
                }
            }
            vec![]
        }
        BookUiEvent::CategoriesLoaded { task, result } => {
            if !app.tui.tasks.categories.finish_if_active(task) {
                return vec![];
            }
            match result {
                Ok(categories) => app.tui.categories = categories,
                Err(err) => fail_toast(app, err),
            }
            vec![]
        }
        BookUiEvent::Saved {
            task,
            editing,
            result,
        } => {
            if !app.tui.tasks.save.finish_if_active(task) {
                return vec![];
            }
            match result {
                Ok(book) => {
                    let title = book.title.clone();
                    match editing {
                        // Optimistic snapshot patch: create prepends,
                        // update replaces by id. No re-fetch.
                        None => app.tui.books.insert(0, book),
                        Some(_) => app.tui.replace_book(book),
                    }
                    app.tui.books_loaded = true;
                    if matches!(app.overlay, Some(Overlay::BookForm(_))) {
                        app.overlay = None;
                    }
                    app.tui.show_toast(Toast::info(format!("Saved \"{title}\"")));
                }
                Err(err) => {
                    let unauthorized = err.unauthorized;
                    if let Some(Overlay::BookForm(form)) = app.overlay.as_mut() {
                        form.fail(err.message.clone());
                    } else {
                        app.tui.show_toast(Toast::error(err.message.clone()));
                    }
                    if unauthorized {
                        expire_session(app);
                    }
                }
            }
            vec![]
        }
        BookUiEvent::Deleted { task, id, result } => {
            if !app.tui.tasks.delete.finish_if_active(task) {
                return vec![];
            }
            match result {
                Ok(()) => {
                    app.tui.remove_book(&id);
                    app.tui.show_toast(Toast::info("Book deleted"));
                }
                Err(err) => fail_toast(app, err),
            }
            vec![]
        }
    }
}

fn fail_toast(app: &mut AppState, err: RequestError) {
    let unauthorized = err.unauthorized;
    app.tui.show_toast(Toast::error(err.message));
    if unauthorized {
        expire_session(app);
    }
}

/// An authenticated request came back 401: revert to Anonymous.
fn expire_session(app: &mut AppState) {
    if app.tui.session.is_authenticated() {
        app.tui.session.invalidate();
        leave_admin(app);
        app.tui
            .show_toast(Toast::error("Session expired — sign in again"));
    }
}


#[cfg(test)]
mod tests {
    use super::tests_support::{bare_tui, sample_book};
    use super::*;
    use crate::common::TaskId;
    use crate::state::AppState;

    fn app() -> AppState {
        AppState {
            tui: bare_tui(),
            overlay: None,
        }
    }

    fn loaded_app() -> AppState {
        let mut app = app();
        app.tui.books = vec![
            sample_book("b1", "Dune", "Fiction", true),
            sample_book("b2", "Atlas", "Business", false),
        ];
        app.tui.books_loaded = true;
        app
    }

    fn list_event(task: TaskId, books: Vec<bookverse_core::catalog::Book>) -> UiEvent {
        UiEvent::Book(BookUiEvent::ListLoaded {
            task,
            result: Ok(books),
        })
    }

    /// Test: a stale list result is discarded by the liveness check.
    #[test]
    fn test_stale_list_result_discarded() {
        let mut app = app();

        let stale = app.tui.task_seq.next_id();
        app.tui.tasks.books.on_started(stale);
        let current = app.tui.task_seq.next_id();
        app.tui.tasks.books.on_started(current);

        update(&mut app, list_event(stale, vec![sample_book(
            "b1", "Dune", "Fiction", true,
        )]));
        assert!(app.tui.books.is_empty());
        assert!(!app.tui.books_loaded);

        update(&mut app, list_event(current, vec![sample_book(
            "b1", "Dune", "Fiction", true,
        )]));
        assert_eq!(app.tui.books.len(), 1);
        assert!(app.tui.books_loaded);
    }

    /// Test: a failed refresh keeps the previous snapshot and toasts.
    #[test]
    fn test_failed_refresh_keeps_snapshot() {
        let mut app = loaded_app();
        let task = app.tui.task_seq.next_id();
        app.tui.tasks.books.on_started(task);

        update(
            &mut app,
            UiEvent::Book(BookUiEvent::ListLoaded {
                task,
                result: Err(RequestError {
                    message: "network error".to_string(),
                    unauthorized: false,
                }),
            }),
        );

        assert_eq!(app.tui.books.len(), 2);
        assert!(app.tui.toast.is_some());
    }

    /// Test: create prepends, update replaces by id, delete removes by id.
    #[test]
    fn test_optimistic_snapshot_patching() {
        let mut app = loaded_app();

        // Create prepends.
        let task = app.tui.task_seq.next_id();
        app.tui.tasks.save.on_started(task);
        update(
            &mut app,
            UiEvent::Book(BookUiEvent::Saved {
                task,
                editing: None,
                result: Ok(sample_book("b3", "New", "Poetry", false)),
            }),
        );
        assert_eq!(app.tui.books[0].id, "b3");
        assert_eq!(app.tui.books.len(), 3);

        // Update replaces in place.
        let task = app.tui.task_seq.next_id();
        app.tui.tasks.save.on_started(task);
        let mut updated = sample_book("b1", "Dune (2nd ed)", "Fiction", true);
        updated.price = 19.99;
        update(
            &mut app,
            UiEvent::Book(BookUiEvent::Saved {
                task,
                editing: Some("b1".to_string()),
                result: Ok(updated),
            }),
        );
        assert_eq!(app.tui.books.len(), 3);
        assert_eq!(app.tui.books[1].title, "Dune (2nd ed)");

        // Delete removes.
        let task = app.tui.task_seq.next_id();
        app.tui.tasks.delete.on_started(task);
        update(
            &mut app,
            UiEvent::Book(BookUiEvent::Deleted {
                task,
                id: "b2".to_string(),
                result: Ok(()),
            }),
        );
        assert_eq!(app.tui.books.len(), 2);
        assert!(app.tui.books.iter().all(|b| b.id != "b2"));
    }

    /// Test: a 401 on a mutation expires the session and leaves admin.
    #[test]
    fn test_unauthorized_mutation_expires_session() {
        use bookverse_core::api::auth::AuthResponse;
        use bookverse_core::catalog::{Role, User};

        let mut app = loaded_app();
        app.tui.session.apply_auth(AuthResponse {
            access_token: "tok".to_string(),
            token_type: "bearer".to_string(),
            user: User {
                id: "u1".to_string(),
                email: "admin@x.com".to_string(),
                name: "Admin".to_string(),
                role: Role::Admin,
                created_at: None,
            },
        });
        app.tui.view = View::Admin;

        let task = app.tui.task_seq.next_id();
        app.tui.tasks.save.on_started(task);
        update(
            &mut app,
            UiEvent::Book(BookUiEvent::Saved {
                task,
                editing: None,
                result: Err(RequestError {
                    message: "Invalid authentication credentials".to_string(),
                    unauthorized: true,
                }),
            }),
        );

        assert!(!app.tui.session.is_authenticated());
        assert_eq!(app.tui.view, View::Showcase);
    }

    /// Test: search typing updates the criteria and resets selection.
    #[test]
    fn test_search_typing_updates_criteria() {
        let mut app = loaded_app();
        app.tui.showcase.selected = 1;

        let press = |code| UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        update(&mut app, press(KeyCode::Char('/')));
        assert!(app.tui.showcase.searching);

        update(&mut app, press(KeyCode::Char('a')));
        update(&mut app, press(KeyCode::Char('t')));
        assert_eq!(app.tui.showcase.criteria.query, "at");
        assert_eq!(app.tui.showcase.selected, 0);

        update(&mut app, press(KeyCode::Enter));
        assert!(!app.tui.showcase.searching);

        let visible = app.tui.showcase.visible_books(&app.tui.books);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Atlas");
    }

    /// Test: the admin view is gated to admin sessions.
    #[test]
    fn test_admin_view_gated() {
        let mut app = loaded_app();
        let press = |code| UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));

        update(&mut app, press(KeyCode::Tab));
        assert_eq!(app.tui.view, View::Showcase);
        assert!(app.tui.toast.is_some());
    }

    /// Test: toasts expire after their tick budget.
    #[test]
    fn test_toast_expiry() {
        let mut app = app();
        app.tui.show_toast(Toast::info("hello"));

        for _ in 0..100 {
            update(&mut app, UiEvent::Tick);
        }
        assert!(app.tui.toast.is_none());
    }
}
