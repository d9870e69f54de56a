//! Full-screen TUI for the BookVerse catalog.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::sync::Arc;

use anyhow::Result;
use bookverse_core::api::ApiClient;
use bookverse_core::session::SessionStore;
pub use runtime::TuiRuntime;

use crate::state::AppState;

/// Runs the interactive catalog UI.
///
/// The session gate resolves before the first frame: no
/// authorization-sensitive chrome is drawn while the persisted token is
/// being validated.
///
/// # Errors
/// Returns an error if no terminal is attached or terminal setup fails.
pub async fn run(api: Arc<ApiClient>, mut session: SessionStore) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The catalog UI requires a terminal.\n\
             Use `bookverse books list` for non-interactive output."
        );
    }

    session.initialize().await;
    tracing::info!(base_url = api.base_url(), "starting catalog UI");

    let mut runtime = TuiRuntime::new(AppState::new(api, session))?;
    runtime.run()
}
