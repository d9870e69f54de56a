//! Command implementations.

pub mod auth;
pub mod books;
pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use bookverse_core::api::ApiClient;
use bookverse_core::config::Config;
use bookverse_core::session::{SessionStore, TokenCache};

/// Builds the shared API client from the resolved configuration.
pub(crate) fn build_api() -> Result<Arc<ApiClient>> {
    let config = Config::load()?;
    Ok(Arc::new(ApiClient::new(&config.effective_base_url())))
}

/// Builds the session store on top of the shared client.
pub(crate) fn build_session() -> Result<(Arc<ApiClient>, SessionStore)> {
    let api = build_api()?;
    let session = SessionStore::new(Arc::clone(&api), TokenCache::open());
    Ok((api, session))
}

/// Launches the interactive TUI (the default command).
pub(crate) async fn tui() -> Result<()> {
    // Keep the appender guard alive for the whole TUI run.
    let _log_guard = bookverse_core::logging::init_tui();
    let (api, session) = build_session()?;
    bookverse_tui::run(api, session).await
}

/// Reads a password from stdin (used when --password is omitted).
pub(crate) fn read_password() -> Result<String> {
    use std::io::{BufRead, Write};

    eprint!("Password: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
