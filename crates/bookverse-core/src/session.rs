//! Session persistence and the authentication state machine.
//!
//! Stores the single bearer token in `<home>/auth.json` with restricted
//! permissions (0600). The token persists across restarts; the user record
//! does not and is re-fetched on every start. Tokens are never logged or
//! displayed in full.
//!
//! ## State machine
//!
//! ```text
//! Initializing ──initialize()──▶ Authenticated (token valid)
//!       │                             │  ▲
//!       └────────────────────────▶ Anonymous
//!         (no token / rejected)       │  │
//!            logout / 401 ◀───────────┘  └─── login / register
//! ```
//!
//! No other transitions exist. `initialize()` runs exactly once per process
//! and gates all authorization-sensitive rendering.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::auth::AuthResponse;
use crate::api::{ApiClient, auth};
use crate::catalog::{Role, User};
use crate::config::paths;

/// Session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Process start; persisted token not yet validated.
    Initializing,
    /// Token accepted; `current_user` is present.
    Authenticated,
    /// No token, or the backend rejected it.
    Anonymous,
}

/// On-disk shape of `auth.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredAuth {
    token: Option<String>,
}

/// Persisted token storage.
///
/// One opaque token, keyed singularly; no multi-account support.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    /// Opens the cache at the default location (`<home>/auth.json`).
    pub fn open() -> Self {
        Self {
            path: paths::auth_path(),
        }
    }

    /// Opens the cache at an explicit path (tests, alternate homes).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the persisted token, if any.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read auth cache from {}", self.path.display()))?;

        let stored: StoredAuth = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse auth cache from {}", self.path.display()))?;
        Ok(stored.token)
    }

    /// Persists the token with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let stored = StoredAuth {
            token: Some(token.to_string()),
        };
        let contents = serde_json::to_string_pretty(&stored).context("Failed to serialize auth cache")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the persisted token. Returns whether one existed.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}

/// Owns the authentication lifecycle and exposes it to the rest of the app.
///
/// Explicitly constructed and injected, never a process-wide global.
/// Invariant:
/// `current_user` is present iff `status == Authenticated`.
#[derive(Debug)]
pub struct SessionStore {
    api: Arc<ApiClient>,
    cache: TokenCache,
    status: SessionStatus,
    current_user: Option<User>,
    initialized: bool,
}

impl SessionStore {
    /// Creates a store in the `Initializing` state.
    pub fn new(api: Arc<ApiClient>, cache: TokenCache) -> Self {
        Self {
            api,
            cache,
            status: SessionStatus::Initializing,
            current_user: None,
            initialized: false,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(User::is_admin)
    }

    /// Resolves the persisted token into Authenticated or Anonymous.
    ///
    /// Runs exactly once per process; later calls are no-ops. Any failure
    /// (absent token, rejected token, unreadable cache, network error)
    /// clears the persisted token and the outbound credential and resolves
    /// to Anonymous. Never fails.
    pub async fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        let token = match self.cache.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.status = SessionStatus::Anonymous;
                return;
            }
            Err(err) => {
                tracing::warn!("unreadable auth cache, starting anonymous: {err:#}");
                self.clear_session();
                return;
            }
        };

        self.api.set_bearer(&token);
        match auth::me(&self.api).await {
            Ok(user) => {
                tracing::info!(email = %user.email, "session restored");
                self.current_user = Some(user);
                self.status = SessionStatus::Authenticated;
            }
            Err(err) => {
                tracing::info!("persisted token rejected: {}", err.message());
                self.clear_session();
            }
        }
    }

    /// Exchanges credentials for a session.
    ///
    /// On success the token is persisted and attached to outbound requests.
    /// On failure the state is unchanged and the backend's message is
    /// returned for display; this never raises an unhandled fault.
    ///
    /// # Errors
    /// The human-readable failure message.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), String> {
        match auth::login(&self.api, email, password).await {
            Ok(response) => {
                self.apply_auth(response);
                Ok(())
            }
            Err(err) => Err(err.message()),
        }
    }

    /// Registers an account and starts a session, same contract as `login`.
    ///
    /// Always registers with [`Role::User`]: privilege elevation is the
    /// backend's business, not a client control.
    ///
    /// # Errors
    /// The human-readable failure message.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), String> {
        match auth::register(&self.api, email, password, name, Role::User).await {
            Ok(response) => {
                self.apply_auth(response);
                Ok(())
            }
            Err(err) => Err(err.message()),
        }
    }

    /// Applies a successful login/register response to the session.
    ///
    /// Split out so a UI can run the HTTP round trip on a spawned task and
    /// apply the transition on its own event loop.
    pub fn apply_auth(&mut self, response: AuthResponse) {
        if let Err(err) = self.cache.save(&response.access_token) {
            // The in-memory session still works; it just won't survive a restart.
            tracing::warn!("failed to persist token: {err:#}");
        }
        self.api.set_bearer(&response.access_token);
        tracing::info!(email = %response.user.email, "logged in");
        self.current_user = Some(response.user);
        self.status = SessionStatus::Authenticated;
    }

    /// Ends the session: clears the persisted token, the outbound
    /// credential, and the user record. Synchronous, cannot fail.
    pub fn logout(&mut self) {
        tracing::info!("logged out");
        self.clear_session();
    }

    /// Credential-rejection path: an authenticated request answered 401.
    ///
    /// Same cleanup as `logout`; callers invoke this after observing
    /// `ApiError::Unauthorized`.
    pub fn invalidate(&mut self) {
        tracing::info!("session invalidated by credential rejection");
        self.clear_session();
    }

    fn clear_session(&mut self) {
        if let Err(err) = self.cache.clear() {
            tracing::warn!("failed to clear persisted token: {err:#}");
        }
        self.api.clear_bearer();
        self.current_user = None;
        self.status = SessionStatus::Anonymous;
    }
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 12 {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}
