//! HTTP client for the BookVerse backend REST API.
//!
//! One [`ApiClient`] per process: base URL, a shared `reqwest::Client`, and
//! the bearer credential slot the session store attaches tokens to. Each
//! call is a single request/response round trip with no caching and no
//! retries.

pub mod auth;
pub mod books;

use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Fallback message when the backend error payload carries no detail.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Errors returned by backend API calls.
///
/// The variants follow the recovery taxonomy: `Unauthorized` reverts the
/// session to Anonymous, `Forbidden`/`Api` are surfaced verbatim to the
/// user, `Network` renders an empty state or a transient notice.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401: credentials missing, invalid, or expired.
    #[error("{0}")]
    Unauthorized(String),
    /// 403: authenticated but not allowed (admin-only operation).
    #[error("{0}")]
    Forbidden(String),
    /// Any other non-success status, with the backend's detail message.
    #[error("{detail}")]
    Api { status: u16, detail: String },
    /// Local failure preparing a request (e.g. unreadable cover image file).
    #[error("{0}")]
    Request(String),
    /// Transport-level failure (connection refused, DNS, decode).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Returns true for credential rejections (the session must revert to
    /// Anonymous).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Human-readable message for notifications and CLI output.
    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthorized(detail)
            | ApiError::Forbidden(detail)
            | ApiError::Request(detail) => detail.clone(),
            ApiError::Api { detail, .. } => detail.clone(),
            ApiError::Network(_) => GENERIC_ERROR.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Shared backend client.
///
/// The bearer slot uses interior mutability so the session store can attach
/// or clear the credential while book directory calls hold the same client
/// behind an `Arc`.
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    /// Creates a client for the given base URL (trailing slashes trimmed).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            bearer: RwLock::new(None),
        }
    }

    /// Returns the backend base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attaches a bearer credential to all subsequent requests.
    pub fn set_bearer(&self, token: &str) {
        *self
            .bearer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    /// Clears the outbound bearer credential.
    pub fn clear_bearer(&self) {
        *self
            .bearer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns true if a bearer credential is attached.
    pub fn has_bearer(&self) -> bool {
        self.bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn bearer(&self) -> Option<String> {
        self.bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    pub(crate) fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.put(self.url(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.delete(self.url(path)))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Decodes a successful response as JSON, or classifies the failure.
pub(crate) async fn expect_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    if !response.status().is_success() {
        return Err(decode_error(response).await);
    }
    Ok(response.json().await?)
}

/// Checks the status only, discarding any success body.
pub(crate) async fn expect_ok(response: reqwest::Response) -> ApiResult<()> {
    if !response.status().is_success() {
        return Err(decode_error(response).await);
    }
    Ok(())
}

/// Maps a non-success response to an [`ApiError`].
///
/// The backend reports failures as `{"detail": "..."}`; anything else falls
/// back to a generic message so raw payloads never reach the user.
pub(crate) async fn decode_error(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body).unwrap_or_else(|| GENERIC_ERROR.to_string());

    tracing::debug!(status = status.as_u16(), %detail, "backend request failed");

    match status.as_u16() {
        401 => ApiError::Unauthorized(detail),
        403 => ApiError::Forbidden(detail),
        code => ApiError::Api {
            status: code,
            detail,
        },
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let detail = value.get("detail")?.as_str()?.trim();
    if detail.is_empty() {
        None
    } else {
        Some(detail.to_string())
    }
}
