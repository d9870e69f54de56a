//! Authentication endpoints (login, register, current user).

use serde::Deserialize;

use super::{ApiClient, ApiResult, expect_json};
use crate::catalog::{Role, User};

/// Response shape shared by the login and register endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: User,
}

/// Exchanges credentials for a bearer token.
///
/// # Errors
/// `Unauthorized` on bad credentials, with the backend's detail message.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> ApiResult<AuthResponse> {
    let response = api
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": email,
            "password": password,
        }))
        .send()
        .await?;

    expect_json(response).await
}

/// Creates an account and returns a token for it.
///
/// The backend accepts a caller-supplied role; this client always sends
/// `role.as_str()` and the front-ends only ever pass [`Role::User`].
///
/// # Errors
/// `Api` with the backend detail (e.g. "Email already registered").
pub async fn register(
    api: &ApiClient,
    email: &str,
    password: &str,
    name: &str,
    role: Role,
) -> ApiResult<AuthResponse> {
    let response = api
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "email": email,
            "password": password,
            "name": name,
            "role": role.as_str(),
        }))
        .send()
        .await?;

    expect_json(response).await
}

/// Fetches the user record for the attached bearer credential.
///
/// # Errors
/// `Unauthorized` when the token is missing, invalid, or expired.
pub async fn me(api: &ApiClient) -> ApiResult<User> {
    let response = api.get("/api/auth/me").send().await?;
    expect_json(response).await
}
