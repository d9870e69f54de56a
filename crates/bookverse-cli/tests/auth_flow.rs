//! Integration tests for the session commands against a mock backend.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn auth_response(token: &str, role: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "user": {
            "id": "u1",
            "email": "a@x.com",
            "name": "Ada",
            "role": role,
        },
    }))
}

/// Test: login persists the token to auth.json.
#[tokio::test]
async fn test_login_persists_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(auth_response("tok-cli-1", "user"))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    cargo_bin_cmd!("bookverse")
        .env("BOOKVERSE_HOME", home.path())
        .env("BOOKVERSE_BASE_URL", server.uri())
        .args(["login", "--email", "a@x.com", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as a@x.com"));

    let auth_path = home.path().join("auth.json");
    assert!(auth_path.exists(), "auth.json should exist");
    let contents = fs::read_to_string(&auth_path).unwrap();
    assert!(contents.contains("tok-cli-1"));
}

/// Test: bad credentials exit 1 with the backend message, no token saved.
#[tokio::test]
async fn test_login_failure_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "Invalid email or password",
        })))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    cargo_bin_cmd!("bookverse")
        .env("BOOKVERSE_HOME", home.path())
        .env("BOOKVERSE_BASE_URL", server.uri())
        .args(["login", "--email", "a@x.com", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));

    assert!(!home.path().join("auth.json").exists());
}

/// Test: whoami validates the persisted token via /api/auth/me.
#[tokio::test]
async fn test_whoami_with_valid_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer tok-cli-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u1",
            "email": "a@x.com",
            "name": "Ada",
            "role": "admin",
        })))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    fs::write(
        home.path().join("auth.json"),
        r#"{ "token": "tok-cli-2" }"#,
    )
    .unwrap();

    cargo_bin_cmd!("bookverse")
        .env("BOOKVERSE_HOME", home.path())
        .env("BOOKVERSE_BASE_URL", server.uri())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada <a@x.com> (admin)"));
}

/// Test: a rejected token reports anonymous and clears the cache.
#[tokio::test]
async fn test_whoami_with_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "Invalid authentication credentials",
        })))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    fs::write(home.path().join("auth.json"), r#"{ "token": "stale" }"#).unwrap();

    cargo_bin_cmd!("bookverse")
        .env("BOOKVERSE_HOME", home.path())
        .env("BOOKVERSE_BASE_URL", server.uri())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));

    assert!(
        !home.path().join("auth.json").exists(),
        "rejected token should be cleared"
    );
}

/// Test: logout removes the persisted token.
#[test]
fn test_logout_clears_token() {
    let home = tempdir().unwrap();
    fs::write(home.path().join("auth.json"), r#"{ "token": "tok" }"#).unwrap();

    cargo_bin_cmd!("bookverse")
        .env("BOOKVERSE_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."));

    assert!(!home.path().join("auth.json").exists());
}

/// Test: logout when not signed in says so.
#[test]
fn test_logout_when_not_signed_in() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("bookverse")
        .env("BOOKVERSE_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
}
