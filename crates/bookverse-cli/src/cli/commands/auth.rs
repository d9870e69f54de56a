//! Session commands: login, register, logout, whoami.

use anyhow::Result;
use bookverse_core::session::TokenCache;

use super::{build_session, read_password};

pub async fn login(email: &str, password: Option<String>) -> Result<()> {
    let (_api, mut session) = build_session()?;
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };

    match session.login(email, &password).await {
        Ok(()) => {
            if let Some(user) = session.current_user() {
                println!("Signed in as {} ({})", user.email, user.role.as_str());
            }
            Ok(())
        }
        Err(message) => anyhow::bail!("Login failed: {message}"),
    }
}

pub async fn register(email: &str, name: &str, password: Option<String>) -> Result<()> {
    let (_api, mut session) = build_session()?;
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };

    match session.register(email, &password, name).await {
        Ok(()) => {
            if let Some(user) = session.current_user() {
                println!("Registered and signed in as {}", user.email);
            }
            Ok(())
        }
        Err(message) => anyhow::bail!("Registration failed: {message}"),
    }
}

pub fn logout() -> Result<()> {
    let cache = TokenCache::open();
    if cache.clear()? {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

pub async fn whoami() -> Result<()> {
    let (_api, mut session) = build_session()?;
    session.initialize().await;

    match session.current_user() {
        Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role.as_str()),
        None => println!("Not signed in."),
    }
    Ok(())
}
