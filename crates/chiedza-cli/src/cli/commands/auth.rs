//! Session command handlers.

use anyhow::{Context, Result};
use chiedza_core::config::{Config, paths};
use chiedza_core::remote::{SessionCache, mask_token};
use chrono::DateTime;

use super::remote_client;

pub async fn login(config: &Config, email: &str, password: Option<&str>) -> Result<()> {
    let email = email.trim();
    let password = password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        anyhow::bail!(
            "Email and password are required (pass --password or set CHIEDZA_PASSWORD)"
        );
    }

    let client = remote_client(config)?;
    let session = client
        .sign_in_with_password(email, password)
        .await
        .context("sign in")?;
    println!(
        "Logged in as {} ({})",
        session.email(),
        session.role().label()
    );
    Ok(())
}

pub async fn logout(config: &Config) -> Result<()> {
    if !config.remote.is_configured() {
        // Nothing to revoke; just drop whatever is cached.
        let cleared = SessionCache::new(paths::session_path()).clear()?;
        println!("{}", if cleared { "Logged out." } else { "Not logged in." });
        return Ok(());
    }

    let client = remote_client(config)?;
    if let Err(e) = client.sign_out().await {
        tracing::warn!("Remote sign-out failed: {e:#}");
        eprintln!("Warning: remote sign-out failed: {e:#}");
    }
    println!("Logged out.");
    Ok(())
}

pub async fn status(config: &Config) -> Result<()> {
    let session = if config.remote.is_configured() {
        remote_client(config)?.get_current_session().await?
    } else {
        println!("Remote service: not configured");
        SessionCache::new(paths::session_path()).load()?
    };

    let Some(session) = session else {
        println!("Not logged in.");
        return Ok(());
    };

    println!("Logged in as {}", session.email());
    println!("Role: {}", session.role().label());
    println!("Token: {}", mask_token(&session.access_token));
    if let Some(expires) = DateTime::from_timestamp(session.expires_at, 0) {
        println!("Expires: {}", expires.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}
