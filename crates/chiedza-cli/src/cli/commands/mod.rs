//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod portal;
pub mod records;
pub mod report;

use anyhow::{Context, Result};
use chiedza_core::config::{Config, paths};
use chiedza_core::remote::Client;

/// Client for the configured remote service.
///
/// # Errors
/// Returns an error if no remote service is configured.
pub fn remote_client(config: &Config) -> Result<Client> {
    Client::new(&config.remote, config.remote_timeout(), paths::session_path())
        .context("connect to remote service")
}

/// Like [`remote_client`], but also requires a signed-in session.
pub async fn signed_in_client(config: &Config) -> Result<Client> {
    let client = remote_client(config)?;
    if client.get_current_session().await?.is_none() {
        anyhow::bail!("Not logged in. Run `chiedza login --email <EMAIL>` first.");
    }
    Ok(client)
}
