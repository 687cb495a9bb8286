//! Effect handlers: async functions that talk to the remote client and
//! return the `UiEvent` carrying their result. They never touch state.

use std::path::PathBuf;

use chiedza_core::config::{Config, OrgSettings};
use chiedza_core::datasets::{self, DatasetKind};
use chiedza_core::records::{GROUPS_TABLE, NewGroup};
use chiedza_core::remote::{Client, Subscription};
use tokio_util::sync::CancellationToken;

use super::inbox::UiEventSender;
use crate::events::UiEvent;
use crate::features::sections::LoadedDataset;

fn reason(error: &anyhow::Error) -> String {
    format!("{error:#}")
}

pub async fn bootstrap(client: Option<Client>) -> UiEvent {
    let result = match client {
        Some(client) => client.get_current_session().await.map_err(|e| reason(&e)),
        None => Ok(None),
    };
    UiEvent::BootstrapResult(result)
}

pub async fn sign_in(client: Option<Client>, email: String, password: String) -> UiEvent {
    let Some(client) = client else {
        return UiEvent::LoginResult(Err("Remote service is not configured".to_string()));
    };
    let result = client
        .sign_in_with_password(&email, &password)
        .await
        .map(|_| ())
        .map_err(|e| reason(&e));
    if result.is_ok() {
        tracing::info!(email = %email, "Signed in");
    }
    UiEvent::LoginResult(result)
}

pub async fn sign_out(client: Option<Client>) -> UiEvent {
    let result = match client {
        Some(client) => client.sign_out().await.map_err(|e| reason(&e)),
        None => Ok(()),
    };
    UiEvent::SignOutResult(result)
}

/// Fetches one dataset. Returns `None` when cancelled.
pub async fn load_dataset(
    client: Option<Client>,
    kind: DatasetKind,
    cancel: CancellationToken,
) -> Option<UiEvent> {
    let client = client.as_ref();
    let fetch = async {
        match kind {
            DatasetKind::Groups => LoadedDataset::Groups(datasets::load_groups(client).await),
            DatasetKind::Members => LoadedDataset::Members(datasets::load_members(client).await),
            DatasetKind::Loans => LoadedDataset::Loans(datasets::load_loans(client).await),
        }
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::debug!(table = kind.table(), "Fetch cancelled");
            None
        }
        loaded = fetch => Some(UiEvent::DatasetLoaded(loaded)),
    }
}

pub async fn save_settings(path: PathBuf, settings: OrgSettings) -> UiEvent {
    let result = Config::save_settings_to(&path, &settings).map_err(|e| reason(&e));
    UiEvent::SettingsSaved { settings, result }
}

pub async fn add_group(client: Option<Client>, group: NewGroup) -> UiEvent {
    let Some(client) = client else {
        return UiEvent::GroupAdded(Err("Remote service is not configured".to_string()));
    };
    let result = client
        .insert(GROUPS_TABLE, &group)
        .await
        .map_err(|e| reason(&e));
    if result.is_ok() {
        tracing::info!(name = %group.name, cluster = %group.cluster_zone, "Registered group");
    }
    UiEvent::GroupAdded(result)
}

/// Forwards auth-change notifications into the inbox until cancelled or the
/// client is dropped. The subscription unregisters when this returns.
pub async fn forward_session_changes(
    mut subscription: Subscription,
    tx: UiEventSender,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            change = subscription.recv() => {
                let Some(change) = change else { break };
                if tx.send(UiEvent::SessionChanged(change)).is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("Session forwarder stopped");
}
