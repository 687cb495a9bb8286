//! UI events fed to the reducer.
//!
//! Terminal input, ticks and every async result arrive here, in inbox order.

use chiedza_core::config::OrgSettings;
use chiedza_core::remote::{RemoteSession, SessionChange};
use crossterm::event::Event;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};
use crate::features::sections::LoadedDataset;

#[derive(Debug)]
pub enum UiEvent {
    Tick,
    Terminal(Event),

    /// Result of the one-shot current-session query.
    BootstrapResult(Result<Option<RemoteSession>, String>),
    /// Forwarded auth-change notification.
    SessionChanged(SessionChange),
    LoginResult(Result<(), String>),
    SignOutResult(Result<(), String>),
    DatasetLoaded(LoadedDataset),
    SettingsSaved {
        settings: OrgSettings,
        result: Result<(), String>,
    },
    GroupAdded(Result<(), String>),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },
}
