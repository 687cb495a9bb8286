//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O or spawns tasks itself.

use std::path::PathBuf;

use chiedza_core::config::OrgSettings;
use chiedza_core::datasets::DatasetKind;
use chiedza_core::records::NewGroup;
use tokio_util::sync::CancellationToken;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEffect {
    Quit,

    /// Ask the remote client for the current session.
    Bootstrap { task: TaskId },

    SignIn {
        task: TaskId,
        email: String,
        password: String,
    },

    /// Remote sign-out for a real session. Local state is already cleared.
    SignOut { task: TaskId },

    /// Fetch one dataset. `demo` forces fixture data.
    LoadDataset {
        task: TaskId,
        kind: DatasetKind,
        demo: bool,
    },

    SaveSettings {
        task: TaskId,
        settings: OrgSettings,
        path: PathBuf,
    },

    /// Insert a savings group for a real session.
    AddGroup { task: TaskId, group: NewGroup },

    CancelTask { token: CancellationToken },
}
