//! Application state.
//!
//! One `AppState` value is owned by the runtime and handed to the reducer and
//! renderer explicitly. Tests build their own.

use std::path::PathBuf;

use chiedza_core::config::{Config, PortalConfig};
use chrono::NaiveDate;

use crate::common::{TaskSeq, Tasks};
use crate::features::navigation::NavigationState;
use crate::features::sections::SectionsState;
use crate::features::session::SessionState;
use crate::features::settings::SettingsState;

#[derive(Debug)]
pub struct AppState {
    pub session: SessionState,
    pub nav: NavigationState,
    pub sections: SectionsState,
    pub settings: SettingsState,
    pub portal: PortalConfig,
    /// Where `s` in the settings section writes to.
    pub config_path: PathBuf,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub should_quit: bool,
    /// Spinner frame, advanced on every tick.
    pub tick: usize,
    pub today: NaiveDate,
}

impl AppState {
    pub fn new(config: &Config, config_path: PathBuf, today: NaiveDate) -> Self {
        Self {
            session: SessionState::new(config.remote.is_configured()),
            nav: NavigationState::default(),
            sections: SectionsState::default(),
            settings: SettingsState::new(config.settings.clone()),
            portal: config.portal.clone(),
            config_path,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            should_quit: false,
            tick: 0,
            today,
        }
    }
}
