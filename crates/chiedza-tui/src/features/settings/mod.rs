mod render;
mod state;
mod update;

pub use render::render_settings;
pub use state::{SaveStatus, SettingsState};
pub use update::{handle_settings_key, handle_settings_saved};
