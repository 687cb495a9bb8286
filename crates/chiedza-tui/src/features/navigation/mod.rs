mod render;
mod state;

pub use render::{render_drawer, render_header, render_profile_menu, render_sidebar};
pub use state::{NavigationState, Section};
