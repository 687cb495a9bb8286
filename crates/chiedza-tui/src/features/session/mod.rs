mod render;
mod state;
mod update;

pub use render::{render_loading_screen, render_login_screen, spinner};
pub use state::{
    DEMO_EMAIL, Identity, LoginField, LoginForm, Session, SessionPhase, SessionState,
};
pub use update::{
    Transition, enter_demo_mode, handle_bootstrap_result, handle_login_result,
    handle_session_changed, logout, submit_login,
};
