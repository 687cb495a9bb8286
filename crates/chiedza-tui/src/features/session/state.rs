//! Session store state.

use chiedza_core::remote::{RemoteSession, Role};

/// Email of the synthetic demo identity.
pub const DEMO_EMAIL: &str = "demo@chiedza.org";
const DEMO_USER_ID: &str = "demo-user";

/// Who is signed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    /// Tokens for real sessions, `None` for the demo identity.
    pub remote: Option<RemoteSession>,
}

impl Identity {
    pub fn demo() -> Self {
        Self {
            user_id: DEMO_USER_ID.to_string(),
            email: DEMO_EMAIL.to_string(),
            role: Role::Director,
            remote: None,
        }
    }

    pub fn from_remote(session: RemoteSession) -> Self {
        Self {
            user_id: session.user.id.clone(),
            email: session.email().to_string(),
            role: session.role(),
            remote: Some(session),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub identity: Identity,
    pub is_demo: bool,
}

impl Session {
    pub fn demo() -> Self {
        Self {
            identity: Identity::demo(),
            is_demo: true,
        }
    }

    pub fn real(remote: RemoteSession) -> Self {
        Self {
            identity: Identity::from_remote(remote),
            is_demo: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionPhase {
    /// Bootstrap in flight.
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(Session),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

impl LoginField {
    pub fn toggle(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }
}

/// Login screen form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub login: LoginForm,
    /// Whether a remote service is configured at all.
    pub remote_available: bool,
}

impl SessionState {
    pub fn new(remote_available: bool) -> Self {
        Self {
            remote_available,
            ..Self::default()
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            SessionPhase::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_demo(&self) -> bool {
        self.session().is_some_and(|s| s.is_demo)
    }
}
