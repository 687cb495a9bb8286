//! Session store reducer.
//!
//! Results and notifications arrive in inbox order and the last one wins,
//! except that a demo session is only ever cleared by `logout`.

use chiedza_core::remote::{RemoteSession, SessionChange};

use super::state::{LoginField, Session, SessionPhase, SessionState};

/// What the caller must do to the rest of the app after a session change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    None,
    /// Became authenticated: reset navigation and load data.
    SignedIn,
    /// Identity replaced in place (token refresh).
    Refreshed,
    /// Became unauthenticated: reset navigation and data.
    SignedOut,
}

fn authenticate(state: &mut SessionState, remote: RemoteSession) -> Transition {
    match &mut state.phase {
        SessionPhase::Authenticated(session) if session.is_demo => Transition::None,
        SessionPhase::Authenticated(session) if session.identity.user_id == remote.user.id => {
            *session = Session::real(remote);
            Transition::Refreshed
        }
        SessionPhase::Authenticated(session) => {
            *session = Session::real(remote);
            Transition::SignedIn
        }
        SessionPhase::Loading | SessionPhase::Unauthenticated => {
            state.phase = SessionPhase::Authenticated(Session::real(remote));
            state.login.error = None;
            Transition::SignedIn
        }
    }
}

fn deauthenticate(state: &mut SessionState) -> Transition {
    match &state.phase {
        SessionPhase::Authenticated(session) if session.is_demo => Transition::None,
        SessionPhase::Authenticated(_) => {
            state.phase = SessionPhase::Unauthenticated;
            Transition::SignedOut
        }
        SessionPhase::Loading => {
            state.phase = SessionPhase::Unauthenticated;
            Transition::None
        }
        SessionPhase::Unauthenticated => Transition::None,
    }
}

/// Applies the result of the one-shot bootstrap query.
///
/// A failure counts as "no session"; it is logged, not shown.
pub fn handle_bootstrap_result(
    state: &mut SessionState,
    result: Result<Option<RemoteSession>, String>,
) -> Transition {
    match result {
        Ok(Some(remote)) => authenticate(state, remote),
        Ok(None) => deauthenticate(state),
        Err(error) => {
            tracing::warn!("Session bootstrap failed: {error}");
            deauthenticate(state)
        }
    }
}

/// Applies an auth-change notification.
pub fn handle_session_changed(state: &mut SessionState, change: SessionChange) -> Transition {
    match change {
        Some(remote) => authenticate(state, remote),
        None => deauthenticate(state),
    }
}

/// Validates the form and marks it submitting.
///
/// Returns the credentials to send, or `None` when the submission is ignored
/// (already pending, not on the login screen) or rejected by the presence
/// check.
pub fn submit_login(state: &mut SessionState) -> Option<(String, String)> {
    if state.phase != SessionPhase::Unauthenticated || state.login.submitting {
        return None;
    }

    let form = &mut state.login;
    let email = form.email.trim().to_string();
    if email.is_empty() || form.password.is_empty() {
        form.error = Some("Email and password are required".to_string());
        form.focus = if email.is_empty() {
            LoginField::Email
        } else {
            LoginField::Password
        };
        return None;
    }
    if !state.remote_available {
        form.error = Some(
            "Remote service is not configured. Press Ctrl+D to explore in demo mode.".to_string(),
        );
        return None;
    }

    form.error = None;
    form.submitting = true;
    Some((email, form.password.clone()))
}

/// Applies a completed sign-in attempt.
///
/// Success changes nothing here: the session arrives as a notification.
pub fn handle_login_result(state: &mut SessionState, result: Result<(), String>) {
    let form = &mut state.login;
    form.submitting = false;
    form.password.clear();
    match result {
        Ok(()) => form.error = None,
        Err(error) => {
            form.focus = LoginField::Password;
            form.error = Some(error);
        }
    }
}

/// Enters demo mode without any network call. Only valid when signed out.
pub fn enter_demo_mode(state: &mut SessionState) -> Transition {
    if state.phase != SessionPhase::Unauthenticated {
        return Transition::None;
    }
    state.phase = SessionPhase::Authenticated(Session::demo());
    state.login = Default::default();
    tracing::info!("Entered demo mode");
    Transition::SignedIn
}

/// Clears the session locally.
///
/// Returns the cleared session, or `None` when nobody was signed in.
pub fn logout(state: &mut SessionState) -> Option<Session> {
    let previous = std::mem::replace(&mut state.phase, SessionPhase::Unauthenticated);
    match previous {
        SessionPhase::Authenticated(session) => {
            state.login = Default::default();
            Some(session)
        }
        other => {
            state.phase = other;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chiedza_core::remote::{RemoteUser, Role, UserMetadata};

    use super::*;

    fn remote(email: &str, token: &str) -> RemoteSession {
        RemoteSession {
            access_token: token.to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: i64::MAX,
            user: RemoteUser {
                id: "u-1".to_string(),
                email: Some(email.to_string()),
                user_metadata: UserMetadata {
                    role: Some("Director".to_string()),
                },
            },
        }
    }

    fn unauthenticated() -> SessionState {
        let mut state = SessionState::new(true);
        state.phase = SessionPhase::Unauthenticated;
        state
    }

    #[test]
    fn test_bootstrap_outcomes() {
        let mut state = SessionState::new(true);
        assert_eq!(handle_bootstrap_result(&mut state, Ok(None)), Transition::None);
        assert_eq!(state.phase, SessionPhase::Unauthenticated);

        let mut state = SessionState::new(true);
        assert_eq!(
            handle_bootstrap_result(&mut state, Err("offline".into())),
            Transition::None
        );
        assert_eq!(state.phase, SessionPhase::Unauthenticated);
        assert!(state.login.error.is_none());

        let mut state = SessionState::new(true);
        assert_eq!(
            handle_bootstrap_result(&mut state, Ok(Some(remote("a@b.org", "t")))),
            Transition::SignedIn
        );
        let session = state.session().unwrap();
        assert!(!session.is_demo);
        assert_eq!(session.identity.role, Role::Director);
    }

    #[test]
    fn test_demo_ignores_notifications_and_bootstrap() {
        let mut state = unauthenticated();
        assert_eq!(enter_demo_mode(&mut state), Transition::SignedIn);

        assert_eq!(handle_session_changed(&mut state, None), Transition::None);
        assert_eq!(
            handle_session_changed(&mut state, Some(remote("x@y.org", "t"))),
            Transition::None
        );
        assert_eq!(
            handle_bootstrap_result(&mut state, Ok(None)),
            Transition::None
        );
        assert!(state.is_demo());
        assert_eq!(state.session().unwrap().identity.email, "demo@chiedza.org");
    }

    #[test]
    fn test_demo_only_from_unauthenticated() {
        let mut state = SessionState::new(true);
        assert_eq!(enter_demo_mode(&mut state), Transition::None);
        assert_eq!(state.phase, SessionPhase::Loading);
    }

    #[test]
    fn test_refresh_replaces_identity_in_place() {
        let mut state = unauthenticated();
        handle_session_changed(&mut state, Some(remote("a@b.org", "old")));
        assert_eq!(
            handle_session_changed(&mut state, Some(remote("a@b.org", "new"))),
            Transition::Refreshed
        );
        let identity = &state.session().unwrap().identity;
        assert_eq!(identity.remote.as_ref().unwrap().access_token, "new");
    }

    #[test]
    fn test_different_user_is_a_new_sign_in() {
        let mut state = unauthenticated();
        handle_session_changed(&mut state, Some(remote("a@b.org", "t1")));

        let mut other = remote("c@d.org", "t2");
        other.user.id = "u-2".to_string();
        assert_eq!(
            handle_session_changed(&mut state, Some(other)),
            Transition::SignedIn
        );
        let identity = &state.session().unwrap().identity;
        assert_eq!(identity.user_id, "u-2");
        assert_eq!(identity.email, "c@d.org");
    }

    #[test]
    fn test_empty_notification_signs_out_real_session() {
        let mut state = unauthenticated();
        handle_session_changed(&mut state, Some(remote("a@b.org", "t")));
        assert_eq!(handle_session_changed(&mut state, None), Transition::SignedOut);
        assert_eq!(state.phase, SessionPhase::Unauthenticated);
    }

    #[test]
    fn test_submit_presence_check() {
        let mut state = unauthenticated();
        state.login.email = "   ".into();
        state.login.password = "secret".into();
        assert_eq!(submit_login(&mut state), None);
        assert!(state.login.error.is_some());
        assert_eq!(state.login.focus, LoginField::Email);
        assert!(!state.login.submitting);
    }

    #[test]
    fn test_submit_trims_identifier_not_secret() {
        let mut state = unauthenticated();
        state.login.email = "  staff@chiedza.org ".into();
        state.login.password = " pw ".into();
        assert_eq!(
            submit_login(&mut state),
            Some(("staff@chiedza.org".to_string(), " pw ".to_string()))
        );
        assert!(state.login.submitting);

        // A second submission while pending is ignored.
        assert_eq!(submit_login(&mut state), None);
        assert!(state.login.error.is_none());
    }

    #[test]
    fn test_submit_without_remote() {
        let mut state = SessionState::new(false);
        state.phase = SessionPhase::Unauthenticated;
        state.login.email = "a@b.org".into();
        state.login.password = "pw".into();
        assert_eq!(submit_login(&mut state), None);
        assert!(state.login.error.as_deref().unwrap().contains("demo mode"));
    }

    #[test]
    fn test_login_result_clears_secret() {
        let mut state = unauthenticated();
        state.login.email = "a@b.org".into();
        state.login.password = "pw".into();
        submit_login(&mut state);

        handle_login_result(&mut state, Err("Invalid login credentials".into()));
        assert_eq!(state.login.error.as_deref(), Some("Invalid login credentials"));
        assert!(state.login.password.is_empty());
        assert_eq!(state.login.email, "a@b.org");
        assert!(!state.login.submitting);
        assert_eq!(state.phase, SessionPhase::Unauthenticated);
    }

    #[test]
    fn test_logout() {
        let mut state = unauthenticated();
        assert!(logout(&mut state).is_none());
        assert_eq!(state.phase, SessionPhase::Unauthenticated);

        enter_demo_mode(&mut state);
        let cleared = logout(&mut state).unwrap();
        assert!(cleared.is_demo);
        assert_eq!(state.phase, SessionPhase::Unauthenticated);
    }
}
