use chiedza_core::config::OrgSettings;
use crossterm::event::{KeyCode, KeyEvent};

use super::state::{SaveStatus, SettingsState};

/// Handles a settings key. Returns the settings to persist on `s`.
pub fn handle_settings_key(state: &mut SettingsState, key: KeyEvent) -> Option<OrgSettings> {
    let values = &mut state.values;
    match key.code {
        KeyCode::Char('c') => values.currency = values.currency.next(),
        KeyCode::Char('+' | '=') => values.raise_interest_rate(),
        KeyCode::Char('-') => values.lower_interest_rate(),
        KeyCode::Char(']') => values.raise_risk_threshold(),
        KeyCode::Char('[') => values.lower_risk_threshold(),
        KeyCode::Char('a') => values.email_alerts = !values.email_alerts,
        KeyCode::Char('s') => {
            if state.saving {
                return None;
            }
            state.saving = true;
            state.status = None;
            return Some(state.values.clone());
        }
        _ => return None,
    }
    state.status = None;
    None
}

pub fn handle_settings_saved(
    state: &mut SettingsState,
    saved: OrgSettings,
    result: Result<(), String>,
) {
    state.saving = false;
    match result {
        Ok(()) => {
            state.saved = saved;
            state.status = Some(SaveStatus::Saved);
        }
        Err(error) => {
            tracing::warn!("Saving settings failed: {error}");
            state.status = Some(SaveStatus::Failed(error));
        }
    }
}

#[cfg(test)]
mod tests {
    use chiedza_core::config::Currency;
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_keys() {
        let mut state = SettingsState::new(OrgSettings::default());
        handle_settings_key(&mut state, key('c'));
        handle_settings_key(&mut state, key('+'));
        handle_settings_key(&mut state, key('+'));
        handle_settings_key(&mut state, key('['));
        handle_settings_key(&mut state, key('a'));

        assert_eq!(state.values.currency, Currency::Zwg);
        assert_eq!(state.values.interest_rate, 12);
        assert_eq!(state.values.risk_threshold_days, 29);
        assert!(!state.values.email_alerts);
        assert!(state.is_dirty());
    }

    #[test]
    fn test_save_round() {
        let mut state = SettingsState::new(OrgSettings::default());
        handle_settings_key(&mut state, key('-'));
        let to_save = handle_settings_key(&mut state, key('s')).unwrap();
        assert!(state.saving);
        assert!(handle_settings_key(&mut state, key('s')).is_none());

        handle_settings_saved(&mut state, to_save, Ok(()));
        assert!(!state.saving);
        assert!(!state.is_dirty());
        assert_eq!(state.status, Some(SaveStatus::Saved));
    }

    #[test]
    fn test_save_failure_keeps_dirty() {
        let mut state = SettingsState::new(OrgSettings::default());
        handle_settings_key(&mut state, key('a'));
        let to_save = handle_settings_key(&mut state, key('s')).unwrap();
        handle_settings_saved(&mut state, to_save, Err("read-only file system".into()));
        assert!(state.is_dirty());
        assert_eq!(
            state.status,
            Some(SaveStatus::Failed("read-only file system".into()))
        );
    }
}
