//! Section data reducer.

use chiedza_core::datasets::DatasetKind;
use chiedza_core::records::NewGroup;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{GroupField, GroupForm, LoadedDataset, SectionsState};
use crate::features::navigation::Section;

/// Datasets `section` needs that have not been requested yet, marked loading.
pub fn claim_missing(sections: &mut SectionsState, section: Section) -> Vec<DatasetKind> {
    claim(sections, section, false)
}

/// Every dataset `section` reads, marked loading again.
pub fn claim_reload(sections: &mut SectionsState, section: Section) -> Vec<DatasetKind> {
    claim(sections, section, true)
}

fn claim(sections: &mut SectionsState, section: Section, force: bool) -> Vec<DatasetKind> {
    let mut claimed = Vec::new();
    for &kind in section.datasets() {
        if force || !sections.is_requested(kind) {
            sections.mark_loading(kind);
            claimed.push(kind);
        }
    }
    claimed
}

pub fn handle_dataset_loaded(sections: &mut SectionsState, loaded: LoadedDataset) {
    sections.store(loaded);
}

/// Keys for the beneficiaries section. Returns true when consumed.
pub fn handle_members_key(sections: &mut SectionsState, key: KeyEvent) -> bool {
    let search = &mut sections.member_search;
    if search.editing {
        match key.code {
            KeyCode::Char(c) => search.query.push(c),
            KeyCode::Backspace => {
                search.query.pop();
            }
            KeyCode::Enter => search.editing = false,
            KeyCode::Esc => {
                search.query.clear();
                search.editing = false;
            }
            _ => {}
        }
        return true;
    }

    match key.code {
        KeyCode::Char('/') => {
            search.editing = true;
            true
        }
        KeyCode::Esc if !search.query.is_empty() => {
            search.query.clear();
            true
        }
        _ => false,
    }
}

/// Outcome of a key press in the groups section.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupsKey {
    /// Not for the groups section; fall through to shell keys.
    Ignored,
    Consumed,
    /// The form passed validation and is now submitting.
    Submit(NewGroup),
}

/// Keys for the groups section: `a` opens the registration form, which then
/// captures all input until it is saved or dismissed.
pub fn handle_groups_key(sections: &mut SectionsState, key: KeyEvent) -> GroupsKey {
    let Some(form) = &mut sections.group_form else {
        if key.code == KeyCode::Char('a') {
            sections.group_form = Some(GroupForm::default());
            return GroupsKey::Consumed;
        }
        return GroupsKey::Ignored;
    };

    if form.submitting {
        return GroupsKey::Consumed;
    }

    match key.code {
        KeyCode::Esc => sections.group_form = None,
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.step(1),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.step(-1),
        KeyCode::Left if form.focus == GroupField::Cluster => form.cycle_cluster(-1),
        KeyCode::Right | KeyCode::Char(' ') if form.focus == GroupField::Cluster => {
            form.cycle_cluster(1);
        }
        KeyCode::Backspace => {
            if let Some(text) = form.focused_text() {
                text.pop();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(text) = form.focused_text() {
                text.push(c);
            }
        }
        KeyCode::Enter => {
            let cluster = form.cluster_zone();
            match NewGroup::from_input(&form.name, Some(cluster), &form.lat, &form.lng) {
                Ok(group) => {
                    form.error = None;
                    form.submitting = true;
                    return GroupsKey::Submit(group);
                }
                Err(e) => {
                    form.error = Some(e.to_string());
                    form.focus = GroupField::Name;
                }
            }
        }
        _ => {}
    }
    GroupsKey::Consumed
}

/// Applies the insert result. Success closes the form.
pub fn handle_group_added(sections: &mut SectionsState, result: Result<(), String>) {
    match result {
        Ok(()) => sections.group_form = None,
        Err(error) => {
            if let Some(form) = &mut sections.group_form {
                form.submitting = false;
                form.error = Some(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chiedza_core::datasets::Dataset;
    use chiedza_core::fixtures;
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::features::sections::Loadable;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_claim_missing_skips_requested() {
        let mut sections = SectionsState::default();
        assert_eq!(
            claim_missing(&mut sections, Section::Groups),
            vec![DatasetKind::Groups]
        );
        assert!(sections.groups.is_loading());
        assert_eq!(
            claim_missing(&mut sections, Section::Dashboard),
            vec![DatasetKind::Members, DatasetKind::Loans]
        );
        assert!(claim_missing(&mut sections, Section::Map).is_empty());
        assert!(claim_missing(&mut sections, Section::Settings).is_empty());
    }

    #[test]
    fn test_claim_reload_refetches_loaded() {
        let mut sections = SectionsState::default();
        sections.store(LoadedDataset::Loans(Dataset::sample(fixtures::loans())));
        assert_eq!(
            claim_reload(&mut sections, Section::Loans),
            vec![DatasetKind::Loans]
        );
        assert_eq!(sections.loans, Loadable::Loading);
    }

    #[test]
    fn test_member_search_editing() {
        let mut sections = SectionsState::default();
        assert!(!handle_members_key(&mut sections, key(KeyCode::Char('x'))));
        assert!(handle_members_key(&mut sections, key(KeyCode::Char('/'))));
        for c in "siya".chars() {
            handle_members_key(&mut sections, key(KeyCode::Char(c)));
        }
        handle_members_key(&mut sections, key(KeyCode::Backspace));
        handle_members_key(&mut sections, key(KeyCode::Enter));
        assert_eq!(sections.member_search.query, "siy");
        assert!(!sections.member_search.editing);

        assert!(handle_members_key(&mut sections, key(KeyCode::Esc)));
        assert!(sections.member_search.query.is_empty());
        assert!(!handle_members_key(&mut sections, key(KeyCode::Esc)));
    }

    fn type_into(sections: &mut SectionsState, text: &str) {
        for c in text.chars() {
            handle_groups_key(sections, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_group_form_open_and_dismiss() {
        let mut sections = SectionsState::default();
        assert_eq!(
            handle_groups_key(&mut sections, key(KeyCode::Char('x'))),
            GroupsKey::Ignored
        );
        assert_eq!(
            handle_groups_key(&mut sections, key(KeyCode::Char('a'))),
            GroupsKey::Consumed
        );
        // Shell keys are captured while the form is open.
        assert_eq!(
            handle_groups_key(&mut sections, key(KeyCode::Char('q'))),
            GroupsKey::Consumed
        );
        assert_eq!(sections.group_form.as_ref().unwrap().name, "q");

        handle_groups_key(&mut sections, key(KeyCode::Esc));
        assert!(sections.group_form.is_none());
    }

    #[test]
    fn test_group_form_requires_name() {
        let mut sections = SectionsState::default();
        handle_groups_key(&mut sections, key(KeyCode::Char('a')));
        handle_groups_key(&mut sections, key(KeyCode::Tab));
        handle_groups_key(&mut sections, key(KeyCode::Enter));

        let form = sections.group_form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("Group Name is required"));
        assert_eq!(form.focus, GroupField::Name);
        assert!(!form.submitting);
    }

    #[test]
    fn test_group_form_submits_payload() {
        let mut sections = SectionsState::default();
        handle_groups_key(&mut sections, key(KeyCode::Char('a')));
        type_into(&mut sections, "Simuka Savings");
        handle_groups_key(&mut sections, key(KeyCode::Tab));
        handle_groups_key(&mut sections, key(KeyCode::Right));
        handle_groups_key(&mut sections, key(KeyCode::Tab));
        type_into(&mut sections, "-17.8x");
        handle_groups_key(&mut sections, key(KeyCode::Backspace));
        handle_groups_key(&mut sections, key(KeyCode::Tab));
        type_into(&mut sections, "east");

        let GroupsKey::Submit(group) = handle_groups_key(&mut sections, key(KeyCode::Enter)) else {
            panic!("expected a submission");
        };
        assert_eq!(group.name, "Simuka Savings");
        assert_eq!(group.cluster_zone, "Waterfalls");
        assert!((group.location_lat + 17.8).abs() < f64::EPSILON);
        assert!(group.location_lng.abs() < f64::EPSILON);
        assert!(sections.group_form.as_ref().unwrap().submitting);

        // Input is ignored until the insert completes.
        handle_groups_key(&mut sections, key(KeyCode::Esc));
        assert!(sections.group_form.is_some());

        handle_group_added(&mut sections, Err("permission denied".into()));
        let form = sections.group_form.as_ref().unwrap();
        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some("permission denied"));

        handle_group_added(&mut sections, Ok(()));
        assert!(sections.group_form.is_none());
    }

    #[test]
    fn test_cluster_picker_wraps() {
        let mut form = GroupForm::default();
        assert_eq!(form.cluster_zone(), "Bulawayo");
        form.cycle_cluster(-1);
        assert_eq!(form.cluster_zone(), "Bindura");
        form.cycle_cluster(1);
        assert_eq!(form.cluster_zone(), "Bulawayo");
    }
}
