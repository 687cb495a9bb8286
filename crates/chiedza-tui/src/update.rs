//! Portal reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use chiedza_core::datasets::DatasetKind;
use chiedza_core::records::NewGroup;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::navigation::Section;
use crate::features::sections::GroupsKey;
use crate::features::session::{self, SessionPhase, Transition};
use crate::features::{sections, settings};
use crate::state::AppState;

const DATASET_TASKS: [TaskKind; 3] = [
    TaskKind::LoadGroups,
    TaskKind::LoadMembers,
    TaskKind::LoadLoans,
];

/// Effects for the first frame: either the bootstrap query or, with `demo`,
/// straight into a demo session.
pub fn start(app: &mut AppState, demo: bool) -> Vec<UiEffect> {
    if demo {
        app.session.phase = SessionPhase::Unauthenticated;
        let transition = session::enter_demo_mode(&mut app.session);
        return apply_transition(app, transition);
    }

    let task = app.task_seq.next_id();
    app.tasks.bootstrap.begin(task);
    vec![UiEffect::Bootstrap { task }]
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tick = app.tick.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::BootstrapResult(result) => {
            let transition = session::handle_bootstrap_result(&mut app.session, result);
            apply_transition(app, transition)
        }
        UiEvent::SessionChanged(change) => {
            let transition = session::handle_session_changed(&mut app.session, change);
            apply_transition(app, transition)
        }
        UiEvent::LoginResult(result) => {
            session::handle_login_result(&mut app.session, result);
            vec![]
        }
        UiEvent::SignOutResult(result) => {
            if let Err(error) = result {
                tracing::warn!("Remote sign-out failed: {error}");
            }
            vec![]
        }
        UiEvent::DatasetLoaded(loaded) => {
            sections::handle_dataset_loaded(&mut app.sections, loaded);
            vec![]
        }
        UiEvent::SettingsSaved { settings, result } => {
            settings::handle_settings_saved(&mut app.settings, settings, result);
            vec![]
        }
        UiEvent::GroupAdded(result) => {
            let added = result.is_ok();
            sections::handle_group_added(&mut app.sections, result);
            if added {
                reload_groups(app)
            } else {
                vec![]
            }
        }
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, "Discarding stale task result");
                vec![]
            }
        }
    }
}

fn apply_transition(app: &mut AppState, transition: Transition) -> Vec<UiEffect> {
    match transition {
        Transition::None | Transition::Refreshed => vec![],
        Transition::SignedIn => {
            let mut effects = reset_shell(app);
            effects.extend(request_datasets(app, false));
            effects
        }
        Transition::SignedOut => reset_shell(app),
    }
}

/// Defaults for navigation and section data; in-flight fetches are cancelled
/// and their results will be discarded.
fn reset_shell(app: &mut AppState) -> Vec<UiEffect> {
    app.nav.reset_on_logout();
    app.sections.reset();

    let mut effects = Vec::new();
    for kind in DATASET_TASKS.into_iter().chain([TaskKind::AddGroup]) {
        if let Some(token) = app.tasks.state_mut(kind).clear() {
            effects.push(UiEffect::CancelTask { token });
        }
    }
    effects
}

/// Starts fetches for the active section's datasets. With `force`, loaded
/// datasets are fetched again.
fn request_datasets(app: &mut AppState, force: bool) -> Vec<UiEffect> {
    let section = app.nav.active_section;
    let kinds = if force {
        sections::claim_reload(&mut app.sections, section)
    } else {
        sections::claim_missing(&mut app.sections, section)
    };

    let demo = app.session.is_demo();
    let mut effects = Vec::new();
    for kind in kinds {
        effects.extend(start_fetch(app, kind, demo));
    }
    effects
}

fn start_fetch(app: &mut AppState, kind: DatasetKind, demo: bool) -> Vec<UiEffect> {
    let task = app.task_seq.next_id();
    let state = app.tasks.state_mut(TaskKind::for_dataset(kind));
    let previous = state.clear();
    state.begin(task);

    let mut effects = Vec::new();
    if let Some(token) = previous {
        effects.push(UiEffect::CancelTask { token });
    }
    effects.push(UiEffect::LoadDataset { task, kind, demo });
    effects
}

fn reload_groups(app: &mut AppState) -> Vec<UiEffect> {
    let demo = app.session.is_demo();
    let mut effects = Vec::new();
    for kind in sections::claim_reload(&mut app.sections, Section::Groups) {
        effects.extend(start_fetch(app, kind, demo));
    }
    effects
}

/// Registers a validated group: remotely for real sessions, in the loaded
/// dataset for demo sessions.
fn add_group(app: &mut AppState, group: NewGroup) -> Vec<UiEffect> {
    if app.session.is_demo() {
        app.sections.append_local_group(&group);
        sections::handle_group_added(&mut app.sections, Ok(()));
        return vec![];
    }

    let task = app.task_seq.next_id();
    app.tasks.add_group.begin(task);
    vec![UiEffect::AddGroup { task, group }]
}

fn logout(app: &mut AppState) -> Vec<UiEffect> {
    let Some(cleared) = session::logout(&mut app.session) else {
        return vec![];
    };
    tracing::info!(demo = cleared.is_demo, "Logged out");

    let mut effects = reset_shell(app);
    if let Some(token) = app.tasks.login.clear() {
        effects.push(UiEffect::CancelTask { token });
    }
    if !cleared.is_demo {
        let task = app.task_seq.next_id();
        app.tasks.sign_out.begin(task);
        effects.push(UiEffect::SignOut { task });
    }
    effects
}

fn select_section(app: &mut AppState, id: &str) -> Vec<UiEffect> {
    if app.nav.select_section(id).is_none() {
        return vec![];
    }
    request_datasets(app, false)
}

// ============================================================================
// Terminal input
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        _ => vec![],
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if is_ctrl(&key, 'c') {
        return vec![UiEffect::Quit];
    }

    match app.session.phase {
        SessionPhase::Loading => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => vec![UiEffect::Quit],
            _ => vec![],
        },
        SessionPhase::Unauthenticated => handle_login_key(app, key),
        SessionPhase::Authenticated(_) => handle_shell_key(app, key),
    }
}

fn handle_login_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if is_ctrl(&key, 'd') {
        let transition = session::enter_demo_mode(&mut app.session);
        return apply_transition(app, transition);
    }

    match key.code {
        KeyCode::Esc => return vec![UiEffect::Quit],
        KeyCode::Enter => {
            let Some((email, password)) = session::submit_login(&mut app.session) else {
                return vec![];
            };
            let task = app.task_seq.next_id();
            app.tasks.login.begin(task);
            return vec![UiEffect::SignIn {
                task,
                email,
                password,
            }];
        }
        _ => {}
    }

    let form = &mut app.session.login;
    if form.submitting {
        return vec![];
    }
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.focus = form.focus.toggle();
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.insert_char(c);
        }
        _ => {}
    }
    vec![]
}

fn handle_shell_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if app.nav.profile_menu_open {
        return match key.code {
            KeyCode::Char('l') => logout(app),
            KeyCode::Esc | KeyCode::Char('p') => {
                app.nav.toggle_profile_menu();
                vec![]
            }
            KeyCode::Char('q') => vec![UiEffect::Quit],
            _ => vec![],
        };
    }

    if app.nav.mobile_menu_open {
        return match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                app.nav.move_drawer_cursor(-1);
                vec![]
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.nav.move_drawer_cursor(1);
                vec![]
            }
            KeyCode::Enter => {
                let section = app.nav.select_drawer_entry();
                select_section(app, section.id())
            }
            KeyCode::Esc | KeyCode::Char('m') => {
                app.nav.toggle_mobile_menu();
                vec![]
            }
            KeyCode::Char('q') => vec![UiEffect::Quit],
            _ => vec![],
        };
    }

    match app.nav.active_section {
        Section::Groups => match sections::handle_groups_key(&mut app.sections, key) {
            GroupsKey::Ignored => {}
            GroupsKey::Consumed => return vec![],
            GroupsKey::Submit(group) => return add_group(app, group),
        },
        Section::Members => {
            if sections::handle_members_key(&mut app.sections, key) {
                return vec![];
            }
        }
        Section::Settings => {
            if let Some(values) = settings::handle_settings_key(&mut app.settings, key) {
                let task = app.task_seq.next_id();
                app.tasks.save_settings.begin(task);
                return vec![UiEffect::SaveSettings {
                    task,
                    settings: values,
                    path: app.config_path.clone(),
                }];
            }
        }
        _ => {}
    }

    match key.code {
        KeyCode::Char(c @ '1'..='7') => {
            let index = (c as usize) - ('1' as usize);
            let id = Section::ALL[index].id();
            select_section(app, id)
        }
        KeyCode::Tab => {
            app.nav.cycle(1);
            request_datasets(app, false)
        }
        KeyCode::BackTab => {
            app.nav.cycle(-1);
            request_datasets(app, false)
        }
        KeyCode::Char('m') => {
            app.nav.toggle_mobile_menu();
            vec![]
        }
        KeyCode::Char('p') => {
            app.nav.toggle_profile_menu();
            vec![]
        }
        KeyCode::Char('L') => logout(app),
        KeyCode::Char('r') => request_datasets(app, true),
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => vec![],
    }
}
