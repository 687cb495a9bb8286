//! Top-level view. Pure: reads `AppState`, draws a frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::render_utils::{InputHint, render_hints};
use crate::features::navigation::{
    NavigationState, Section, render_drawer, render_header, render_profile_menu, render_sidebar,
};
use crate::features::sections::{SectionView, render_section};
use crate::features::session::{
    Session, SessionPhase, render_loading_screen, render_login_screen, spinner,
};
use crate::state::AppState;

/// Below this width the sidebar is hidden and `m` opens the drawer instead.
const SIDEBAR_MIN_WIDTH: u16 = 90;
const SIDEBAR_WIDTH: u16 = 22;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match &app.session.phase {
        SessionPhase::Loading => render_loading_screen(frame, area, &app.portal, app.tick),
        SessionPhase::Unauthenticated => {
            render_login_screen(frame, area, &app.session, &app.portal);
        }
        SessionPhase::Authenticated(session) => render_shell(app, session, frame, area),
    }
}

fn render_shell(app: &AppState, session: &Session, frame: &mut Frame, area: Rect) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, &app.portal.org_name, &app.nav, session);

    let content = if body.width >= SIDEBAR_MIN_WIDTH {
        let [sidebar, content] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(body);
        render_sidebar(frame, sidebar, &app.nav);
        content
    } else {
        body
    };

    let view = SectionView {
        sections: &app.sections,
        settings: &app.settings,
        role: session.identity.role,
        today: app.today,
    };
    render_section(frame, content, app.nav.active_section, &view);

    render_footer(app, frame, footer);

    if app.nav.mobile_menu_open {
        render_drawer(frame, body, &app.nav);
    }
    if app.nav.profile_menu_open {
        render_profile_menu(frame, body, session);
    }
}

fn render_footer(app: &AppState, frame: &mut Frame, area: Rect) {
    let busy = app.tasks.is_any_running();
    let [status, hints] =
        Layout::horizontal([Constraint::Length(3), Constraint::Min(0)]).areas(area);
    if busy {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", spinner(app.tick)),
                Style::default().fg(Color::Cyan),
            ))),
            status,
        );
    }

    render_hints(frame, hints, &footer_hints(&app.nav), Color::Cyan);
}

fn footer_hints(nav: &NavigationState) -> Vec<InputHint<'static>> {
    if nav.profile_menu_open {
        return vec![InputHint::new("l", "log out"), InputHint::new("Esc", "close")];
    }
    if nav.mobile_menu_open {
        return vec![
            InputHint::new("↑↓", "move"),
            InputHint::new("Enter", "open"),
            InputHint::new("Esc", "close"),
        ];
    }

    let mut hints = vec![
        InputHint::new("1-7", "sections"),
        InputHint::new("m", "menu"),
        InputHint::new("p", "profile"),
        InputHint::new("r", "reload"),
    ];
    match nav.active_section {
        Section::Groups => hints.push(InputHint::new("a", "add group")),
        Section::Members => hints.push(InputHint::new("/", "search")),
        Section::Settings => hints.push(InputHint::new("s", "save")),
        _ => {}
    }
    hints.push(InputHint::new("q", "quit"));
    hints
}
