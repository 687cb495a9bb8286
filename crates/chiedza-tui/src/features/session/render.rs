//! Login and loading screens.

use chiedza_core::config::PortalConfig;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{LoginField, SessionState};
use crate::common::mask_secret;
use crate::common::render_utils::{
    InputHint, InputLine, centered_area, render_hints, render_input_line, render_popup,
};

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn spinner(frame_index: usize) -> &'static str {
    SPINNER_FRAMES[frame_index % SPINNER_FRAMES.len()]
}

/// Shown while the bootstrap query is pending.
pub fn render_loading_screen(frame: &mut Frame, area: Rect, portal: &PortalConfig, tick: usize) {
    let box_area = centered_area(area, 40, 3);
    let line = Line::from(vec![
        Span::styled(spinner(tick), Style::default().fg(Color::Cyan)),
        Span::raw(format!(" Loading {}...", portal.org_name)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), box_area);
}

pub fn render_login_screen(
    frame: &mut Frame,
    area: Rect,
    state: &SessionState,
    portal: &PortalConfig,
) {
    let popup = centered_area(area, 56, 15);
    let inner = render_popup(frame, popup, &format!("{} Portal", portal.org_name), Color::Cyan);

    let [subtitle, _, email, password, _, button, _, error, _, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Secure Access for Staff & Directors",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        subtitle,
    );

    let form = &state.login;
    render_input_line(
        frame,
        email,
        &InputLine {
            label: "Email",
            value: &form.email,
            placeholder: Some(&portal.email_placeholder),
            focused: form.focus == LoginField::Email,
        },
    );
    let masked = mask_secret(&form.password);
    render_input_line(
        frame,
        password,
        &InputLine {
            label: "Password",
            value: &masked,
            placeholder: None,
            focused: form.focus == LoginField::Password,
        },
    );

    let (label, color) = if form.submitting {
        ("Verifying...", Color::Yellow)
    } else {
        ("Access Portal", Color::Green)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("[ {label} ]"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        button,
    );

    if let Some(message) = &form.error {
        frame.render_widget(
            Paragraph::new(Span::styled(message.clone(), Style::default().fg(Color::Red)))
                .wrap(ratatui::widgets::Wrap { trim: true }),
            error,
        );
    }

    render_hints(
        frame,
        hints,
        &[
            InputHint::new("Tab", "switch field"),
            InputHint::new("Enter", "sign in"),
            InputHint::new("Ctrl+D", "demo"),
            InputHint::new("Esc", "quit"),
        ],
        Color::Cyan,
    );
}
