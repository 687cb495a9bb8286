//! Shell chrome: header, sidebar, drawer and profile menu.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{NavigationState, Section};
use crate::common::render_utils::render_popup;
use crate::common::truncate_with_ellipsis;
use crate::features::session::Session;

pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    org_name: &str,
    nav: &NavigationState,
    session: &Session,
) {
    let identity = &session.identity;
    let mut right = vec![
        Span::styled(identity.email.clone(), Style::default().fg(Color::White)),
        Span::styled(
            format!(" · {}", identity.role.label()),
            Style::default().fg(Color::Gray),
        ),
    ];
    if session.is_demo {
        right.push(Span::raw(" "));
        right.push(Span::styled(
            " DEMO ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }
    let right_width: usize = right.iter().map(|s| s.width()).sum();

    let left = format!(" {org_name} › {}", nav.active_section.label());
    let left_width = (area.width as usize).saturating_sub(right_width + 2);
    let left = truncate_with_ellipsis(&left, left_width);
    let padding = (area.width as usize)
        .saturating_sub(unicode_width::UnicodeWidthStr::width(left.as_str()) + right_width + 1);

    let mut spans = vec![
        Span::styled(
            left,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding)),
    ];
    spans.extend(right);
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
        area,
    );
}

fn section_lines(active: Section, cursor: Option<usize>) -> Vec<Line<'static>> {
    Section::ALL
        .iter()
        .enumerate()
        .map(|(idx, section)| {
            let is_active = *section == active;
            let is_cursor = cursor == Some(idx);
            let pointer = if is_cursor { "›" } else { " " };
            let style = if is_active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if is_cursor {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(
                    format!("{pointer}{} ", idx + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(section.label(), style),
            ])
        })
        .collect()
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, nav: &NavigationState) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(section_lines(nav.active_section, None)).block(block),
        area,
    );
}

/// Section drawer, drawn over the left edge of `area`.
pub fn render_drawer(frame: &mut Frame, area: Rect, nav: &NavigationState) {
    let height = (Section::ALL.len() as u16 + 2).min(area.height);
    let popup = Rect::new(area.x, area.y, 26.min(area.width), height);
    let inner = render_popup(frame, popup, "Menu", Color::Cyan);
    frame.render_widget(
        Paragraph::new(section_lines(nav.active_section, Some(nav.drawer_cursor))),
        inner,
    );
}

/// Profile menu, drawn in the top-right corner of `area`.
pub fn render_profile_menu(frame: &mut Frame, area: Rect, session: &Session) {
    let width = 34.min(area.width);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width),
        area.y,
        width,
        7.min(area.height),
    );
    let inner = render_popup(frame, popup, "Profile", Color::Magenta);

    let identity = &session.identity;
    let mode = if session.is_demo { "Demo session" } else { "Signed in" };
    let lines = vec![
        Line::from(Span::styled(
            truncate_with_ellipsis(&identity.email, inner.width as usize),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(identity.role.label(), Style::default().fg(Color::Gray))),
        Line::from(Span::styled(mode, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("l", Style::default().fg(Color::Magenta)),
            Span::raw(" Log out"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
