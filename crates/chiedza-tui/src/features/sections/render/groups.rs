use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, Wrap};

use super::{SectionView, header_style, panel, render_pending};
use crate::common::render_utils::{
    InputHint, InputLine, centered_area, render_hints, render_input_line, render_popup,
};
use crate::features::sections::{GroupField, GroupForm};

pub(super) fn render(frame: &mut Frame, area: Rect, view: &SectionView<'_>) {
    render_table(frame, area, view);
    if let Some(form) = &view.sections.group_form {
        render_form(frame, area, form);
    }
}

fn render_table(frame: &mut Frame, area: Rect, view: &SectionView<'_>) {
    let data = &view.sections.groups;
    let block = panel("Savings Groups", data);
    if render_pending(frame, area, block.clone(), data) {
        return;
    }

    let rows = data.rows().iter().map(|group| {
        let status = if group.status.is_empty() { "active" } else { group.status.as_str() };
        Row::new(vec![
            Cell::from(group.name.clone()),
            Cell::from(group.cluster_zone.clone()),
            Cell::from(group.member_count().to_string()),
            Cell::from(status.to_uppercase()).style(Style::default().fg(Color::Green)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
        ],
    )
    .header(Row::new(vec!["Group", "Cluster Zone", "Members", "Status"]).style(header_style()))
    .block(block);
    frame.render_widget(table, area);
}

fn render_form(frame: &mut Frame, area: Rect, form: &GroupForm) {
    let popup = centered_area(area, 52, 11);
    let inner = render_popup(frame, popup, "Register New Group", Color::Green);
    let [name, cluster, lat, lng, _, status, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_input_line(
        frame,
        name,
        &InputLine {
            label: "Name",
            value: &form.name,
            placeholder: Some("e.g. Siyaphambili Savings"),
            focused: form.focus == GroupField::Name,
        },
    );

    let picker_color = if form.focus == GroupField::Cluster {
        Color::Cyan
    } else {
        Color::Gray
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{:<10}", "Cluster"), Style::default().fg(picker_color)),
            Span::styled(
                format!("◀ {} Cluster ▶", form.cluster_zone()),
                Style::default().fg(Color::White),
            ),
        ])),
        cluster,
    );

    render_input_line(
        frame,
        lat,
        &InputLine {
            label: "Latitude",
            value: &form.lat,
            placeholder: None,
            focused: form.focus == GroupField::Latitude,
        },
    );
    render_input_line(
        frame,
        lng,
        &InputLine {
            label: "Longitude",
            value: &form.lng,
            placeholder: None,
            focused: form.focus == GroupField::Longitude,
        },
    );

    let message = if form.submitting {
        Some(Span::styled(
            "Saving...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        form.error
            .clone()
            .map(|e| Span::styled(e, Style::default().fg(Color::Red)))
    };
    if let Some(message) = message {
        frame.render_widget(Paragraph::new(message).wrap(Wrap { trim: true }), status);
    }

    render_hints(
        frame,
        hints,
        &[
            InputHint::new("Tab", "field"),
            InputHint::new("←→", "cluster"),
            InputHint::new("Enter", "save"),
            InputHint::new("Esc", "cancel"),
        ],
        Color::Green,
    );
}
