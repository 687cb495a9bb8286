use chiedza_core::records::{duplicate_national_ids, filter_members, is_duplicate};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};

use super::{SectionView, header_style, panel, render_pending};
use crate::common::render_utils::{InputLine, render_input_line};

pub(super) fn render(frame: &mut Frame, area: Rect, view: &SectionView<'_>) {
    let data = &view.sections.members;
    let search = &view.sections.member_search;
    let block = panel("Beneficiaries", data);
    if render_pending(frame, area, block.clone(), data) {
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let [search_area, table_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

    render_input_line(
        frame,
        search_area,
        &InputLine {
            label: "Search",
            value: &search.query,
            placeholder: Some("press / to search by name or group"),
            focused: search.editing,
        },
    );

    let members = data.rows();
    let duplicates = duplicate_national_ids(members);
    let rows = filter_members(members, &search.query).into_iter().map(|member| {
        let duplicate = is_duplicate(member, &duplicates);
        let national_id = if duplicate {
            format!("{} ⚠ DUPLICATE", member.national_id)
        } else {
            member.national_id.clone()
        };
        let id_style = if duplicate {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let risk_style = if member.is_high_risk() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Row::new(vec![
            Cell::from(member.name.clone()),
            Cell::from(member.group_name().to_string()),
            Cell::from(national_id).style(id_style),
            Cell::from(member.risk_label()).style(risk_style),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(28),
            Constraint::Percentage(24),
            Constraint::Percentage(34),
            Constraint::Percentage(14),
        ],
    )
    .header(Row::new(vec!["Name", "Group", "National ID", "Risk"]).style(header_style()));
    frame.render_widget(table, table_area);
}
