use std::collections::BTreeMap;

use chiedza_core::fixtures::MAP_CENTER;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{SectionView, panel, render_pending};

pub(super) fn render(frame: &mut Frame, area: Rect, view: &SectionView<'_>) {
    let data = &view.sections.groups;
    let block = panel("GIS Cluster Map", data);
    if render_pending(frame, area, block.clone(), data) {
        return;
    }

    let mut zones: BTreeMap<&str, Vec<_>> = BTreeMap::new();
    for group in data.rows().iter().filter(|g| g.has_location()) {
        zones.entry(group.cluster_zone.as_str()).or_default().push(group);
    }

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Centre {:.4}, {:.4}", MAP_CENTER.0, MAP_CENTER.1),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    if zones.is_empty() {
        lines.push(Line::from("No groups have coordinates yet."));
    }
    for (zone, groups) in zones {
        let zone = if zone.is_empty() { "Unassigned" } else { zone };
        lines.push(Line::from(Span::styled(
            format!("{zone} ({})", groups.len()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for group in groups {
            lines.push(Line::from(vec![
                Span::styled("  ● ", Style::default().fg(Color::Green)),
                Span::raw(format!("{:<20}", group.name)),
                Span::styled(
                    format!("{:>9.4}, {:>9.4}", group.location_lat, group.location_lng),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
