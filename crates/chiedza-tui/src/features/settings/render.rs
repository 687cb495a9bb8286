use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{SaveStatus, SettingsState};
use crate::common::render_utils::titled_block;

fn row(label: &str, value: String, keys: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<28}"), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{value:<12}"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys.to_string(), Style::default().fg(Color::DarkGray)),
    ])
}

pub fn render_settings(frame: &mut Frame, area: Rect, state: &SettingsState) {
    let values = &state.values;
    let mut lines = vec![
        Line::from(Span::styled(
            "Finance",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        row("Base Currency", values.currency.code().to_string(), "c cycle"),
        row(
            "Default Interest Rate",
            format!("{}%", values.interest_rate),
            "+/- adjust",
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Risk",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        row(
            "PAR Threshold",
            format!("{} days", values.risk_threshold_days),
            "]/[ adjust",
        ),
        row(
            "Email Alerts",
            if values.email_alerts { "On" } else { "Off" }.to_string(),
            "a toggle",
        ),
        Line::from(""),
    ];

    let status = if state.saving {
        Span::styled("Saving...", Style::default().fg(Color::Yellow))
    } else {
        match &state.status {
            Some(SaveStatus::Saved) => {
                Span::styled("Settings saved.", Style::default().fg(Color::Green))
            }
            Some(SaveStatus::Failed(error)) => Span::styled(
                format!("Save failed: {error}"),
                Style::default().fg(Color::Red),
            ),
            None if state.is_dirty() => Span::styled(
                "Unsaved changes. Press s to save.",
                Style::default().fg(Color::Yellow),
            ),
            None => Span::styled("Press s to save.", Style::default().fg(Color::DarkGray)),
        }
    };
    lines.push(Line::from(status));

    let para = Paragraph::new(lines).block(titled_block("Organisation Settings", Color::Blue));
    frame.render_widget(para, area);
}
