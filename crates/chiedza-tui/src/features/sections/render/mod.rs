//! One renderer per section. Each reads only its own datasets and the org
//! settings.

mod dashboard;
mod groups;
mod loans;
mod map;
mod members;
mod reports;

use chiedza_core::config::OrgSettings;
use chiedza_core::remote::Role;
use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{Loadable, SectionsState};
use crate::common::render_utils::sample_badge;
use crate::features::navigation::Section;
use crate::features::settings::{SettingsState, render_settings};

/// Everything a section renderer may read.
pub struct SectionView<'a> {
    pub sections: &'a SectionsState,
    pub settings: &'a SettingsState,
    pub role: Role,
    pub today: NaiveDate,
}

impl SectionView<'_> {
    pub fn org(&self) -> &OrgSettings {
        &self.settings.values
    }
}

pub fn render_section(frame: &mut Frame, area: Rect, section: Section, view: &SectionView<'_>) {
    match section {
        Section::Dashboard => dashboard::render(frame, area, view),
        Section::Groups => groups::render(frame, area, view),
        Section::Loans => loans::render(frame, area, view),
        Section::Members => members::render(frame, area, view),
        Section::Map => map::render(frame, area, view),
        Section::Reports => reports::render(frame, area, view),
        Section::Settings => render_settings(frame, area, view.settings),
    }
}

/// Bordered panel whose title carries the sample-data badge when needed.
fn panel<T>(title: &str, data: &Loadable<T>) -> Block<'static> {
    let mut spans = vec![Span::styled(
        format!(" {title} "),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if data.is_sample() {
        spans.push(sample_badge());
    }
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(Line::from(spans))
}

/// Draws a placeholder while `data` is not loaded. Returns true if drawn.
fn render_pending<T>(
    frame: &mut Frame,
    area: Rect,
    block: Block<'static>,
    data: &Loadable<T>,
) -> bool {
    let message = match data {
        Loadable::Loaded(_) => return false,
        Loadable::Loading => "Loading...",
        Loadable::NotLoaded => "Press r to load.",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray))).block(block),
        area,
    );
    true
}

fn header_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

/// `DD Mon YYYY`, or `-` when missing.
fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%d %b %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2026, 2, 5)), "05 Feb 2026");
        assert_eq!(format_date(None), "-");
    }
}
