use chiedza_core::records::StrategicSummary;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Row, Table};

use super::{SectionView, header_style, panel, render_pending};

pub(super) fn render(frame: &mut Frame, area: Rect, view: &SectionView<'_>) {
    let sections = view.sections;
    let [metrics_area, coverage_area] =
        Layout::vertical([Constraint::Length(10), Constraint::Min(0)]).areas(area);

    let metrics_block = panel("Strategic Impact & Financial Health", &sections.loans);
    if render_pending(frame, metrics_area, metrics_block.clone(), &sections.loans) {
        return;
    }

    let summary = StrategicSummary::build(
        sections.groups.rows(),
        sections.members.rows(),
        sections.loans.rows(),
        view.today,
    );

    let metric_rows = summary
        .metric_rows(view.org().currency)
        .into_iter()
        .map(|(metric, value)| Row::new(vec![metric.to_string(), value]));
    let metrics = Table::new(metric_rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .header(Row::new(vec!["Metric", "Current Status"]).style(header_style()))
        .block(metrics_block);
    frame.render_widget(metrics, metrics_area);

    let coverage_block = panel("Geographic Cluster Intelligence", &sections.groups);
    let coverage_rows = summary.coverage.iter().map(|zone| {
        Row::new(vec![
            zone.zone.clone(),
            zone.groups.to_string(),
            zone.members.to_string(),
        ])
    });
    let coverage = Table::new(
        coverage_rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ],
    )
    .header(Row::new(vec!["Zone", "Groups", "Members"]).style(header_style()))
    .block(coverage_block);
    frame.render_widget(coverage, coverage_area);
}
