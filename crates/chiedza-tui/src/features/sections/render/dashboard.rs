use chiedza_core::records::StrategicSummary;
use chiedza_core::remote::Role;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::{SectionView, panel, render_pending};

fn role_banner(role: Role) -> Line<'static> {
    let (bg, text) = match role {
        Role::Director => (Color::DarkGray, "Strategic Overview & High Level Risk"),
        Role::FieldOfficer => (Color::Blue, "Operational Field View"),
    };
    Line::from(vec![
        Span::styled(
            format!(" {} Dashboard: ", role.label()),
            Style::default().bg(bg).fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{text} "), Style::default().bg(bg).fg(Color::White)),
    ])
}

fn stat_card(frame: &mut Frame, area: Rect, title: &str, value: String, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(format!(" {title} "), Style::default().fg(Color::Gray)));
    let para = Paragraph::new(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .block(block);
    frame.render_widget(para, area);
}

pub(super) fn render(frame: &mut Frame, area: Rect, view: &SectionView<'_>) {
    let sections = view.sections;
    let [banner, cards_top, cards_bottom, clusters] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(role_banner(view.role)), banner);

    let summary = StrategicSummary::build(
        sections.groups.rows(),
        sections.members.rows(),
        sections.loans.rows(),
        view.today,
    );
    let currency = view.org().currency;
    let loading = sections.groups.is_loading()
        || sections.members.is_loading()
        || sections.loans.is_loading();
    let value = |v: String| if loading { "…".to_string() } else { v };

    let [a, b, c] = Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(cards_top);
    stat_card(frame, a, "Beneficiaries", value(summary.beneficiaries.to_string()), Color::White);
    stat_card(
        frame,
        b,
        "Outstanding Portfolio",
        value(currency.format(summary.stats.total_outstanding)),
        Color::White,
    );
    let par = summary.stats.portfolio_at_risk();
    let par_color = if par > 5.0 { Color::Red } else { Color::Green };
    stat_card(frame, c, "Portfolio at Risk", value(format!("{par:.1}%")), par_color);

    let [d, e, f] = Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(cards_bottom);
    stat_card(
        frame,
        d,
        "Active Loans",
        value(summary.stats.active_loans.to_string()),
        Color::White,
    );
    stat_card(
        frame,
        e,
        "Overdue Loans",
        value(summary.stats.overdue_loans.to_string()),
        Color::Red,
    );
    stat_card(frame, f, "Savings Groups", value(summary.groups.to_string()), Color::White);

    let block = panel("Groups per Cluster", &sections.groups);
    if render_pending(frame, clusters, block.clone(), &sections.groups) {
        return;
    }
    let coverage = &summary.coverage;
    let max = coverage.iter().map(|c| c.groups).max().unwrap_or(1).max(1);
    let bar_width = (clusters.width as usize).saturating_sub(30).max(1);
    let lines: Vec<Line> = coverage
        .iter()
        .map(|zone| {
            let filled = zone.groups * bar_width / max;
            Line::from(vec![
                Span::raw(format!("{:<14}", zone.zone)),
                Span::styled("█".repeat(filled.max(1)), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {} groups", zone.groups)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), clusters);
}
