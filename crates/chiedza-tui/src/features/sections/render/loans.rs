use chiedza_core::records::{LoanStatus, PortfolioStats};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use super::{SectionView, format_date, header_style, panel, render_pending};

fn status_style(status: LoanStatus) -> Style {
    match status {
        LoanStatus::Active => Style::default().fg(Color::Green),
        LoanStatus::Overdue => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LoanStatus::Paid => Style::default().fg(Color::DarkGray),
    }
}

pub(super) fn render(frame: &mut Frame, area: Rect, view: &SectionView<'_>) {
    let data = &view.sections.loans;
    let block = panel("Loan Portfolio", data);
    if render_pending(frame, area, block.clone(), data) {
        return;
    }

    let currency = view.org().currency;
    let stats = PortfolioStats::compute(data.rows(), view.today);
    let [stats_area, table_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let stats_line = Line::from(vec![
        Span::raw(" Total Outstanding: "),
        Span::styled(
            currency.format(stats.total_outstanding),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Active Loans: "),
        Span::styled(
            stats.active_loans.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   At Risk (Overdue): "),
        Span::styled(
            stats.overdue_loans.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(stats_line).block(block), stats_area);

    let threshold = i64::from(view.org().risk_threshold_days);
    let rows = data.rows().iter().map(|loan| {
        let status = loan.status_on(view.today);
        let days_overdue = loan.days_overdue(view.today);
        let status_text = match status {
            LoanStatus::Overdue if days_overdue > threshold => {
                format!("⚠ OVERDUE {days_overdue}d")
            }
            LoanStatus::Overdue => format!("OVERDUE {days_overdue}d"),
            other => other.label().to_uppercase(),
        };
        let borrower = match loan.member_phone() {
            "" => loan.member_name().to_string(),
            phone => format!("{} ({phone})", loan.member_name()),
        };
        Row::new(vec![
            Cell::from(borrower),
            Cell::from(loan.group_name().to_string()),
            Cell::from(currency.format(loan.balance)),
            Cell::from(format_date(loan.due_date)),
            Cell::from(status_text).style(status_style(status)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(32),
            Constraint::Percentage(20),
            Constraint::Percentage(16),
            Constraint::Percentage(16),
            Constraint::Percentage(16),
        ],
    )
    .header(
        Row::new(vec!["Member", "Group", "Balance", "Due Date", "Status"]).style(header_style()),
    )
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(table, table_area);
}
