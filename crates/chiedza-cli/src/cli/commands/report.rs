//! Report command: prints the portal's tables to stdout.

use anyhow::Result;
use chiedza_core::config::{Config, Currency};
use chiedza_core::datasets::{self, Dataset};
use chiedza_core::records::{Loan, SavingsGroup, StrategicSummary};
use chiedza_core::remote::Client;
use chrono::Local;
use comfy_table::{ContentArrangement, Table};

use super::remote_client;
use crate::cli::ReportKind;

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn note_sample<T>(dataset: &Dataset<T>, name: &str, printed: &mut bool) {
    if dataset.is_sample() && !*printed {
        println!("Note: showing sample data ({name} unavailable).");
        *printed = true;
    }
}

pub async fn run(config: &Config, kind: ReportKind, demo: bool) -> Result<()> {
    let client: Option<Client> = if demo || !config.remote.is_configured() {
        None
    } else {
        Some(remote_client(config)?)
    };
    let client = client.as_ref();
    let currency = config.settings.currency;
    let today = Local::now().date_naive();
    let mut noted = false;

    match kind {
        ReportKind::Strategic => {
            let groups = datasets::load_groups(client).await;
            let members = datasets::load_members(client).await;
            let loans = datasets::load_loans(client).await;
            note_sample(&groups, "groups", &mut noted);
            note_sample(&members, "members", &mut noted);
            note_sample(&loans, "loans", &mut noted);

            let summary = StrategicSummary::build(&groups.rows, &members.rows, &loans.rows, today);
            println!("{}", strategic_table(&summary, currency));
            println!("{}", coverage_table(&summary));
        }
        ReportKind::Groups => {
            let groups = datasets::load_groups(client).await;
            note_sample(&groups, "groups", &mut noted);
            println!("{}", groups_table(&groups.rows));
        }
        ReportKind::Loans => {
            let loans = datasets::load_loans(client).await;
            note_sample(&loans, "loans", &mut noted);
            println!("{}", loans_table(&loans.rows, currency, today));
        }
    }
    Ok(())
}

fn strategic_table(summary: &StrategicSummary, currency: Currency) -> Table {
    let mut table = table(&["Metric", "Value"]);
    for (metric, value) in summary.metric_rows(currency) {
        table.add_row(vec![metric.to_string(), value]);
    }
    table
}

fn coverage_table(summary: &StrategicSummary) -> Table {
    let mut table = table(&["Cluster Zone", "Groups", "Members"]);
    for row in &summary.coverage {
        table.add_row(vec![
            row.zone.clone(),
            row.groups.to_string(),
            row.members.to_string(),
        ]);
    }
    table
}

fn groups_table(groups: &[SavingsGroup]) -> Table {
    let mut table = table(&["Name", "Cluster Zone", "Members", "Status"]);
    for group in groups {
        table.add_row(vec![
            group.name.clone(),
            group.cluster_zone.clone(),
            group.member_count().to_string(),
            group.status.clone(),
        ]);
    }
    table
}

fn loans_table(loans: &[Loan], currency: Currency, today: chrono::NaiveDate) -> Table {
    let mut table = table(&["Id", "Member", "Phone", "Group", "Balance", "Due", "Status"]);
    for loan in loans {
        let due = loan
            .due_date
            .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
        table.add_row(vec![
            loan.id.clone(),
            loan.member_name().to_string(),
            loan.member_phone().to_string(),
            loan.group_name().to_string(),
            currency.format(loan.balance),
            due,
            loan.status_on(today).label().to_string(),
        ]);
    }
    table
}
