//! Write commands: register groups and record repayments.

use anyhow::{Context, Result};
use chiedza_core::config::Config;
use chiedza_core::records::{
    CLUSTER_ZONES, GROUPS_TABLE, LOAN_COLUMNS, LOAN_ORDER, LOANS_TABLE, Loan, NewGroup,
};

use super::signed_in_client;

pub async fn add_group(
    config: &Config,
    name: &str,
    cluster: Option<&str>,
    lat: &str,
    lng: &str,
) -> Result<()> {
    let group = NewGroup::from_input(name, cluster, lat, lng)?;
    if !CLUSTER_ZONES.contains(&group.cluster_zone.as_str()) {
        anyhow::bail!(
            "Unknown cluster zone '{}' (expected one of: {})",
            group.cluster_zone,
            CLUSTER_ZONES.join(", ")
        );
    }

    let client = signed_in_client(config).await?;
    client
        .insert(GROUPS_TABLE, &group)
        .await
        .context("register group")?;

    tracing::info!(name = %group.name, cluster = %group.cluster_zone, "Registered group");
    println!("Registered {} in {}", group.name, group.cluster_zone);
    Ok(())
}

pub async fn repay_loan(config: &Config, id: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        anyhow::bail!("Please enter a valid amount");
    }

    let client = signed_in_client(config).await?;
    let loans: Vec<Loan> = client
        .select(LOANS_TABLE, LOAN_COLUMNS, LOAN_ORDER)
        .await
        .context("fetch loans")?;
    let loan = loans
        .iter()
        .find(|loan| loan.id == id)
        .with_context(|| format!("Loan {id} not found"))?;

    let patch = loan.repayment(amount)?;
    client
        .update(LOANS_TABLE, &patch, "id", id)
        .await
        .context("record repayment")?;

    let currency = config.settings.currency;
    tracing::info!(loan = id, amount, "Recorded repayment");
    println!(
        "Recorded {} from {}. New balance: {} ({})",
        currency.format(amount),
        loan.member_name(),
        currency.format(patch.balance),
        patch.status
    );
    Ok(())
}
