//! Dataset loading with fixture fallback.
//!
//! Without a client (demo mode) every dataset is fixture data. With one, the
//! remote table is queried; a failed or empty query falls back to fixtures
//! and the result is marked as sample data.

use serde::de::DeserializeOwned;

use crate::fixtures;
use crate::records::{
    GROUP_COLUMNS, GROUP_ORDER, GROUPS_TABLE, LOAN_COLUMNS, LOAN_ORDER, LOANS_TABLE, Loan,
    MEMBER_COLUMNS, MEMBER_ORDER, MEMBERS_TABLE, Member, SavingsGroup,
};
use crate::remote::Client;

/// Where a dataset's rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Sample,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    pub rows: Vec<T>,
    pub source: Source,
}

impl<T> Dataset<T> {
    pub fn sample(rows: Vec<T>) -> Self {
        Self {
            rows,
            source: Source::Sample,
        }
    }

    pub fn is_sample(&self) -> bool {
        self.source == Source::Sample
    }
}

/// The three tables the portal reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Groups,
    Members,
    Loans,
}

impl DatasetKind {
    pub fn table(self) -> &'static str {
        match self {
            DatasetKind::Groups => GROUPS_TABLE,
            DatasetKind::Members => MEMBERS_TABLE,
            DatasetKind::Loans => LOANS_TABLE,
        }
    }
}

async fn fetch_or_sample<T: DeserializeOwned>(
    client: Option<&Client>,
    table: &str,
    columns: &str,
    order: &str,
    sample: fn() -> Vec<T>,
) -> Dataset<T> {
    let Some(client) = client else {
        return Dataset::sample(sample());
    };

    match client.select::<T>(table, columns, order).await {
        Ok(rows) if !rows.is_empty() => {
            tracing::debug!(table, rows = rows.len(), "Fetched rows");
            Dataset {
                rows,
                source: Source::Remote,
            }
        }
        Ok(_) => {
            tracing::info!(table, "No rows, using sample data");
            Dataset::sample(sample())
        }
        Err(e) => {
            tracing::warn!(table, "Fetch failed, using sample data: {e:#}");
            Dataset::sample(sample())
        }
    }
}

pub async fn load_groups(client: Option<&Client>) -> Dataset<SavingsGroup> {
    fetch_or_sample(client, GROUPS_TABLE, GROUP_COLUMNS, GROUP_ORDER, fixtures::groups).await
}

pub async fn load_members(client: Option<&Client>) -> Dataset<Member> {
    fetch_or_sample(client, MEMBERS_TABLE, MEMBER_COLUMNS, MEMBER_ORDER, fixtures::members).await
}

pub async fn load_loans(client: Option<&Client>) -> Dataset<Loan> {
    fetch_or_sample(client, LOANS_TABLE, LOAN_COLUMNS, LOAN_ORDER, fixtures::loans).await
}
