//! Domain records stored in the remote tables.
//!
//! Rows arrive as PostgREST JSON with embedded relations, e.g. a loan row
//! carries `members (name, phone)` and `savings_groups (name)`.

mod group;
mod loan;
mod member;
mod portfolio;

pub use group::{CLUSTER_ZONES, DEFAULT_CLUSTER, NewGroup, SavingsGroup};
pub use loan::{Loan, LoanStatus, RepaymentPatch};
pub use member::{Member, duplicate_national_ids, filter_members, is_duplicate};
pub use portfolio::{ClusterCoverage, PortfolioStats, StrategicSummary, cluster_coverage};

use serde::{Deserialize, Deserializer};

/// Table holding savings groups.
pub const GROUPS_TABLE: &str = "savings_groups";
/// Table holding beneficiaries.
pub const MEMBERS_TABLE: &str = "members";
/// Table holding loans.
pub const LOANS_TABLE: &str = "loans";

/// `select` for groups, with the member count relation.
pub const GROUP_COLUMNS: &str = "*, members(count)";
/// `select` for members, with the group name.
pub const MEMBER_COLUMNS: &str = "*, savings_groups (name)";
/// `select` for loans, with borrower and group.
pub const LOAN_COLUMNS: &str = "*, members (name, phone), savings_groups (name)";

pub const GROUP_ORDER: &str = "name.asc";
pub const MEMBER_ORDER: &str = "name.asc";
pub const LOAN_ORDER: &str = "due_date.asc";

/// Embedded `savings_groups (name)` relation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GroupRef {
    #[serde(default)]
    pub name: String,
}

/// Embedded `members (name, phone)` relation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MemberRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Row ids are integers in some deployments and uuids in others; both are
/// kept as strings.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Str(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Str(s) => s,
    })
}

/// Treats `null` as the type's default.
fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
