use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{GroupRef, MemberRef, de_id, de_null_default};

/// Display status of a loan, derived from its raw status and due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanStatus {
    Active,
    Overdue,
    Paid,
}

impl LoanStatus {
    pub fn label(self) -> &'static str {
        match self {
            LoanStatus::Active => "Active",
            LoanStatus::Overdue => "Overdue",
            LoanStatus::Paid => "Paid",
        }
    }
}

/// A loan row with its member and group relations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Loan {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub balance: f64,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub status: String,
    #[serde(default)]
    pub members: Option<MemberRef>,
    #[serde(default)]
    pub savings_groups: Option<GroupRef>,
}

impl Loan {
    pub fn new(
        id: &str,
        balance: f64,
        due_date: NaiveDate,
        status: &str,
        member: (&str, &str),
        group: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            balance,
            due_date: Some(due_date),
            status: status.to_string(),
            members: Some(MemberRef {
                name: member.0.to_string(),
                phone: Some(member.1.to_string()),
            }),
            savings_groups: Some(GroupRef {
                name: group.to_string(),
            }),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == "paid"
    }

    /// Paid wins; otherwise a due date strictly before `today` is overdue.
    pub fn status_on(&self, today: NaiveDate) -> LoanStatus {
        if self.is_paid() {
            LoanStatus::Paid
        } else if self.due_date.is_some_and(|due| due < today) {
            LoanStatus::Overdue
        } else {
            LoanStatus::Active
        }
    }

    /// Days past the due date, 0 when not overdue.
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        match (self.status_on(today), self.due_date) {
            (LoanStatus::Overdue, Some(due)) => (today - due).num_days(),
            _ => 0,
        }
    }

    pub fn member_name(&self) -> &str {
        self.members.as_ref().map_or("", |m| m.name.as_str())
    }

    pub fn member_phone(&self) -> &str {
        self.members
            .as_ref()
            .and_then(|m| m.phone.as_deref())
            .unwrap_or("")
    }

    pub fn group_name(&self) -> &str {
        self.savings_groups.as_ref().map_or("", |g| g.name.as_str())
    }

    /// Computes the update payload for a repayment of `amount`.
    ///
    /// # Errors
    /// Returns an error if the amount is not a positive number or the loan is
    /// already paid.
    pub fn repayment(&self, amount: f64) -> Result<RepaymentPatch> {
        if !amount.is_finite() || amount <= 0.0 {
            anyhow::bail!("Please enter a valid amount");
        }
        if self.is_paid() {
            anyhow::bail!("Loan {} is already paid", self.id);
        }
        let balance = (self.balance - amount).max(0.0);
        let status = if balance == 0.0 { "paid" } else { "active" };
        Ok(RepaymentPatch {
            balance,
            status: status.to_string(),
        })
    }
}

/// Update payload produced by [`Loan::repayment`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepaymentPatch {
    pub balance: f64,
    pub status: String,
}
