use std::collections::HashSet;

use serde::Deserialize;

use super::{GroupRef, de_id, de_null_default};

/// A beneficiary enrolled in a savings group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Member {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub national_id: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub risk_status: Option<String>,
    #[serde(default)]
    pub savings_groups: Option<GroupRef>,
}

impl Member {
    pub fn new(id: &str, name: &str, national_id: &str, group: &str, risk: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            national_id: national_id.to_string(),
            phone: None,
            risk_status: risk.map(str::to_string),
            savings_groups: Some(GroupRef {
                name: group.to_string(),
            }),
        }
    }

    pub fn group_name(&self) -> &str {
        self.savings_groups.as_ref().map_or("", |g| g.name.as_str())
    }

    /// Only `high` is high risk; anything else, including missing, is low.
    pub fn is_high_risk(&self) -> bool {
        self.risk_status
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("high"))
    }

    pub fn risk_label(&self) -> &'static str {
        if self.is_high_risk() { "HIGH" } else { "LOW" }
    }

    /// Case-insensitive match on the member name or group name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.group_name().to_lowercase().contains(&query)
    }
}

fn normalize_national_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Returns the normalized national ids that occur more than once.
///
/// Single pass over `members` with a seen-set. Blank ids are skipped.
pub fn duplicate_national_ids(members: &[Member]) -> HashSet<String> {
    let mut seen = HashSet::with_capacity(members.len());
    let mut duplicates = HashSet::new();
    for member in members {
        let id = normalize_national_id(&member.national_id);
        if id.is_empty() {
            continue;
        }
        if !seen.insert(id.clone()) {
            duplicates.insert(id);
        }
    }
    duplicates
}

/// True when `member`'s national id is in `duplicates`.
pub fn is_duplicate(member: &Member, duplicates: &HashSet<String>) -> bool {
    duplicates.contains(&normalize_national_id(&member.national_id))
}

/// Members matching `query`, in their original order.
pub fn filter_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    members.iter().filter(|m| m.matches(query)).collect()
}
