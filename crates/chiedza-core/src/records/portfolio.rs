use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{Loan, LoanStatus, Member, SavingsGroup};
use crate::config::Currency;

/// Aggregate figures for a set of loans.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PortfolioStats {
    /// Sum of all balances.
    pub total_outstanding: f64,
    /// Loans whose stored status is `active` (overdue ones included).
    pub active_loans: usize,
    /// Unpaid loans past their due date.
    pub overdue_loans: usize,
    /// Sum of balances of overdue loans.
    pub overdue_balance: f64,
}

impl PortfolioStats {
    pub fn compute(loans: &[Loan], today: NaiveDate) -> Self {
        loans.iter().fold(Self::default(), |mut stats, loan| {
            stats.total_outstanding += loan.balance;
            if loan.status == "active" {
                stats.active_loans += 1;
            }
            if loan.status_on(today) == LoanStatus::Overdue {
                stats.overdue_loans += 1;
                stats.overdue_balance += loan.balance;
            }
            stats
        })
    }

    /// Portfolio at risk: overdue balance as a percentage of outstanding.
    pub fn portfolio_at_risk(&self) -> f64 {
        if self.total_outstanding <= 0.0 {
            0.0
        } else {
            self.overdue_balance / self.total_outstanding * 100.0
        }
    }
}

/// Number of groups in one cluster zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterCoverage {
    pub zone: String,
    pub groups: usize,
    pub members: u32,
}

/// Group and member counts per cluster zone, ordered by zone name.
/// Groups without a zone are counted under `Unassigned`.
pub fn cluster_coverage(groups: &[SavingsGroup]) -> Vec<ClusterCoverage> {
    let mut zones: BTreeMap<&str, (usize, u32)> = BTreeMap::new();
    for group in groups {
        let zone = match group.cluster_zone.trim() {
            "" => "Unassigned",
            zone => zone,
        };
        let entry = zones.entry(zone).or_default();
        entry.0 += 1;
        entry.1 += group.member_count();
    }
    zones
        .into_iter()
        .map(|(zone, (groups, members))| ClusterCoverage {
            zone: zone.to_string(),
            groups,
            members,
        })
        .collect()
}

/// Figures behind the strategic report.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategicSummary {
    pub groups: usize,
    pub beneficiaries: usize,
    pub stats: PortfolioStats,
    pub coverage: Vec<ClusterCoverage>,
}

impl StrategicSummary {
    pub fn build(
        groups: &[SavingsGroup],
        members: &[Member],
        loans: &[Loan],
        today: NaiveDate,
    ) -> Self {
        Self {
            groups: groups.len(),
            beneficiaries: members.len(),
            stats: PortfolioStats::compute(loans, today),
            coverage: cluster_coverage(groups),
        }
    }

    /// `(metric, value)` rows in report order.
    pub fn metric_rows(&self, currency: Currency) -> Vec<(&'static str, String)> {
        vec![
            ("Savings Groups", self.groups.to_string()),
            ("Beneficiaries", self.beneficiaries.to_string()),
            (
                "Outstanding Loan Portfolio",
                currency.format(self.stats.total_outstanding),
            ),
            ("Active Loans", self.stats.active_loans.to_string()),
            ("Overdue Loans", self.stats.overdue_loans.to_string()),
            (
                "Portfolio at Risk",
                format!("{:.1}%", self.stats.portfolio_at_risk()),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loans() -> Vec<Loan> {
        vec![
            Loan::new("1", 150.0, date(2026, 2, 15), "active", ("A", "1"), "G1"),
            Loan::new("2", 45.0, date(2026, 1, 20), "active", ("B", "2"), "G2"),
            Loan::new("3", 200.0, date(2025, 12, 10), "active", ("C", "3"), "G1"),
            Loan::new("4", 0.0, date(2026, 1, 5), "paid", ("D", "4"), "G3"),
        ]
    }

    #[test]
    fn test_stats() {
        let stats = PortfolioStats::compute(&loans(), date(2026, 1, 25));
        assert!((stats.total_outstanding - 395.0).abs() < 1e-9);
        assert_eq!(stats.active_loans, 3);
        assert_eq!(stats.overdue_loans, 2);
        assert!((stats.overdue_balance - 245.0).abs() < 1e-9);
        assert!((stats.portfolio_at_risk() - 245.0 / 395.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_par_with_nothing_outstanding() {
        let stats = PortfolioStats::compute(&[], date(2026, 1, 1));
        assert!(stats.portfolio_at_risk().abs() < f64::EPSILON);
    }

    #[test]
    fn test_strategic_metric_rows() {
        let groups = vec![SavingsGroup::new("1", "Simuka", "Bindura", 0.0, 0.0, 3)];
        let members = vec![Member::new("1", "A", "", "Simuka", None)];
        let summary = StrategicSummary::build(&groups, &members, &loans(), date(2026, 1, 25));
        let rows = summary.metric_rows(Currency::Zar);
        assert_eq!(rows[0], ("Savings Groups", "1".to_string()));
        assert_eq!(rows[2], ("Outstanding Loan Portfolio", "R395.00".to_string()));
        assert_eq!(rows[5], ("Portfolio at Risk", "62.0%".to_string()));
        assert_eq!(summary.coverage.len(), 1);
    }

    #[test]
    fn test_cluster_coverage() {
        let groups = vec![
            SavingsGroup::new("1", "Siyaphambili", "Bulawayo", 0.0, 0.0, 10),
            SavingsGroup::new("2", "Tashinga", "Waterfalls", 0.0, 0.0, 4),
            SavingsGroup::new("3", "Simuka", "Bulawayo", 0.0, 0.0, 6),
            SavingsGroup::new("4", "Kubatana", "", 0.0, 0.0, 2),
        ];
        let coverage = cluster_coverage(&groups);
        assert_eq!(
            coverage,
            vec![
                ClusterCoverage {
                    zone: "Bulawayo".into(),
                    groups: 2,
                    members: 16,
                },
                ClusterCoverage {
                    zone: "Unassigned".into(),
                    groups: 1,
                    members: 2,
                },
                ClusterCoverage {
                    zone: "Waterfalls".into(),
                    groups: 1,
                    members: 4,
                },
            ]
        );
    }
}
