//! Built-in sample rows.
//!
//! Used for every dataset in demo mode, and whenever a remote fetch fails or
//! comes back empty.

use chrono::NaiveDate;

use crate::records::{Loan, Member, SavingsGroup};

/// Map centre used when no group has coordinates.
pub const MAP_CENTER: (f64, f64) = (-19.0154, 29.1549);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn groups() -> Vec<SavingsGroup> {
    vec![
        SavingsGroup::new("1", "Siyaphambili", "Bulawayo", -20.1325, 28.6265, 14),
        SavingsGroup::new("2", "Tashinga", "Waterfalls", -17.8919, 31.0296, 11),
        SavingsGroup::new("3", "Simuka", "Bindura", -17.3019, 31.3306, 9),
        SavingsGroup::new("4", "Kubatana", "Bulawayo", -20.1701, 28.5649, 12),
    ]
}

/// Two of these share a national id so duplicate detection has something
/// to flag.
pub fn members() -> Vec<Member> {
    vec![
        Member::new("1", "Sarah Moyo", "63-123456A-42", "Siyaphambili", Some("low")),
        Member::new("2", "Tendai Gava", "08-765432B-17", "Tashinga", Some("high")),
        Member::new("3", "Grace Ndlovu", "63-223344C-42", "Siyaphambili", Some("high")),
        Member::new("4", "Peter Banda", "71-998877D-05", "Simuka", None),
        Member::new("5", "Ruth Banda", "71-998877D-05", "Simuka", Some("low")),
        Member::new("6", "Chipo Dube", "", "Kubatana", None),
    ]
}

pub fn loans() -> Vec<Loan> {
    vec![
        Loan::new(
            "1",
            150.0,
            date(2026, 2, 15),
            "active",
            ("Sarah Moyo", "0772123456"),
            "Siyaphambili",
        ),
        Loan::new(
            "2",
            45.0,
            date(2026, 1, 20),
            "active",
            ("Tendai Gava", "0773987654"),
            "Tashinga",
        ),
        Loan::new(
            "3",
            200.0,
            date(2025, 12, 10),
            "active",
            ("Grace Ndlovu", "0712345678"),
            "Siyaphambili",
        ),
        Loan::new(
            "4",
            0.0,
            date(2026, 1, 5),
            "paid",
            ("Peter Banda", "0774555666"),
            "Simuka",
        ),
    ]
}
