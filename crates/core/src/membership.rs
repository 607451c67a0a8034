//! Membership terms and membership-number generation.

use chrono::Months;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Duration class of a membership.
///
/// Serialized with the wire names the clients send (`"6months"`, `"1year"`,
/// `"2years"`), which are also the values stored in `memberships.term`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipTerm {
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    OneYear,
    #[serde(rename = "2years")]
    TwoYears,
}

impl MembershipTerm {
    /// The stored/wire representation of this term.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTerm::SixMonths => "6months",
            MembershipTerm::OneYear => "1year",
            MembershipTerm::TwoYears => "2years",
        }
    }

    /// Parse a stored/wire term string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "6months" => Some(MembershipTerm::SixMonths),
            "1year" => Some(MembershipTerm::OneYear),
            "2years" => Some(MembershipTerm::TwoYears),
            _ => None,
        }
    }

    /// Number of calendar months this term runs for.
    pub fn months(&self) -> u32 {
        match self {
            MembershipTerm::SixMonths => 6,
            MembershipTerm::OneYear => 12,
            MembershipTerm::TwoYears => 24,
        }
    }

    /// Compute the end date for a membership of this term starting at `start`.
    pub fn end_date(&self, start: Timestamp) -> Timestamp {
        start + Months::new(self.months())
    }
}

/// Generate a membership number from a creation timestamp.
///
/// Format is `MEM<unix-millis>`, unique in practice because memberships are
/// created by a single admin action; the unique index on the column is the
/// real guard.
pub fn membership_number(created_at: Timestamp) -> String {
    format!("MEM{}", created_at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn parse_round_trips() {
        for term in [
            MembershipTerm::SixMonths,
            MembershipTerm::OneYear,
            MembershipTerm::TwoYears,
        ] {
            assert_eq!(MembershipTerm::parse(term.as_str()), Some(term));
        }
        assert_eq!(MembershipTerm::parse("3weeks"), None);
    }

    #[test]
    fn end_dates_follow_calendar_months() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(
            MembershipTerm::SixMonths.end_date(start),
            Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(
            MembershipTerm::OneYear.end_date(start),
            Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(
            MembershipTerm::TwoYears.end_date(start),
            Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn end_date_clamps_short_months() {
        // Jan 31 + 1 month clamps to Feb 29 in a leap year.
        let start = Utc.with_ymd_and_hms(2024, 8, 31, 0, 0, 0).unwrap();
        assert_eq!(
            MembershipTerm::SixMonths.end_date(start),
            Utc.with_ymd_and_hms(2025, 2, 28, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn membership_number_uses_millis() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(membership_number(at), format!("MEM{}", at.timestamp_millis()));
        assert!(membership_number(at).starts_with("MEM"));
    }
}
