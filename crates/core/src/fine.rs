//! Loan period and late-fee arithmetic.
//!
//! A checkout is due [`LOAN_PERIOD_DAYS`] after issue. Late fees accrue at
//! [`FINE_PER_DAY`] currency units per day, with partial days rounded up.

use chrono::Duration;

use crate::types::Timestamp;

/// Number of days a copy may be kept before it is due back.
pub const LOAN_PERIOD_DAYS: i64 = 15;

/// Fee in currency units charged per day (or part of a day) of late return.
pub const FINE_PER_DAY: i64 = 10;

/// Compute the expected return date for a checkout issued at `issue_date`.
pub fn due_date(issue_date: Timestamp) -> Timestamp {
    issue_date + Duration::days(LOAN_PERIOD_DAYS)
}

/// Number of chargeable late days for a return.
///
/// Zero for on-time or early returns. A return even one second past the due
/// date counts as a full late day.
pub fn late_days(expected_return: Timestamp, actual_return: Timestamp) -> i64 {
    let late_secs = (actual_return - expected_return).num_seconds();
    if late_secs <= 0 {
        return 0;
    }
    // Ceiling division: any partial day charges as a whole day.
    (late_secs + 86_399) / 86_400
}

/// Fine in currency units for a return at `actual_return`.
pub fn fine_amount(expected_return: Timestamp, actual_return: Timestamp) -> i64 {
    late_days(expected_return, actual_return) * FINE_PER_DAY
}
