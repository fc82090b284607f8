//! Compliance-year cutoff for issuance tied to a model-year report.
//!
//! The compliance year closes on September 30. Credits issued for a
//! submission that belongs to a model-year report are backdated to the most
//! recent cutoff that has not yet passed into a new compliance year.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

/// Month of the compliance year cutoff.
pub const CUTOFF_MONTH: u32 = 9;

/// Day of the compliance year cutoff.
pub const CUTOFF_DAY: u32 = 30;

/// September 30 of the current year after September, otherwise of the
/// previous year.
#[must_use]
pub fn fiscal_cutoff_date(today: NaiveDate) -> NaiveDate {
    let year = if today.month() > CUTOFF_MONTH {
        today.year()
    } else {
        today.year() - 1
    };
    NaiveDate::from_ymd_opt(year, CUTOFF_MONTH, CUTOFF_DAY).unwrap_or(today)
}

/// Midnight UTC on the cutoff date for `now`.
#[must_use]
pub fn fiscal_cutoff_timestamp(now: DateTime<Utc>) -> DateTime<Utc> {
    fiscal_cutoff_date(now.date_naive())
        .and_time(NaiveTime::MIN)
        .and_utc()
}
