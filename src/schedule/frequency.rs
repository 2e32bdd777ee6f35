use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a recurring entry repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Monthly,
    Semiannual,
    Annual,
}

impl Frequency {
    /// Stride between consecutive occurrences, in months.
    pub fn interval_months(&self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Semiannual => 6,
            Frequency::Annual => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Semiannual => "Every 6 Months",
            Frequency::Annual => "Yearly",
        }
    }
}

/// Adds `months` to a date, clamping the day to the length of the target
/// month (Jan 31 + 1 month = Feb 28/29, never an overflow into March).
///
/// Every schedule computation in the crate goes through this one helper.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
