//! Calendar month model
//!
//! A Month is a unique (year, month-of-year) container that holds one monthly
//! item per template item. Months are find-or-create only and are never
//! deleted.

use chrono::{Datelike, Duration, NaiveDate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MonthId;

/// A unique calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Month {
    /// Unique identifier
    pub id: MonthId,

    /// Calendar year
    pub year: i32,

    /// Month of year (1-12)
    pub month: u32,

    /// When this month record was created
    pub created_at: DateTime<Utc>,
}

impl Month {
    /// Create a new month record
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            id: MonthId::new(),
            year,
            month,
            created_at: Utc::now(),
        }
    }

    /// Create a month record for the calendar month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// First day of the month
    ///
    /// `month` is always written as 1-12; an out-of-range value means a
    /// corrupted record and panics rather than rendering a wrong month.
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        let next_month = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next_month.unwrap() - Duration::days(1)
    }

    /// Check if a date falls within this month (closed interval)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Check whether this record represents the month containing `date`
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.year == date.year() && self.month == date.month()
    }

    /// Human-readable label, e.g. "March '22"
    pub fn label(&self) -> String {
        self.start_date().format("%B '%y").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
