//! Reporting period arithmetic
//!
//! Period windows are plain inclusive date ranges. Nothing in this module
//! reads the wall clock: every computation takes an explicit reference date
//! so that aggregations stay reproducible in tests.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors related to period computations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid window: start {start} must not be after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("Unknown period kind: {0}")]
    UnknownKind(String),

    #[error("Date out of range")]
    DateOutOfRange,
}

/// The granularity of a reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Week,
    Month,
    Quarter,
    Year,
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Quarter => "quarter",
            PeriodKind::Year => "year",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PeriodKind {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(PeriodKind::Week),
            "month" => Ok(PeriodKind::Month),
            "quarter" => Ok(PeriodKind::Quarter),
            "year" => Ok(PeriodKind::Year),
            other => Err(PeriodError::UnknownKind(other.to_string())),
        }
    }
}

/// An inclusive date range for one reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// First day of the period (inclusive)
    pub start: NaiveDate,
    /// Last day of the period (inclusive)
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// Creates a new window, validating the ordering
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar period of `kind` containing `reference`, shifted back by
    /// `offset` whole periods (offset 0 = current period)
    ///
    /// Weeks start on Monday; months, quarters and years are calendar-aligned.
    pub fn for_offset(kind: PeriodKind, offset: u32, reference: NaiveDate) -> Self {
        match kind {
            PeriodKind::Week => {
                let monday = reference
                    - Duration::days(reference.weekday().num_days_from_monday() as i64)
                    - Duration::weeks(offset as i64);
                Self {
                    start: monday,
                    end: monday + Duration::days(6),
                }
            }
            PeriodKind::Month => {
                let (year, month) = shift_months(reference.year(), reference.month(), offset);
                Self {
                    start: first_of_month(year, month),
                    end: last_of_month(year, month),
                }
            }
            PeriodKind::Quarter => {
                let quarters = reference.year() * 4 + (reference.month() as i32 - 1) / 3
                    - offset as i32;
                let year = quarters.div_euclid(4);
                let first_month = quarters.rem_euclid(4) as u32 * 3 + 1;
                Self {
                    start: first_of_month(year, first_month),
                    end: last_of_month(year, first_month + 2),
                }
            }
            PeriodKind::Year => {
                let year = reference.year() - offset as i32;
                Self {
                    start: first_of_month(year, 1),
                    end: last_of_month(year, 12),
                }
            }
        }
    }

    /// Returns true if `date` falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the window
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Consecutive calendar weeks ending with the week containing `reference`,
/// oldest first (the grid for the treasury evolution chart)
pub fn week_series(reference: NaiveDate, weeks: u32) -> Vec<PeriodWindow> {
    (0..weeks)
        .rev()
        .map(|offset| PeriodWindow::for_offset(PeriodKind::Week, offset, reference))
        .collect()
}

/// Chart label for a week: "dd/mm" of the week start
pub fn week_label(start: NaiveDate) -> String {
    start.format("%d/%m").to_string()
}

fn shift_months(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid first of month")
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(next_year, next_month) - Duration::days(1)
}
