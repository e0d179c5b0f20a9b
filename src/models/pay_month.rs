//! Pay month and reporting period models.
//!
//! Payroll is computed for a calendar month; compliance reports may cover a
//! day, week, month or year.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month for which payroll is computed.
///
/// Serialized as `"YYYY-MM"`.
///
/// # Example
///
/// ```
/// use statutory_payroll::models::PayMonth;
///
/// let month: PayMonth = "2025-06".parse().unwrap();
/// assert_eq!(month.month(), 6);
/// assert_eq!(month.days_in_month(), 30);
/// assert_eq!(month.label(), "June 2025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayMonth {
    first_day: NaiveDate,
}

impl PayMonth {
    /// Creates a pay month, rejecting months outside 1-12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| {
                EngineError::validation(
                    "month",
                    format!("{}-{:02} is not a calendar month", year, month),
                )
            })
    }

    /// Returns the month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Number of days in the month, accounting for leap years.
    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Human-readable label such as "June 2025".
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

impl fmt::Display for PayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for PayMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || EngineError::validation("month", format!("'{}' is not in YYYY-MM form", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for PayMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayMonth> for String {
    fn from(month: PayMonth) -> Self {
        month.to_string()
    }
}

/// The span a compliance report covers.
///
/// # Example
///
/// ```
/// use statutory_payroll::models::ReportingPeriod;
///
/// let period: ReportingPeriod = serde_json::from_str(r#"{ "type": "year", "year": 2025 }"#).unwrap();
/// assert_eq!(period.months().len(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportingPeriod {
    /// A single day.
    Day {
        /// The day reported on.
        date: NaiveDate,
    },
    /// Seven consecutive days starting at `start`.
    Week {
        /// First day of the week.
        start: NaiveDate,
    },
    /// A calendar month.
    Month {
        /// The month reported on.
        month: PayMonth,
    },
    /// A calendar year.
    Year {
        /// The year reported on.
        year: i32,
    },
}

impl ReportingPeriod {
    /// Lists the calendar months the period touches, in order, without repeats.
    pub fn months(&self) -> Vec<PayMonth> {
        match *self {
            Self::Day { date } => vec![PayMonth::from_date(date)],
            Self::Week { start } => {
                let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
                let mut months = vec![PayMonth::from_date(start)];
                let last = PayMonth::from_date(end);
                if last != months[0] {
                    months.push(last);
                }
                months
            }
            Self::Month { month } => vec![month],
            Self::Year { year } => (1..=12)
                .filter_map(|month| PayMonth::new(year, month).ok())
                .collect(),
        }
    }

    /// Human-readable label for report headers.
    pub fn label(&self) -> String {
        match self {
            Self::Day { date } => date.format("%d %b %Y").to_string(),
            Self::Week { start } => format!("Week of {}", start.format("%d %b %Y")),
            Self::Month { month } => month.label(),
            Self::Year { year } => format!("Year {}", year),
        }
    }
}

impl From<PayMonth> for ReportingPeriod {
    fn from(month: PayMonth) -> Self {
        Self::Month { month }
    }
}
