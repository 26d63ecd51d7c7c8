//! Report period windows
//!
//! Windows always run up to the reference instant; there are no "last month"
//! style windows. Pass an earlier reference to look at history.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::CalendarMonth;

/// Period selector for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Trailing seven days
    Week,
    /// Month to date
    #[default]
    Month,
    /// Year to date
    Year,
}

impl ReportPeriod {
    /// Parse a period tag
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "w" => Some(Self::Week),
            "month" | "m" => Some(Self::Month),
            "year" | "y" => Some(Self::Year),
            _ => None,
        }
    }

    /// The window ending at `now`
    pub fn window(&self, now: NaiveDateTime) -> PeriodWindow {
        let today = now.date();
        let start = match self {
            Self::Week => now - Duration::days(7),
            Self::Month => midnight(today.with_day(1).unwrap_or(today)),
            Self::Year => midnight(NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today)),
        };
        PeriodWindow { start, end: now }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid period '{}': use week, month or year", s))
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// A `[start, end]` range used to select rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl PeriodWindow {
    /// The whole of a calendar month, first to last day inclusive
    pub fn calendar_month(month: CalendarMonth) -> Self {
        Self {
            start: midnight(month.start_date()),
            end: midnight(month.end_date()),
        }
    }

    /// A row dated `date` belongs to the window when its midnight does
    pub fn contains(&self, date: NaiveDate) -> bool {
        let at = midnight(date);
        at >= self.start && at <= self.end
    }

    /// First calendar day whose rows are selected
    pub fn first_day(&self) -> NaiveDate {
        if self.start.time() == NaiveTime::MIN {
            self.start.date()
        } else {
            self.start.date() + Duration::days(1)
        }
    }

    /// Last calendar day whose rows are selected
    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.first_day(), self.last_day())
    }
}
