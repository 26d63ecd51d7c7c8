//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod budget;
pub mod category;
pub mod goal;
pub mod report;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};

use crate::error::{FinlensError, FinlensResult};
use crate::models::{CalendarMonth, ColorTag, Money};

/// Parse an amount such as "1000", "1000.50" or "1000,50"
pub(crate) fn parse_amount(s: &str) -> FinlensResult<Money> {
    Money::parse(s).map_err(|e| {
        FinlensError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '1000.00' or '1000'. Error: {}",
            s, e
        ))
    })
}

/// Parse a YYYY-MM-DD date
pub(crate) fn parse_date(s: &str) -> FinlensResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        FinlensError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse a YYYY-MM month, or the current month when absent
pub(crate) fn parse_month_or_current(s: Option<&str>) -> FinlensResult<CalendarMonth> {
    match s {
        Some(s) => CalendarMonth::parse(s).map_err(|e| {
            FinlensError::Validation(format!("{}. Use YYYY-MM (e.g., 2026-01)", e))
        }),
        None => Ok(CalendarMonth::of(today())),
    }
}

pub(crate) fn parse_color(s: &str) -> FinlensResult<ColorTag> {
    ColorTag::parse(s).map_err(|e| FinlensError::Validation(e.to_string()))
}

/// Local calendar date; the only place commands read the clock
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
