//! Budget model
//!
//! A budget caps spending in one expense category for one calendar month.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::period::CalendarMonth;

/// A monthly spending limit for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub category_id: CategoryId,

    /// Spending limit
    pub amount: Money,

    /// First day of the budgeted month
    pub period_start: NaiveDate,

    /// Last day of the budgeted month (inclusive)
    pub period_end: NaiveDate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a budget covering `month`
    pub fn new(id: BudgetId, category_id: CategoryId, amount: Money, month: CalendarMonth) -> Self {
        let now = Utc::now();
        Self {
            id,
            category_id,
            amount,
            period_start: month.start_date(),
            period_end: month.end_date(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The calendar month this budget was created for
    pub fn month(&self) -> CalendarMonth {
        CalendarMonth::of(self.period_start)
    }

    /// Move the budget to another month
    pub fn set_month(&mut self, month: CalendarMonth) {
        self.period_start = month.start_date();
        self.period_end = month.end_date();
        self.updated_at = Utc::now();
    }

    /// Check if a date falls within the budget period
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.amount));
        }

        if self.period_end < self.period_start {
            return Err(BudgetValidationError::InvertedPeriod {
                start: self.period_start,
                end: self.period_end,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.id, self.amount, self.month())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit(Money),
    InvertedPeriod { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit(amount) => {
                write!(f, "Budget limit must be positive (got {})", amount)
            }
            Self::InvertedPeriod { start, end } => {
                write!(f, "Budget period ends ({}) before it starts ({})", end, start)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> Budget {
        Budget::new(
            BudgetId::new(1),
            CategoryId::new(3),
            Money::from_units(1500),
            CalendarMonth::new(2026, 1).unwrap(),
        )
    }

    #[test]
    fn test_period_spans_whole_month() {
        let budget = january();
        assert_eq!(budget.period_start, date(2026, 1, 1));
        assert_eq!(budget.period_end, date(2026, 1, 31));
        assert!(budget.covers(date(2026, 1, 31)));
        assert!(!budget.covers(date(2026, 2, 1)));
    }

    #[test]
    fn test_set_month() {
        let mut budget = january();
        budget.set_month(CalendarMonth::new(2026, 2).unwrap());
        assert_eq!(budget.period_end, date(2026, 2, 28));
        assert_eq!(budget.month().to_string(), "2026-02");
    }

    #[test]
    fn test_validation() {
        let mut budget = january();
        assert!(budget.validate().is_ok());
        budget.amount = Money::zero();
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::NonPositiveLimit(_))
        ));
    }
}
