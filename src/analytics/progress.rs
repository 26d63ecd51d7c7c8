//! Progress against a target
//!
//! Shared by budgets (spent vs. limit) and goals (saved vs. target).

use serde::Serialize;

use super::normalize::TransactionView;
use crate::models::{Budget, Money, TransactionKind};

/// A rounded percentage and whether it passed 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Not clamped; 120 means 20% over
    pub percentage: u32,
    pub over_threshold: bool,
}

impl Progress {
    pub fn compute(current: Money, target: Money) -> Self {
        let percentage = if target.is_positive() {
            current
                .ratio_of(target)
                .map(|r| (r * 100.0).round().max(0.0) as u32)
                .unwrap_or(0)
        } else {
            0
        };
        Self {
            percentage,
            over_threshold: percentage > 100,
        }
    }

    /// Width of a progress bar, in percent
    pub fn bar_width(&self) -> u32 {
        self.percentage.min(100)
    }
}

/// Shorthand for [`Progress::compute`]
pub fn progress(current: Money, target: Money) -> Progress {
    Progress::compute(current, target)
}

/// Expense total for the budget's category within its period
pub fn budget_spent<'a, I>(budget: &Budget, rows: I) -> Money
where
    I: IntoIterator<Item = &'a TransactionView>,
{
    rows.into_iter()
        .filter(|r| r.kind == TransactionKind::Expense)
        .filter(|r| r.category_id == Some(budget.category_id))
        .filter(|r| budget.covers(r.date))
        .map(|r| r.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AccountId, BudgetId, CalendarMonth, CategoryId, ColorTag, TransactionId,
        TransactionStatus,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_under_budget() {
        let p = progress(Money::from_units(850), Money::from_units(1500));
        assert_eq!(p.percentage, 57);
        assert!(!p.over_threshold);
        assert_eq!(p.bar_width(), 57);
    }

    #[test]
    fn test_over_budget_not_clamped() {
        let p = progress(Money::from_units(1800), Money::from_units(1500));
        assert_eq!(p.percentage, 120);
        assert!(p.over_threshold);
        assert_eq!(p.bar_width(), 100);
    }

    #[test]
    fn test_zero_target() {
        let p = progress(Money::zero(), Money::zero());
        assert_eq!(p.percentage, 0);
        assert!(!p.over_threshold);
        assert_eq!(progress(Money::from_units(5), Money::zero()).percentage, 0);
    }

    #[test]
    fn test_exactly_full_is_not_over() {
        let p = progress(Money::from_units(100), Money::from_units(100));
        assert_eq!(p.percentage, 100);
        assert!(!p.over_threshold);
    }

    fn row(kind: TransactionKind, category: Option<i64>, units: i64, day: u32, month: u32) -> TransactionView {
        TransactionView {
            id: TransactionId::new(1),
            description: String::new(),
            kind,
            amount: Money::from_units(units),
            date: NaiveDate::from_ymd_opt(2026, month, day).unwrap(),
            status: TransactionStatus::Completed,
            merchant: None,
            tags: Vec::new(),
            account_id: AccountId::new(1),
            category_id: category.map(CategoryId::new),
            category: String::new(),
            category_color: ColorTag::Gray,
            category_icon: None,
            account: String::new(),
        }
    }

    #[test]
    fn test_budget_spent() {
        let budget = Budget::new(
            BudgetId::new(1),
            CategoryId::new(4),
            Money::from_units(1500),
            CalendarMonth::new(2026, 1).unwrap(),
        );
        let rows = vec![
            row(TransactionKind::Expense, Some(4), 350, 1, 1),
            row(TransactionKind::Expense, Some(4), 500, 31, 1),
            // next month
            row(TransactionKind::Expense, Some(4), 90, 1, 2),
            // other category
            row(TransactionKind::Expense, Some(5), 70, 10, 1),
            row(TransactionKind::Income, Some(4), 1000, 10, 1),
            row(TransactionKind::Expense, None, 20, 10, 1),
        ];
        assert_eq!(budget_spent(&budget, &rows), Money::from_units(850));
    }
}
