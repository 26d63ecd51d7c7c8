//! Category distribution
//!
//! Groups expense rows by category label and ranks the groups by total.

use serde::Serialize;

use super::normalize::TransactionView;
use crate::models::{ColorTag, Money, TransactionKind};

/// Number of shares shown in reports
pub const DEFAULT_TOP_CATEGORIES: usize = 6;

/// One category's slice of a total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub label: String,
    pub total: Money,
    /// Rounded share of the grand total, 0-100
    pub percentage: u32,
    pub color: ColorTag,
}

/// Group `rows` by category label, rank by summed magnitude and keep `limit`
///
/// Callers pass expense rows only. Each group keeps the color of the first row
/// seen for it; groups with equal totals stay in first-seen order.
pub fn category_distribution<'a, I>(rows: I, limit: usize) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = &'a TransactionView>,
{
    let mut groups: Vec<CategoryShare> = Vec::new();

    for row in rows {
        let amount = row.amount.abs();
        match groups.iter_mut().find(|g| g.label == row.category) {
            Some(group) => group.total += amount,
            None => groups.push(CategoryShare {
                label: row.category.clone(),
                total: amount,
                percentage: 0,
                color: row.category_color,
            }),
        }
    }

    let grand_total: Money = groups.iter().map(|g| g.total).sum();
    for group in &mut groups {
        group.percentage = group
            .total
            .ratio_of(grand_total)
            .map(|r| (r * 100.0).round() as u32)
            .unwrap_or(0);
    }

    // sort_by is stable
    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups.truncate(limit);
    groups
}

/// Distribution over the expense rows of a mixed row set
pub fn expense_distribution(rows: &[TransactionView], limit: usize) -> Vec<CategoryShare> {
    category_distribution(
        rows.iter().filter(|r| r.kind == TransactionKind::Expense),
        limit,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, TransactionId, TransactionStatus};
    use chrono::NaiveDate;

    fn expense(category: &str, color: ColorTag, units: i64) -> TransactionView {
        TransactionView {
            id: TransactionId::new(1),
            description: String::new(),
            kind: TransactionKind::Expense,
            amount: Money::from_units(units),
            date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            status: TransactionStatus::Completed,
            merchant: None,
            tags: Vec::new(),
            account_id: AccountId::new(1),
            category_id: None,
            category: category.into(),
            category_color: color,
            category_icon: None,
            account: "Conta".into(),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(category_distribution(std::iter::empty(), 6).is_empty());
    }

    #[test]
    fn test_grouping_and_ranking() {
        let rows = vec![
            expense("Transporte", ColorTag::Blue, 200),
            expense("Alimentação", ColorTag::Orange, 350),
            expense("Transporte", ColorTag::Red, 100),
            expense("Lazer", ColorTag::Purple, 50),
        ];
        let shares = category_distribution(&rows, 6);

        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].label, "Alimentação");
        assert_eq!(shares[1].label, "Transporte");
        assert_eq!(shares[1].total, Money::from_units(300));
        // first-seen color wins
        assert_eq!(shares[1].color, ColorTag::Blue);
        assert_eq!(shares[0].percentage, 50);
        assert_eq!(shares[1].percentage, 43);
        assert_eq!(shares[2].percentage, 7);
    }

    #[test]
    fn test_percentages_sum_near_100() {
        let rows = vec![
            expense("A", ColorTag::Gray, 1),
            expense("B", ColorTag::Gray, 1),
            expense("C", ColorTag::Gray, 1),
        ];
        let shares = category_distribution(&rows, 6);
        let sum: u32 = shares.iter().map(|s| s.percentage).sum();
        assert!(sum.abs_diff(100) <= shares.len() as u32);
    }

    #[test]
    fn test_truncated_to_limit_with_stable_ties() {
        let rows: Vec<_> = ["A", "B", "C", "D", "E", "F", "G", "H"]
            .iter()
            .map(|l| expense(l, ColorTag::Gray, 10))
            .collect();
        let shares = category_distribution(&rows, DEFAULT_TOP_CATEGORIES);
        let labels: Vec<_> = shares.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_zero_total_gives_zero_percent() {
        let rows = vec![expense("A", ColorTag::Gray, 0)];
        let shares = category_distribution(&rows, 6);
        assert_eq!(shares[0].percentage, 0);
    }

    #[test]
    fn test_expense_distribution_skips_income() {
        let mut income = expense("Salário", ColorTag::Green, 5000);
        income.kind = TransactionKind::Income;
        let rows = vec![income, expense("Lazer", ColorTag::Purple, 50)];
        let shares = expense_distribution(&rows, 6);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].percentage, 100);
    }
}
