//! Time series bucketing for charts
//!
//! A series always has exactly one bucket per unit of the window, zero-valued
//! buckets included, so charts never show gaps.

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use super::normalize::TransactionView;
use crate::models::{CalendarMonth, Money, TransactionKind};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short English label for a month number (1-12)
pub fn month_label(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_LABELS.get(i as usize))
        .copied()
        .unwrap_or("?")
}

/// Granularity of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketUnit {
    /// One bucket per day of a month
    DayOfMonth { days_in_month: u32 },
    /// One bucket per month of a year
    MonthOfYear,
}

impl BucketUnit {
    /// Daily buckets for `month`
    pub fn for_month(month: CalendarMonth) -> Self {
        Self::DayOfMonth {
            days_in_month: month.days(),
        }
    }

    /// Number of buckets in a series of this unit
    pub fn len(&self) -> usize {
        match self {
            Self::DayOfMonth { days_in_month } => *days_in_month as usize,
            Self::MonthOfYear => 12,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn label(&self, unit: u32) -> String {
        match self {
            Self::DayOfMonth { .. } => unit.to_string(),
            Self::MonthOfYear => month_label(unit).to_string(),
        }
    }

    /// 1-based unit of a row's date
    fn unit_of(&self, row: &TransactionView) -> u32 {
        match self {
            Self::DayOfMonth { .. } => row.date.day(),
            Self::MonthOfYear => row.date.month(),
        }
    }
}

/// One unit of a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    /// Day of month or month of year, starting at 1
    pub unit: u32,
    pub label: String,
    pub income: Money,
    pub expense: Money,
}

impl Bucket {
    fn empty(unit: u32, label: String) -> Self {
        Self {
            unit,
            label,
            income: Money::zero(),
            expense: Money::zero(),
        }
    }

    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Bucket `rows` by `unit`
///
/// Rows must already be filtered to the window. Transfers are ignored and rows
/// whose unit falls outside the series are dropped.
pub fn bucket_series<'a, I>(rows: I, unit: BucketUnit) -> Vec<Bucket>
where
    I: IntoIterator<Item = &'a TransactionView>,
{
    let mut buckets: Vec<Bucket> = (1..=unit.len() as u32)
        .map(|u| Bucket::empty(u, unit.label(u)))
        .collect();

    for row in rows {
        let index = unit.unit_of(row) as usize;
        let Some(bucket) = index.checked_sub(1).and_then(|i| buckets.get_mut(i)) else {
            continue;
        };
        match row.kind {
            TransactionKind::Income => bucket.income += row.amount,
            TransactionKind::Expense => bucket.expense += row.amount,
            TransactionKind::Transfer => {}
        }
    }

    buckets
}

/// Income and expense for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub month: CalendarMonth,
    /// "Jan 2026"
    pub label: String,
    pub income: Money,
    pub expense: Money,
}

/// Per-month totals in ascending month order, keeping the last `keep_last`
/// months that have data
pub fn monthly_trend<'a, I>(rows: I, keep_last: usize) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a TransactionView>,
{
    let mut months: BTreeMap<CalendarMonth, (Money, Money)> = BTreeMap::new();

    for row in rows {
        let entry = match row.kind {
            TransactionKind::Income | TransactionKind::Expense => months
                .entry(CalendarMonth::of(row.date))
                .or_insert((Money::zero(), Money::zero())),
            TransactionKind::Transfer => continue,
        };
        if row.kind == TransactionKind::Income {
            entry.0 += row.amount;
        } else {
            entry.1 += row.amount;
        }
    }

    let skip = months.len().saturating_sub(keep_last);
    months
        .into_iter()
        .skip(skip)
        .map(|(month, (income, expense))| TrendPoint {
            month,
            label: format!("{} {}", month_label(month.month), month.year),
            income,
            expense,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, ColorTag, TransactionId, TransactionStatus};
    use chrono::NaiveDate;

    fn view(kind: TransactionKind, units: i64, y: i32, m: u32, d: u32) -> TransactionView {
        TransactionView {
            id: TransactionId::new(1),
            description: String::new(),
            kind,
            amount: Money::from_units(units),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            status: TransactionStatus::Completed,
            merchant: None,
            tags: Vec::new(),
            account_id: AccountId::new(1),
            category_id: None,
            category: "Sem Categoria".into(),
            category_color: ColorTag::Gray,
            category_icon: None,
            account: "Conta".into(),
        }
    }

    #[test]
    fn test_january_daily_series() {
        let rows = vec![
            view(TransactionKind::Income, 5000, 2026, 1, 25),
            view(TransactionKind::Expense, 350, 2026, 1, 24),
        ];
        let unit = BucketUnit::for_month(CalendarMonth::new(2026, 1).unwrap());
        let series = bucket_series(&rows, unit);

        assert_eq!(series.len(), 31);
        assert_eq!(series[24].income, Money::from_units(5000));
        assert_eq!(series[24].expense, Money::zero());
        assert_eq!(series[23].income, Money::zero());
        assert_eq!(series[23].expense, Money::from_units(350));
        let others = series
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 23 && *i != 24);
        for (_, bucket) in others {
            assert!(bucket.income.is_zero() && bucket.expense.is_zero());
        }
        assert_eq!(series[0].label, "1");
    }

    #[test]
    fn test_series_length_is_fixed() {
        let unit = BucketUnit::for_month(CalendarMonth::new(2024, 2).unwrap());
        assert_eq!(bucket_series(std::iter::empty(), unit).len(), 29);
        assert_eq!(bucket_series(std::iter::empty(), BucketUnit::MonthOfYear).len(), 12);
    }

    #[test]
    fn test_out_of_range_rows_dropped() {
        // 31st of a month bucketed into a 30-day series
        let rows = vec![view(TransactionKind::Expense, 10, 2026, 3, 31)];
        let series = bucket_series(&rows, BucketUnit::DayOfMonth { days_in_month: 30 });
        assert_eq!(series.len(), 30);
        assert!(series.iter().all(|b| b.expense.is_zero()));
    }

    #[test]
    fn test_transfers_ignored() {
        let rows = vec![
            view(TransactionKind::Transfer, 900, 2026, 1, 3),
            view(TransactionKind::Expense, 100, 2026, 1, 3),
        ];
        let series = bucket_series(&rows, BucketUnit::DayOfMonth { days_in_month: 31 });
        assert_eq!(series[2].expense, Money::from_units(100));
        assert_eq!(series[2].income, Money::zero());
        assert_eq!(series[2].net(), Money::from_units(-100));
    }

    #[test]
    fn test_monthly_buckets() {
        let rows = vec![
            view(TransactionKind::Income, 10, 2026, 3, 5),
            view(TransactionKind::Income, 15, 2026, 3, 20),
        ];
        let series = bucket_series(&rows, BucketUnit::MonthOfYear);
        assert_eq!(series[2].label, "Mar");
        assert_eq!(series[2].income, Money::from_units(25));
    }

    #[test]
    fn test_monthly_trend_keeps_last_months() {
        let rows: Vec<_> = (1..=8)
            .map(|m| view(TransactionKind::Expense, m as i64, 2025, m, 1))
            .chain(std::iter::once(view(TransactionKind::Income, 50, 2025, 8, 2)))
            .collect();

        let trend = monthly_trend(&rows, 6);
        assert_eq!(trend.len(), 6);
        assert_eq!(trend[0].month, CalendarMonth::new(2025, 3).unwrap());
        assert_eq!(trend[5].label, "Aug 2025");
        assert_eq!(trend[5].income, Money::from_units(50));
        assert_eq!(trend[5].expense, Money::from_units(8));
    }

    #[test]
    fn test_aggregation_is_repeatable() {
        let rows = vec![
            view(TransactionKind::Income, 5000, 2026, 1, 25),
            view(TransactionKind::Expense, 350, 2026, 1, 24),
        ];
        let unit = BucketUnit::for_month(CalendarMonth::new(2026, 1).unwrap());
        assert_eq!(bucket_series(&rows, unit), bucket_series(&rows, unit));
        assert_eq!(monthly_trend(&rows, 6), monthly_trend(&rows, 6));
    }
}
