//! Period summary report
//!
//! Income, expense and balance for a trailing period, the top expense
//! categories and a month-by-month trend. This is also what `export` writes.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::analytics::{
    expense_distribution, monthly_trend, normalize_transactions, CategoryShare, PeriodWindow,
    ReportPeriod, TrendPoint,
};
use crate::config::Settings;
use crate::display::color_swatch;
use crate::display::report::{double_separator, format_bar, format_money_colored, separator};
use crate::error::FinlensResult;
use crate::models::Money;
use crate::services::TransactionTotals;
use crate::storage::{Storage, TransactionQuery};

/// Summary of one period
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub period: ReportPeriod,
    pub window: PeriodWindow,
    pub total_income: Money,
    pub total_expense: Money,
    /// Income minus expense
    pub balance: Money,
    /// Balance as a rounded percentage of income; 0 without income
    pub savings_rate: i64,
    /// Expense per day of the window
    pub daily_average_expense: Money,
    pub transaction_count: usize,
    /// Largest expense categories first
    pub categories: Vec<CategoryShare>,
    /// Oldest month first
    pub trend: Vec<TrendPoint>,
}

impl SummaryReport {
    /// Generate the summary for `period` ending at `now`
    pub fn generate(
        storage: &Storage,
        settings: &Settings,
        period: ReportPeriod,
        now: NaiveDateTime,
    ) -> FinlensResult<Self> {
        let window = period.window(now);
        let rows = normalize_transactions(
            &storage.query_transactions(&TransactionQuery::new().within(&window))?,
        );

        let totals = TransactionTotals::of(&rows);
        let balance = totals.balance();
        let savings_rate = balance
            .ratio_of(totals.income)
            .map(|r| (r * 100.0).round() as i64)
            .unwrap_or(0);

        let days = (window.last_day() - window.first_day()).num_days() + 1;
        let daily_average_expense = Money::from_cents(totals.expense.cents() / days.max(1));

        tracing::debug!(%period, %window, rows = rows.len(), "generated summary");

        Ok(Self {
            period,
            window,
            total_income: totals.income,
            total_expense: totals.expense,
            balance,
            savings_rate,
            daily_average_expense,
            transaction_count: rows.len(),
            categories: expense_distribution(&rows, settings.top_categories),
            trend: monthly_trend(&rows, settings.trend_months),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = settings.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str(&format!("Summary ({}): {}\n", self.period, self.window));
        output.push_str(&double_separator(70));
        output.push('\n');
        output.push_str(&format!(
            "Income:          {:>16}\n",
            self.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Expenses:        {:>16}\n",
            self.total_expense.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Balance:         {:>16}  ({}% of income)\n",
            format_money_colored(self.balance, symbol),
            self.savings_rate
        ));
        output.push_str(&format!(
            "Daily average:   {:>16}\n",
            self.daily_average_expense.format_with_symbol(symbol)
        ));
        output.push_str(&format!("Transactions:    {:>16}\n\n", self.transaction_count));

        output.push_str("Expenses by category\n");
        output.push_str(&separator(70));
        output.push('\n');
        if self.categories.is_empty() {
            output.push_str("No expenses in this period.\n");
        }
        for share in &self.categories {
            output.push_str(&format!(
                "{} {:<22} {} {:>4}% {:>16}\n",
                color_swatch(share.color),
                crate::display::report::truncate(&share.label, 22),
                format_bar(share.percentage as f64, 100.0, 20),
                share.percentage,
                share.total.format_with_symbol(symbol),
            ));
        }

        output.push_str("\nMonthly trend\n");
        output.push_str(&separator(70));
        output.push('\n');
        let max = self
            .trend
            .iter()
            .map(|p| p.income.max(p.expense))
            .max()
            .unwrap_or_default()
            .to_decimal();
        for point in &self.trend {
            output.push_str(&format!(
                "{:<9} in  {} {:>16}\n          out {} {:>16}\n",
                point.label,
                format_bar(point.income.to_decimal(), max, 20),
                point.income.format_with_symbol(symbol),
                format_bar(point.expense.to_decimal(), max, 20),
                point.expense.format_with_symbol(symbol),
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinlensPaths;
    use crate::models::{AccountType, CategoryId, CategoryKind, ColorTag, TransactionKind, TransactionStatus};
    use crate::services::{AccountService, CategoryService, NewTransaction, TransactionService};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinlensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        let account = AccountService::new(&storage)
            .create("Banco Digital", AccountType::Checking, "BRL", Money::zero())
            .unwrap()
            .id;
        let categories = CategoryService::new(&storage);
        let salary = categories
            .create("Salário", CategoryKind::Income, None, ColorTag::Green)
            .unwrap()
            .id;
        let food = categories
            .create("Alimentação", CategoryKind::Expense, None, ColorTag::Orange)
            .unwrap()
            .id;
        let transport = categories
            .create("Transporte", CategoryKind::Expense, None, ColorTag::Blue)
            .unwrap()
            .id;

        let service = TransactionService::new(&storage);
        let add = |kind, units, category: Option<CategoryId>, m, d| {
            service
                .create(NewTransaction {
                    account_id: account,
                    kind,
                    amount: Money::from_units(units),
                    date: NaiveDate::from_ymd_opt(2026, m, d).unwrap(),
                    description: String::new(),
                    category_id: category,
                    status: TransactionStatus::Completed,
                    merchant: None,
                    tags: Vec::new(),
                })
                .unwrap();
        };
        add(TransactionKind::Income, 5000, Some(salary), 1, 5);
        add(TransactionKind::Expense, 1500, Some(food), 1, 10);
        add(TransactionKind::Expense, 500, Some(transport), 1, 12);
        add(TransactionKind::Expense, 500, None, 1, 20);
        add(TransactionKind::Income, 4000, Some(salary), 2, 5);
        add(TransactionKind::Expense, 1000, Some(food), 2, 8);
        add(TransactionKind::Transfer, 300, None, 2, 9);

        Fixture {
            _temp_dir: temp_dir,
            storage,
        }
    }

    fn at(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, m, d)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_month_summary() {
        let f = fixture();
        let settings = Settings::default();
        let report = SummaryReport::generate(&f.storage, &settings, ReportPeriod::Month, at(1, 31)).unwrap();

        assert_eq!(report.total_income, Money::from_units(5000));
        assert_eq!(report.total_expense, Money::from_units(2500));
        assert_eq!(report.balance, Money::from_units(2500));
        assert_eq!(report.savings_rate, 50);
        assert_eq!(report.daily_average_expense, Money::from_cents(8064));
        assert_eq!(report.transaction_count, 4);

        let labels: Vec<_> = report.categories.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Alimentação", "Transporte", "Sem Categoria"]);
        assert_eq!(report.categories[0].percentage, 60);
        assert_eq!(report.categories[2].color, ColorTag::Gray);
        assert_eq!(report.trend.len(), 1);
    }

    #[test]
    fn test_year_summary_trend() {
        let f = fixture();
        let settings = Settings::default();
        let report = SummaryReport::generate(&f.storage, &settings, ReportPeriod::Year, at(2, 20)).unwrap();

        assert_eq!(report.transaction_count, 7);
        assert_eq!(report.total_expense, Money::from_units(3500));
        assert_eq!(report.trend.len(), 2);
        assert_eq!(report.trend[0].label, "Jan 2026");
        assert_eq!(report.trend[1].income, Money::from_units(4000));
        // transfers stay out of the trend
        assert_eq!(report.trend[1].expense, Money::from_units(1000));
    }

    #[test]
    fn test_week_without_income() {
        let f = fixture();
        let settings = Settings::default();
        let report = SummaryReport::generate(&f.storage, &settings, ReportPeriod::Week, at(1, 14)).unwrap();

        assert_eq!(report.total_income, Money::zero());
        assert_eq!(report.savings_rate, 0);
        assert_eq!(report.transaction_count, 2);
        assert!(report.format_terminal(&settings).contains("Transporte"));
    }
}
