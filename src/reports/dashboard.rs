//! Dashboard
//!
//! Total balance, the latest transactions and a day-by-day chart of the
//! current calendar month.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::analytics::{
    bucket_series, normalize_account, normalize_transactions, Bucket, BucketUnit, PeriodWindow,
    TransactionView,
};
use crate::config::Settings;
use crate::display::format_transaction_register;
use crate::display::report::{double_separator, format_bar, format_money_colored, separator};
use crate::error::FinlensResult;
use crate::models::{CalendarMonth, Money};
use crate::services::TransactionTotals;
use crate::storage::{Storage, TransactionQuery};

/// Dashboard figures
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub month: CalendarMonth,
    /// Sum of current balances over all accounts
    pub total_balance: Money,
    pub account_count: usize,
    /// Newest transactions first
    pub recent: Vec<TransactionView>,
    /// Income of the recent transactions
    pub income: Money,
    /// Expense of the recent transactions
    pub expense: Money,
    /// One bucket per day of `month`
    pub daily: Vec<Bucket>,
}

impl DashboardReport {
    /// Build the dashboard as of `now`
    pub fn generate(storage: &Storage, settings: &Settings, now: NaiveDateTime) -> FinlensResult<Self> {
        let accounts: Vec<_> = storage
            .account_rows()?
            .iter()
            .map(|row| normalize_account(row, &settings.currency_code))
            .collect();
        let total_balance = accounts.iter().map(|a| a.current_balance).sum();

        let recent_rows = storage.query_transactions(
            &TransactionQuery::new()
                .newest_first()
                .limit(settings.recent_transactions),
        )?;
        let recent = normalize_transactions(&recent_rows);
        let totals = TransactionTotals::of(&recent);

        let month = CalendarMonth::of(now.date());
        let window = PeriodWindow::calendar_month(month);
        let month_rows = normalize_transactions(
            &storage.query_transactions(&TransactionQuery::new().within(&window))?,
        );
        let daily = bucket_series(&month_rows, BucketUnit::for_month(month));

        tracing::debug!(%month, recent = recent.len(), month_rows = month_rows.len(), "generated dashboard");

        Ok(Self {
            month,
            total_balance,
            account_count: accounts.len(),
            recent,
            income: totals.income,
            expense: totals.expense,
            daily,
        })
    }

    /// Income minus expense of the recent transactions
    pub fn savings(&self) -> Money {
        self.income - self.expense
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = settings.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str(&format!("Dashboard - {}\n", self.month));
        output.push_str(&double_separator(60));
        output.push('\n');
        output.push_str(&format!(
            "Total balance: {:>16}  ({} accounts)\n",
            self.total_balance.format_with_symbol(symbol),
            self.account_count
        ));
        output.push_str(&format!(
            "Income:        {:>16}\n",
            self.income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Expenses:      {:>16}\n",
            self.expense.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Savings:       {:>16}\n\n",
            format_money_colored(self.savings(), symbol)
        ));

        output.push_str("Recent transactions\n");
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format_transaction_register(
            &self.recent,
            symbol,
            &settings.date_format,
        ));

        output.push_str(&format!("\nDaily activity - {}\n", self.month));
        output.push_str(&separator(60));
        output.push('\n');
        let max = self
            .daily
            .iter()
            .map(|b| b.income.max(b.expense))
            .max()
            .unwrap_or_default()
            .to_decimal();
        for bucket in self.daily.iter().filter(|b| !b.income.is_zero() || !b.expense.is_zero()) {
            output.push_str(&format!(
                "{:>2} in  {} {}\n   out {} {}\n",
                bucket.label,
                format_bar(bucket.income.to_decimal(), max, 20),
                bucket.income.format_with_symbol(symbol),
                format_bar(bucket.expense.to_decimal(), max, 20),
                bucket.expense.format_with_symbol(symbol),
            ));
        }
        if max <= 0.0 {
            output.push_str("No activity this month.\n");
        }

        output
    }
}
