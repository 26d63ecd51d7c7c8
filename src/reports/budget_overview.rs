//! Budget Overview Report
//!
//! Every budget with its limit, what was actually spent in its category over
//! its period, and the resulting progress.

use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use crate::analytics::{progress, Progress, UNCATEGORIZED_LABEL};
use crate::config::Settings;
use crate::display::color_swatch;
use crate::display::report::{
    column_width, double_separator, format_progress_bar, format_progress_label, separator,
};
use crate::error::{FinlensError, FinlensResult};
use crate::models::{BudgetId, CalendarMonth, Category, CategoryId, ColorTag, Money};
use crate::services::BudgetService;
use crate::storage::Storage;

/// One budget in the overview
#[derive(Debug, Clone, Serialize)]
pub struct BudgetReportRow {
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    pub category: String,
    pub icon: String,
    pub color: ColorTag,
    pub month: CalendarMonth,
    pub limit: Money,
    pub spent: Money,
    pub progress: Progress,
}

impl BudgetReportRow {
    /// Limit minus spent; negative when over budget
    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }
}

/// Budget overview, optionally for a single month
#[derive(Debug, Clone, Serialize)]
pub struct BudgetOverviewReport {
    pub month: Option<CalendarMonth>,
    pub rows: Vec<BudgetReportRow>,
    pub total_limit: Money,
    pub total_spent: Money,
    pub progress: Progress,
}

impl BudgetOverviewReport {
    /// Generate the overview for `month`, or for every budget when `None`
    pub fn generate(storage: &Storage, month: Option<CalendarMonth>) -> FinlensResult<Self> {
        let service = BudgetService::new(storage);
        let categories: HashMap<CategoryId, Category> = storage
            .categories
            .list()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut rows = Vec::new();
        for budget in service.list(month)? {
            let spent = service.spent(&budget)?;
            let category = categories.get(&budget.category_id);
            rows.push(BudgetReportRow {
                budget_id: budget.id,
                category_id: budget.category_id,
                category: category
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string()),
                icon: category.map(|c| c.icon.clone()).unwrap_or_default(),
                color: category.map(|c| c.color).unwrap_or_default(),
                month: budget.month(),
                limit: budget.amount,
                spent,
                progress: progress(spent, budget.amount),
            });
        }

        let total_limit: Money = rows.iter().map(|r| r.limit).sum();
        let total_spent: Money = rows.iter().map(|r| r.spent).sum();

        tracing::debug!(budgets = rows.len(), "generated budget overview");

        Ok(Self {
            month,
            progress: progress(total_spent, total_limit),
            rows,
            total_limit,
            total_spent,
        })
    }

    /// Budgets whose spending went past the limit
    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetReportRow> {
        self.rows.iter().filter(|r| r.progress.over_threshold)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = settings.currency_symbol.as_str();
        let mut output = String::new();

        match self.month {
            Some(month) => output.push_str(&format!("Budgets - {}\n", month)),
            None => output.push_str("Budgets\n"),
        }
        output.push_str(&double_separator(90));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets found.\n");
            return output;
        }

        let width = column_width(self.rows.iter().map(|r| r.category.as_str()), 8);
        for row in &self.rows {
            output.push_str(&format!(
                "{:<7} {} {} {:<width$}  {}  {} {:>6}  {:>14} / {:>14}  left {:>14}\n",
                row.budget_id.to_string(),
                row.month,
                color_swatch(row.color),
                row.category,
                row.icon,
                format_progress_bar(&row.progress, 20),
                format_progress_label(&row.progress),
                row.spent.format_with_symbol(symbol),
                row.limit.format_with_symbol(symbol),
                row.remaining().format_with_symbol(symbol),
                width = width,
            ));
        }

        output.push_str(&separator(90));
        output.push('\n');
        output.push_str(&format!(
            "Total: {} of {} ({})\n",
            self.total_spent.format_with_symbol(symbol),
            self.total_limit.format_with_symbol(symbol),
            format_progress_label(&self.progress)
        ));

        let over: Vec<_> = self.over_budget().map(|r| r.category.as_str()).collect();
        if !over.is_empty() {
            output.push_str(&format!("Over budget: {}\n", over.join(", ")));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinlensResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Month", "Category", "Limit", "Spent", "Remaining", "Percentage"])
            .map_err(|e| FinlensError::Export(e.to_string()))?;

        for row in &self.rows {
            csv.write_record([
                row.month.to_string(),
                row.category.clone(),
                format!("{:.2}", row.limit.to_decimal()),
                format!("{:.2}", row.spent.to_decimal()),
                format!("{:.2}", row.remaining().to_decimal()),
                row.progress.percentage.to_string(),
            ])
            .map_err(|e| FinlensError::Export(e.to_string()))?;
        }

        csv.flush()
            .map_err(|e| FinlensError::Export(e.to_string()))?;
        Ok(())
    }
}
