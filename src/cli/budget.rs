//! Budget CLI commands
//!
//! Monthly spending limits per expense category.

use clap::Subcommand;

use crate::config::Settings;
use crate::error::FinlensResult;
use crate::models::{BudgetId, CalendarMonth, Category, CategoryKind};
use crate::reports::BudgetOverviewReport;
use crate::services::{BudgetService, BudgetUpdate, CategoryService};
use crate::storage::Storage;

use super::{parse_amount, parse_month_or_current};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a monthly limit for an expense category
    #[command(alias = "create")]
    Set {
        /// Category name or ID
        category: String,
        /// Limit for the month
        amount: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// List budgets with what was spent
    List {
        /// Only show one month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Edit a budget
    Edit {
        /// Budget ID
        id: BudgetId,
        /// New limit
        #[arg(short, long)]
        amount: Option<String>,
        /// Move to another month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Move to another category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        id: BudgetId,
    },
}

fn resolve_expense_category(service: &CategoryService, identifier: &str) -> FinlensResult<Category> {
    let wanted = identifier.trim().to_lowercase();
    match service
        .list(Some(CategoryKind::Expense))?
        .into_iter()
        .find(|c| c.name.to_lowercase() == wanted)
    {
        Some(category) => Ok(category),
        None => service.resolve(identifier),
    }
}

fn parse_month(s: &str) -> FinlensResult<CalendarMonth> {
    parse_month_or_current(Some(s))
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinlensResult<()> {
    let service = BudgetService::new(storage);
    let categories = CategoryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let category = resolve_expense_category(&categories, &category)?;
            let month = parse_month_or_current(month.as_deref())?;
            let budget = service.create(category.id, month, parse_amount(&amount)?)?;
            println!(
                "Budget {} for {} in {}: {}",
                budget.id,
                category.name,
                month,
                budget.amount.format_with_symbol(symbol)
            );
        }

        BudgetCommands::List { month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let report = BudgetOverviewReport::generate(storage, month)?;
            print!("{}", report.format_terminal(settings));
        }

        BudgetCommands::Edit {
            id,
            amount,
            month,
            category,
        } => {
            if amount.is_none() && month.is_none() && category.is_none() {
                println!("No changes specified. Use --amount, --month or --category.");
                return Ok(());
            }

            let changes = BudgetUpdate {
                category_id: category
                    .as_deref()
                    .map(|c| resolve_expense_category(&categories, c).map(|c| c.id))
                    .transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                month: month.as_deref().map(parse_month).transpose()?,
            };
            let updated = service.update(id, changes)?;
            println!(
                "Updated budget {}: {} in {}",
                updated.id,
                updated.amount.format_with_symbol(symbol),
                updated.month()
            );
        }

        BudgetCommands::Delete { id } => {
            let deleted = service.delete(id)?;
            println!("Deleted budget {}", deleted.id);
        }
    }

    Ok(())
}
