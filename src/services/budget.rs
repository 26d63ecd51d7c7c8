//! Budget service
//!
//! One spending limit per expense category and calendar month.

use crate::analytics::{budget_spent, normalize_transactions};
use crate::error::{FinlensError, FinlensResult};
use crate::models::{Budget, BudgetId, CalendarMonth, CategoryId, CategoryKind, Money, TransactionKind};
use crate::storage::{Storage, TransactionQuery};

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Fields that can be changed on an existing budget
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub month: Option<CalendarMonth>,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set a limit for a category in a month
    pub fn create(
        &self,
        category_id: CategoryId,
        month: CalendarMonth,
        amount: Money,
    ) -> FinlensResult<Budget> {
        self.check_category(category_id)?;
        self.ensure_unique(category_id, month, None)?;

        let budget = self.storage.budgets.insert_with(|id| {
            let budget = Budget::new(id, category_id, amount, month);
            budget
                .validate()
                .map_err(|e| FinlensError::Validation(e.to_string()))?;
            Ok(budget)
        })?;
        self.storage.budgets.save()?;

        tracing::info!(budget = %budget.id, category = %category_id, %month, "created budget");
        Ok(budget)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> FinlensResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Budgets with the newest period first, optionally for one month
    pub fn list(&self, month: Option<CalendarMonth>) -> FinlensResult<Vec<Budget>> {
        let mut budgets: Vec<_> = self
            .storage
            .budgets
            .list()?
            .into_iter()
            .filter(|b| month.map_or(true, |m| b.month() == m))
            .collect();
        budgets.sort_by(|a, b| {
            b.period_start
                .cmp(&a.period_start)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(budgets)
    }

    /// Expense total for the budget's category within its period
    pub fn spent(&self, budget: &Budget) -> FinlensResult<Money> {
        let query = TransactionQuery::new()
            .between(budget.period_start, budget.period_end)
            .kind(TransactionKind::Expense)
            .category(budget.category_id);
        let rows = normalize_transactions(&self.storage.query_transactions(&query)?);
        Ok(budget_spent(budget, &rows))
    }

    /// Apply an update to a budget
    pub fn update(&self, id: BudgetId, changes: BudgetUpdate) -> FinlensResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| FinlensError::budget_not_found(id.to_string()))?;

        if let Some(category_id) = changes.category_id {
            self.check_category(category_id)?;
            budget.category_id = category_id;
        }
        if let Some(amount) = changes.amount {
            budget.amount = amount;
        }
        if let Some(month) = changes.month {
            budget.set_month(month);
        }
        budget.updated_at = chrono::Utc::now();

        self.ensure_unique(budget.category_id, budget.month(), Some(id))?;
        budget
            .validate()
            .map_err(|e| FinlensError::Validation(e.to_string()))?;

        self.storage.budgets.update(budget.clone())?;
        self.storage.budgets.save()?;

        tracing::info!(budget = %id, "updated budget");
        Ok(budget)
    }

    /// Delete a budget
    pub fn delete(&self, id: BudgetId) -> FinlensResult<Budget> {
        let budget = self
            .storage
            .budgets
            .delete(id)?
            .ok_or_else(|| FinlensError::budget_not_found(id.to_string()))?;
        self.storage.budgets.save()?;

        tracing::info!(budget = %id, "deleted budget");
        Ok(budget)
    }

    fn check_category(&self, category_id: CategoryId) -> FinlensResult<()> {
        let category = self
            .storage
            .categories
            .get(category_id)?
            .ok_or_else(|| FinlensError::category_not_found(category_id.to_string()))?;

        if category.kind != CategoryKind::Expense {
            return Err(FinlensError::Validation(format!(
                "Budgets need an expense category; '{}' is an income category",
                category.name
            )));
        }
        Ok(())
    }

    fn ensure_unique(
        &self,
        category_id: CategoryId,
        month: CalendarMonth,
        exclude: Option<BudgetId>,
    ) -> FinlensResult<()> {
        let taken = self.storage.budgets.list()?.iter().any(|b| {
            b.category_id == category_id && b.month() == month && Some(b.id) != exclude
        });

        if taken {
            return Err(FinlensError::Duplicate {
                entity_type: "Budget",
                identifier: format!("{} {}", category_id, month),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinlensPaths;
    use crate::models::{Account, AccountType, Category, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinlensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn category(storage: &Storage, name: &str, kind: CategoryKind) -> CategoryId {
        storage
            .categories
            .insert_with(|id| Ok(Category::new(id, name, kind)))
            .unwrap()
            .id
    }

    fn month(s: &str) -> CalendarMonth {
        CalendarMonth::parse(s).unwrap()
    }

    #[test]
    fn test_create_covers_whole_month() {
        let (_temp_dir, storage) = create_test_storage();
        let food = category(&storage, "Alimentação", CategoryKind::Expense);
        let service = BudgetService::new(&storage);

        let budget = service
            .create(food, month("2026-02"), Money::from_units(1500))
            .unwrap();
        assert_eq!(budget.period_start.to_string(), "2026-02-01");
        assert_eq!(budget.period_end.to_string(), "2026-02-28");
    }

    #[test]
    fn test_rejects_income_category_and_bad_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let salary = category(&storage, "Salário", CategoryKind::Income);
        let food = category(&storage, "Alimentação", CategoryKind::Expense);
        let service = BudgetService::new(&storage);

        assert!(service
            .create(salary, month("2026-01"), Money::from_units(100))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(food, month("2026-01"), Money::zero())
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_one_budget_per_category_and_month() {
        let (_temp_dir, storage) = create_test_storage();
        let food = category(&storage, "Alimentação", CategoryKind::Expense);
        let service = BudgetService::new(&storage);

        service.create(food, month("2026-01"), Money::from_units(100)).unwrap();
        assert!(matches!(
            service.create(food, month("2026-01"), Money::from_units(200)),
            Err(FinlensError::Duplicate { .. })
        ));
        service.create(food, month("2026-02"), Money::from_units(200)).unwrap();

        let listed = service.list(None).unwrap();
        assert_eq!(listed[0].month(), month("2026-02"));
        assert_eq!(service.list(Some(month("2026-01"))).unwrap().len(), 1);
    }

    #[test]
    fn test_spent_sums_matching_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let food = category(&storage, "Alimentação", CategoryKind::Expense);
        let account = storage
            .accounts
            .insert_with(|id| {
                Ok(Account::new(id, "Banco", AccountType::Checking, "BRL", Money::zero()))
            })
            .unwrap()
            .id;
        for (day, units) in [(5, 500), (20, 350)] {
            storage
                .transactions
                .insert_with(|id| {
                    let mut txn = Transaction::new(
                        id,
                        account,
                        TransactionKind::Expense,
                        Money::from_units(units),
                        NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
                    );
                    txn.category_id = Some(food);
                    Ok(txn)
                })
                .unwrap();
        }

        let service = BudgetService::new(&storage);
        let january = service.create(food, month("2026-01"), Money::from_units(1500)).unwrap();
        let february = service.create(food, month("2026-02"), Money::from_units(1500)).unwrap();

        assert_eq!(service.spent(&january).unwrap(), Money::from_units(850));
        assert_eq!(service.spent(&february).unwrap(), Money::zero());
    }
}
