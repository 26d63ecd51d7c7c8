//! Storage layer for Finlens
//!
//! JSON file tables with atomic writes and serial ids. `Storage` ties the
//! tables together and applies the referential rules between them:
//!
//! - deleting an account deletes its transactions
//! - deleting a category clears it from transactions and deletes its budgets

pub mod file_io;
pub mod init;
pub mod query;
pub mod table;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use query::TransactionQuery;
pub use table::{Record, Table};

use std::collections::HashMap;

use crate::config::paths::FinlensPaths;
use crate::error::{FinlensError, FinlensResult};
use crate::models::{
    Account, AccountId, AccountRow, Budget, Category, CategoryId, Goal, Transaction,
    TransactionRow,
};

/// Main storage coordinator that provides access to all tables
pub struct Storage {
    paths: FinlensPaths,
    pub accounts: Table<Account>,
    pub categories: Table<Category>,
    pub transactions: Table<Transaction>,
    pub budgets: Table<Budget>,
    pub goals: Table<Goal>,
}

impl Storage {
    /// Create a Storage instance without loading anything
    pub fn new(paths: FinlensPaths) -> Result<Self, FinlensError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: Table::new(paths.table_file(Account::TABLE)),
            categories: Table::new(paths.table_file(Category::TABLE)),
            transactions: Table::new(paths.table_file(Transaction::TABLE)),
            budgets: Table::new(paths.table_file(Budget::TABLE)),
            goals: Table::new(paths.table_file(Goal::TABLE)),
            paths,
        })
    }

    /// Create a Storage instance and load every table
    pub fn open(paths: FinlensPaths) -> Result<Self, FinlensError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FinlensPaths {
        &self.paths
    }

    /// Load all tables from disk
    pub fn load_all(&self) -> Result<(), FinlensError> {
        self.accounts.load()?;
        self.categories.load()?;
        self.transactions.load()?;
        self.budgets.load()?;
        self.goals.load()?;
        Ok(())
    }

    /// Save all tables to disk
    pub fn save_all(&self) -> Result<(), FinlensError> {
        self.accounts.save()?;
        self.categories.save()?;
        self.transactions.save()?;
        self.budgets.save()?;
        self.goals.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Transactions matching `query`, joined with their category and account
    ///
    /// A join is `None` when the row has no category or the referenced row is
    /// gone.
    pub fn query_transactions(&self, query: &TransactionQuery) -> FinlensResult<Vec<TransactionRow>> {
        let mut txns = self.transactions.list()?;
        query.apply(&mut txns);

        let categories: HashMap<CategoryId, Category> = self
            .categories
            .list()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let accounts: HashMap<AccountId, Account> = self
            .accounts
            .list()?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let rows: Vec<TransactionRow> = txns
            .iter()
            .map(|txn| {
                TransactionRow::joined(
                    txn,
                    txn.category_id.and_then(|id| categories.get(&id)),
                    accounts.get(&txn.account_id),
                )
            })
            .collect();

        tracing::debug!(rows = rows.len(), ?query, "queried transactions");
        Ok(rows)
    }

    /// Every account as a raw row
    pub fn account_rows(&self) -> FinlensResult<Vec<AccountRow>> {
        Ok(self.accounts.list()?.iter().map(AccountRow::from).collect())
    }

    /// Delete an account and its transactions; returns the removed account
    pub fn delete_account(&self, id: AccountId) -> FinlensResult<Account> {
        let account = self
            .accounts
            .delete(id)?
            .ok_or_else(|| FinlensError::account_not_found(id.to_string()))?;
        let removed = self.transactions.delete_where(|t| t.account_id == id)?;

        tracing::info!(account = %id, transactions = removed, "deleted account");
        Ok(account)
    }

    /// Delete a category, detaching its transactions and dropping its budgets
    pub fn delete_category(&self, id: CategoryId) -> FinlensResult<Category> {
        let category = self
            .categories
            .delete(id)?
            .ok_or_else(|| FinlensError::category_not_found(id.to_string()))?;
        let detached = self
            .transactions
            .modify_where(|t| t.category_id == Some(id), |t| t.category_id = None)?;
        let budgets = self.budgets.delete_where(|b| b.category_id == id)?;

        tracing::info!(
            category = %id,
            detached_transactions = detached,
            deleted_budgets = budgets,
            "deleted category"
        );
        Ok(category)
    }
}
