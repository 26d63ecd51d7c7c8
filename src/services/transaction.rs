//! Transaction service
//!
//! Writes go through validation against the other tables: the account must
//! exist, and a category must exist and match the transaction's kind.

use chrono::NaiveDate;

use crate::analytics::{normalize_transactions, TransactionView};
use crate::error::{FinlensError, FinlensResult};
use crate::models::{
    normalize_merchant, normalize_tags, AccountId, CategoryId, Money, Transaction, TransactionId,
    TransactionKind, TransactionStatus,
};
use crate::storage::{Storage, TransactionQuery};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: String,
    pub category_id: Option<CategoryId>,
    pub status: TransactionStatus,
    pub merchant: Option<String>,
    pub tags: Vec<String>,
}

/// Fields that can be changed on an existing transaction
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub account_id: Option<AccountId>,
    pub kind: Option<TransactionKind>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    /// `Some(None)` clears the category
    pub category_id: Option<Option<CategoryId>>,
    pub status: Option<TransactionStatus>,
    /// `Some(None)` clears the merchant
    pub merchant: Option<Option<String>>,
    /// Replaces the whole tag list; an empty list clears it
    pub tags: Option<Vec<String>>,
}

/// Income and expense totals over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionTotals {
    pub income: Money,
    pub expense: Money,
}

impl TransactionTotals {
    pub fn of<'b, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'b TransactionView>,
    {
        rows.into_iter()
            .fold(Self::default(), |mut totals, row| {
                match row.kind {
                    TransactionKind::Income => totals.income += row.amount,
                    TransactionKind::Expense => totals.expense += row.amount,
                    TransactionKind::Transfer => {}
                }
                totals
            })
    }

    /// Income minus expense
    pub fn balance(&self) -> Money {
        self.income - self.expense
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: NewTransaction) -> FinlensResult<Transaction> {
        let txn = self.storage.transactions.insert_with(|id| {
            let mut txn = Transaction::new(id, input.account_id, input.kind, input.amount, input.date);
            txn.description = input.description.trim().to_string();
            txn.category_id = input.category_id;
            txn.status = input.status;
            txn.merchant = normalize_merchant(input.merchant.as_deref());
            txn.tags = normalize_tags(&input.tags);
            self.check(&txn)?;
            Ok(txn)
        })?;
        self.storage.transactions.save()?;

        tracing::info!(
            transaction = %txn.id,
            kind = %txn.kind,
            amount = %txn.amount,
            "created transaction"
        );
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FinlensResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Transactions matching `query`, resolved for display
    pub fn list(&self, query: &TransactionQuery) -> FinlensResult<Vec<TransactionView>> {
        let rows = self.storage.query_transactions(query)?;
        Ok(normalize_transactions(&rows))
    }

    /// Income and expense totals for `query`
    pub fn totals(&self, query: &TransactionQuery) -> FinlensResult<TransactionTotals> {
        Ok(TransactionTotals::of(&self.list(query)?))
    }

    /// Apply an update to a transaction
    pub fn update(&self, id: TransactionId, changes: TransactionUpdate) -> FinlensResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FinlensError::transaction_not_found(id.to_string()))?;

        if let Some(account_id) = changes.account_id {
            txn.account_id = account_id;
        }
        if let Some(kind) = changes.kind {
            txn.kind = kind;
        }
        if let Some(amount) = changes.amount {
            txn.amount = amount;
        }
        if let Some(date) = changes.date {
            txn.date = date;
        }
        if let Some(description) = changes.description {
            txn.description = description.trim().to_string();
        }
        if let Some(category_id) = changes.category_id {
            txn.category_id = category_id;
        }
        if let Some(status) = changes.status {
            txn.status = status;
        }
        if let Some(merchant) = changes.merchant {
            txn.merchant = normalize_merchant(merchant.as_deref());
        }
        if let Some(tags) = changes.tags {
            txn.tags = normalize_tags(&tags);
        }
        txn.updated_at = chrono::Utc::now();

        self.check(&txn)?;
        self.storage.transactions.update(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(transaction = %id, "updated transaction");
        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> FinlensResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| FinlensError::transaction_not_found(id.to_string()))?;
        self.storage.transactions.save()?;

        tracing::info!(transaction = %id, "deleted transaction");
        Ok(txn)
    }

    fn check(&self, txn: &Transaction) -> FinlensResult<()> {
        txn.validate()
            .map_err(|e| FinlensError::Validation(e.to_string()))?;

        if !self.storage.accounts.exists(txn.account_id)? {
            return Err(FinlensError::account_not_found(txn.account_id.to_string()));
        }

        if let Some(category_id) = txn.category_id {
            let category = self
                .storage
                .categories
                .get(category_id)?
                .ok_or_else(|| FinlensError::category_not_found(category_id.to_string()))?;
            if !category.kind.accepts(txn.kind) {
                return Err(FinlensError::Validation(format!(
                    "Category '{}' is an {} category and cannot be used for {} transactions",
                    category.name, category.kind, txn.kind
                )));
            }
        }

        Ok(())
    }
}
