//! Row normalization
//!
//! Turns joined rows into flat display records. Missing joins are an expected
//! state and resolve to placeholder labels; nothing here fails.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{
    AccountId, AccountRow, AccountType, CategoryId, ColorTag, Money, TransactionId,
    TransactionKind, TransactionRow, TransactionStatus,
};

/// Label used when a transaction has no resolvable category
pub const UNCATEGORIZED_LABEL: &str = "Sem Categoria";

/// Label used when a transaction's account cannot be resolved
pub const UNKNOWN_ACCOUNT_LABEL: &str = "Conta Desconhecida";

/// A transaction flattened for display and aggregation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    pub id: TransactionId,
    pub description: String,
    pub kind: TransactionKind,
    /// Magnitude; never negative
    pub amount: Money,
    pub date: NaiveDate,
    pub status: TransactionStatus,
    pub account_id: AccountId,
    pub category_id: Option<CategoryId>,
    pub merchant: Option<String>,
    pub tags: Vec<String>,
    /// Resolved category label
    pub category: String,
    pub category_color: ColorTag,
    pub category_icon: Option<String>,
    /// Resolved account label
    pub account: String,
}

/// An account with its balances resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub name: String,
    pub account_type: AccountType,
    pub currency: String,
    pub initial_balance: Money,
    pub current_balance: Money,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Flatten one transaction row
pub fn normalize_transaction(row: &TransactionRow) -> TransactionView {
    let category = row.categories.as_ref();

    TransactionView {
        id: row.id,
        description: row.description.clone().unwrap_or_default(),
        kind: row.kind,
        amount: row.amount.abs(),
        date: row.date,
        status: row.status.unwrap_or_default(),
        account_id: row.account_id,
        category_id: row.category_id,
        merchant: non_empty(row.merchant.as_ref()).map(str::to_string),
        tags: row.tags.clone(),
        category: non_empty(category.and_then(|c| c.name.as_ref()))
            .unwrap_or(UNCATEGORIZED_LABEL)
            .to_string(),
        category_color: category.and_then(|c| c.color).unwrap_or_default(),
        category_icon: non_empty(category.and_then(|c| c.icon.as_ref())).map(str::to_string),
        account: non_empty(row.accounts.as_ref().and_then(|a| a.name.as_ref()))
            .unwrap_or(UNKNOWN_ACCOUNT_LABEL)
            .to_string(),
    }
}

/// Flatten a row set, preserving order
pub fn normalize_transactions(rows: &[TransactionRow]) -> Vec<TransactionView> {
    rows.iter().map(normalize_transaction).collect()
}

/// Resolve an account row's balances
///
/// `current_balance` falls back to the legacy `balance` column, then to the
/// opening balance; `initial_balance` falls back the other way round.
pub fn normalize_account(row: &AccountRow, default_currency: &str) -> AccountView {
    let current = row
        .current_balance
        .or(row.balance)
        .or(row.initial_balance)
        .unwrap_or_default();
    let initial = row
        .initial_balance
        .or(row.balance)
        .or(row.current_balance)
        .unwrap_or_default();

    AccountView {
        id: row.id,
        name: row.name.clone(),
        account_type: row.account_type,
        currency: non_empty(row.currency.as_ref())
            .unwrap_or(default_currency)
            .to_string(),
        initial_balance: initial,
        current_balance: current,
    }
}
