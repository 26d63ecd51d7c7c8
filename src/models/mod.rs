//! Core data models for Finlens
//!
//! This module contains the records stored in the row store (accounts,
//! categories, transactions, budgets, goals) and the raw joined row shapes the
//! reports read.

pub mod account;
pub mod budget;
pub mod category;
pub mod color;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod row;
pub mod transaction;

pub use account::{Account, AccountType};
pub use budget::Budget;
pub use category::{Category, CategoryKind};
pub use color::ColorTag;
pub use goal::Goal;
pub use ids::{AccountId, BudgetId, CategoryId, GoalId, TransactionId};
pub use money::Money;
pub use period::CalendarMonth;
pub use row::{AccountJoin, AccountRow, CategoryJoin, TransactionRow};
pub use transaction::{
    normalize_merchant, normalize_tags, Transaction, TransactionKind, TransactionStatus,
};
