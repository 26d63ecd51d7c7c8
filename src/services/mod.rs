//! Service layer for Finlens
//!
//! Business logic between the CLI and storage: validation against the other
//! tables, persistence after each write and logging of what changed.

pub mod account;
pub mod budget;
pub mod category;
pub mod goal;
pub mod transaction;

pub use account::{AccountService, AccountUpdate};
pub use budget::{BudgetService, BudgetUpdate};
pub use category::{CategoryService, CategoryUpdate, CategoryUsage};
pub use goal::{GoalService, GoalUpdate, NewGoal};
pub use transaction::{NewTransaction, TransactionService, TransactionTotals, TransactionUpdate};
