//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables, colored swatches and progress bars.

pub mod account;
pub mod category;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use category::{color_swatch, format_category_list};
pub use transaction::{format_transaction_register, format_transaction_row};
