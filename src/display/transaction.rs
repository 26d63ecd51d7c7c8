//! Transaction display formatting
//!
//! Register-style listing of resolved transactions.

use super::report::truncate;
use crate::analytics::TransactionView;
use crate::models::{TransactionKind, TransactionStatus};

fn signed_amount(view: &TransactionView, symbol: &str) -> String {
    let amount = view.amount.format_with_symbol(symbol);
    match view.kind {
        TransactionKind::Income => format!("+{}", amount),
        TransactionKind::Expense => format!("-{}", amount),
        TransactionKind::Transfer => format!("⇄{}", amount),
    }
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(view: &TransactionView, symbol: &str, date_format: &str) -> String {
    let status = match view.status {
        TransactionStatus::Completed => "✓",
        TransactionStatus::Pending => "…",
    };
    let description = match (view.description.is_empty(), view.merchant.as_deref()) {
        (true, None) => "(no description)".to_string(),
        (true, Some(merchant)) => merchant.to_string(),
        (false, None) => view.description.clone(),
        (false, Some(merchant)) => format!("{} @ {}", view.description, merchant),
    };

    let mut row = format!(
        "{:<7} {} {:<10} {:<24} {:<18} {:<18} {:>15}",
        view.id.to_string(),
        status,
        view.date.format(date_format).to_string(),
        truncate(&description, 24),
        truncate(&view.category, 18),
        truncate(&view.account, 18),
        signed_amount(view, symbol)
    );
    for tag in &view.tags {
        row.push_str(" #");
        row.push_str(tag);
    }
    row
}

/// Format a list of transactions as a register
pub fn format_transaction_register(views: &[TransactionView], symbol: &str, date_format: &str) -> String {
    if views.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<7} {} {:<10} {:<24} {:<18} {:<18} {:>15}\n",
        "ID", "S", "Date", "Description", "Category", "Account", "Amount"
    ));
    output.push_str(&"-".repeat(99));
    output.push('\n');

    for view in views {
        output.push_str(&format_transaction_row(view, symbol, date_format));
        output.push('\n');
    }

    output
}
