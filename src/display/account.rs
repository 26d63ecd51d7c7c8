//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use super::report::column_width;
use crate::models::{Account, Money};

/// Format a list of accounts as a table with a total row
pub fn format_account_list(accounts: &[Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = column_width(accounts.iter().map(|a| a.name.as_str()), 4);
    let types: Vec<String> = accounts.iter().map(|a| a.account_type.to_string()).collect();
    let type_width = column_width(types.iter().map(String::as_str), 4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6}  {:<name_width$}  {:<type_width$}  {:>14}  {:>14}\n",
        "ID",
        "Name",
        "Type",
        "Opening",
        "Balance",
        name_width = name_width,
        type_width = type_width,
    ));
    output.push_str(&format!(
        "{:-<6}  {:-<name_width$}  {:-<type_width$}  {:->14}  {:->14}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        type_width = type_width,
    ));

    for (account, account_type) in accounts.iter().zip(&types) {
        output.push_str(&format!(
            "{:<6}  {:<name_width$}  {:<type_width$}  {:>14}  {:>14}\n",
            account.id.to_string(),
            account.name,
            account_type,
            account.initial_balance.format_with_symbol(symbol),
            account.current_balance.format_with_symbol(symbol),
            name_width = name_width,
            type_width = type_width,
        ));
    }

    let total: Money = accounts.iter().map(|a| a.current_balance).sum();
    output.push_str(&format!(
        "{:<6}  {:<name_width$}  {:<type_width$}  {:>14}  {:>14}\n",
        "",
        "Total",
        "",
        "",
        total.format_with_symbol(symbol),
        name_width = name_width,
        type_width = type_width,
    ));

    output
}

/// Format a single account in detail
pub fn format_account_details(account: &Account, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} {}\n", account.account_type.icon(), account.name));
    output.push_str(&format!("  ID:       {}\n", account.id));
    output.push_str(&format!("  Type:     {}\n", account.account_type));
    output.push_str(&format!("  Currency: {}\n", account.currency));
    output.push_str(&format!(
        "  Opening:  {}\n",
        account.initial_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Balance:  {}\n",
        account.current_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Created:  {}\n",
        account.created_at.format("%Y-%m-%d")
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, AccountType};

    #[test]
    fn test_empty_list() {
        assert_eq!(format_account_list(&[], "R$"), "No accounts found.");
    }

    #[test]
    fn test_list_has_total() {
        let accounts = vec![
            Account::new(AccountId::new(1), "Banco Digital", AccountType::Checking, "BRL", Money::from_units(1500)),
            Account::new(AccountId::new(2), "Poupança", AccountType::Savings, "BRL", Money::from_units(500)),
        ];
        let output = format_account_list(&accounts, "R$");
        assert!(output.contains("Poupança"));
        assert!(output.contains("acc-2"));
        assert!(output.lines().last().unwrap().contains("R$ 2000.00"));
    }

    #[test]
    fn test_details() {
        let account = Account::new(AccountId::new(3), "Carteira", AccountType::Cash, "BRL", Money::from_cents(1050));
        let output = format_account_details(&account, "R$");
        assert!(output.contains("Balance:  R$ 10.50"));
    }
}
