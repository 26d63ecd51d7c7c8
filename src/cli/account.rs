//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::{FinlensError, FinlensResult};
use crate::models::AccountType;
use crate::services::{AccountService, AccountUpdate};
use crate::storage::Storage;

use super::parse_amount;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (checking, savings, investment, cash, credit)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Currency code; defaults to the configured currency
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New account type
        #[arg(short = 't', long)]
        account_type: Option<String>,
        /// New currency code
        #[arg(short, long)]
        currency: Option<String>,
        /// Overwrite the current balance
        #[arg(short, long)]
        balance: Option<String>,
    },
    /// Delete an account and all of its transactions
    Delete {
        /// Account name or ID
        account: String,
    },
}

fn parse_account_type(s: &str) -> FinlensResult<AccountType> {
    AccountType::parse(s).ok_or_else(|| {
        FinlensError::Validation(format!(
            "Invalid account type: '{}'. Valid types: checking, savings, investment, cash, credit",
            s
        ))
    })
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> FinlensResult<()> {
    let service = AccountService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            balance,
            currency,
        } => {
            let account_type = parse_account_type(&account_type)?;
            let opening = parse_amount(&balance)?;
            let currency = currency.unwrap_or_else(|| settings.currency_code.clone());

            let account = service.create(&name, account_type, &currency, opening)?;

            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            println!("  Balance: {}", account.current_balance.format_with_symbol(symbol));
            println!("  ID: {}", account.id);
        }

        AccountCommands::List => {
            let accounts = service.list()?;
            println!("{}", format_account_list(&accounts, symbol));
        }

        AccountCommands::Show { account } => {
            let found = service.resolve(&account)?;
            print!("{}", format_account_details(&found, symbol));
        }

        AccountCommands::Edit {
            account,
            name,
            account_type,
            currency,
            balance,
        } => {
            let found = service.resolve(&account)?;

            if name.is_none() && account_type.is_none() && currency.is_none() && balance.is_none() {
                println!("No changes specified. Use --name, --account-type, --currency or --balance.");
                return Ok(());
            }

            let changes = AccountUpdate {
                name,
                account_type: account_type.as_deref().map(parse_account_type).transpose()?,
                currency,
                current_balance: balance.as_deref().map(parse_amount).transpose()?,
            };
            let updated = service.update(found.id, changes)?;
            println!("Updated account: {}", updated.name);
        }

        AccountCommands::Delete { account } => {
            let found = service.resolve(&account)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted account: {} (and its transactions)", deleted.name);
        }
    }

    Ok(())
}
