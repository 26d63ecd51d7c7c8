//! Account service
//!
//! CRUD for accounts. The running balance is a stored value: it starts at the
//! opening balance and only changes through an explicit edit.

use crate::error::{FinlensError, FinlensResult};
use crate::models::{Account, AccountId, AccountType, Money};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

/// Fields that can be changed on an existing account
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub account_type: Option<AccountType>,
    pub currency: Option<String>,
    /// Overwrites the running balance
    pub current_balance: Option<Money>,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new account; its current balance starts at `opening_balance`
    pub fn create(
        &self,
        name: &str,
        account_type: AccountType,
        currency: &str,
        opening_balance: Money,
    ) -> FinlensResult<Account> {
        let name = name.trim();
        self.ensure_unique_name(name, None)?;

        let account = self.storage.accounts.insert_with(|id| {
            let account = Account::new(
                id,
                name,
                account_type,
                currency.trim().to_uppercase(),
                opening_balance,
            );
            account
                .validate()
                .map_err(|e| FinlensError::Validation(e.to_string()))?;
            Ok(account)
        })?;
        self.storage.accounts.save()?;

        tracing::info!(account = %account.id, name = %account.name, "created account");
        Ok(account)
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> FinlensResult<Option<Account>> {
        self.storage.accounts.get(id)
    }

    /// Find an account by name (case-insensitive) or ID string
    pub fn find(&self, identifier: &str) -> FinlensResult<Option<Account>> {
        let wanted = identifier.trim().to_lowercase();
        let accounts = self.storage.accounts.list()?;

        if let Some(account) = accounts.iter().find(|a| a.name.to_lowercase() == wanted) {
            return Ok(Some(account.clone()));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.storage.accounts.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find) but missing accounts are an error
    pub fn resolve(&self, identifier: &str) -> FinlensResult<Account> {
        self.find(identifier)?
            .ok_or_else(|| FinlensError::account_not_found(identifier))
    }

    /// All accounts ordered by name
    pub fn list(&self) -> FinlensResult<Vec<Account>> {
        let mut accounts = self.storage.accounts.list()?;
        accounts.sort_by_key(|a| a.name.to_lowercase());
        Ok(accounts)
    }

    /// Sum of the running balances of every account
    pub fn total_balance(&self) -> FinlensResult<Money> {
        Ok(self
            .storage
            .accounts
            .list()?
            .iter()
            .map(|a| a.current_balance)
            .sum())
    }

    /// Apply an update to an account
    pub fn update(&self, id: AccountId, changes: AccountUpdate) -> FinlensResult<Account> {
        let mut account = self
            .storage
            .accounts
            .get(id)?
            .ok_or_else(|| FinlensError::account_not_found(id.to_string()))?;

        if let Some(name) = changes.name {
            let name = name.trim().to_string();
            self.ensure_unique_name(&name, Some(id))?;
            account.name = name;
        }
        if let Some(account_type) = changes.account_type {
            account.account_type = account_type;
        }
        if let Some(currency) = changes.currency {
            account.currency = currency.trim().to_uppercase();
        }
        if let Some(balance) = changes.current_balance {
            account.set_current_balance(balance);
        }
        account.updated_at = chrono::Utc::now();

        account
            .validate()
            .map_err(|e| FinlensError::Validation(e.to_string()))?;

        self.storage.accounts.update(account.clone())?;
        self.storage.accounts.save()?;

        tracing::info!(account = %id, "updated account");
        Ok(account)
    }

    /// Delete an account together with its transactions
    pub fn delete(&self, id: AccountId) -> FinlensResult<Account> {
        let account = self.storage.delete_account(id)?;
        self.storage.accounts.save()?;
        self.storage.transactions.save()?;
        Ok(account)
    }

    fn ensure_unique_name(&self, name: &str, exclude: Option<AccountId>) -> FinlensResult<()> {
        let lower = name.to_lowercase();
        let taken = self
            .storage
            .accounts
            .list()?
            .iter()
            .any(|a| a.name.to_lowercase() == lower && Some(a.id) != exclude);

        if taken {
            return Err(FinlensError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }
        Ok(())
    }
}
