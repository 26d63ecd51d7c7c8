//! Account model
//!
//! Represents financial accounts (checking, savings, credit cards, etc.)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Checking account
    #[default]
    Checking,
    /// Savings account
    Savings,
    /// Investment account
    Investment,
    /// Cash/wallet
    Cash,
    /// Credit card
    Credit,
}

impl AccountType {
    /// Returns true if this account type typically carries a negative balance
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::Credit)
    }

    /// Glyph shown next to accounts of this type
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Cash => "💵",
            Self::Checking => "🏦",
            Self::Investment => "📈",
            Self::Credit => "💳",
            Self::Savings => "🐷",
        }
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "investment" => Some(Self::Investment),
            "cash" => Some(Self::Cash),
            "credit" | "credit_card" | "creditcard" => Some(Self::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::Investment => write!(f, "Investment"),
            Self::Cash => write!(f, "Cash"),
            Self::Credit => write!(f, "Credit Card"),
        }
    }
}

/// A financial account
///
/// `current_balance` is stored on its own; transactions never move it. A manual
/// edit overwrites it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Row key
    pub id: AccountId,

    /// Account name (e.g. "Banco Digital")
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// ISO currency code
    pub currency: String,

    /// Balance when the account was created
    pub initial_balance: Money,

    /// Running balance
    pub current_balance: Money,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account whose current balance starts at the opening balance
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        account_type: AccountType,
        currency: impl Into<String>,
        opening_balance: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            account_type,
            currency: currency.into(),
            initial_balance: opening_balance,
            current_balance: opening_balance,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the running balance (manual adjustment)
    pub fn set_current_balance(&mut self, balance: Money) {
        self.current_balance = balance;
        self.updated_at = Utc::now();
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        let code = self.currency.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AccountValidationError::InvalidCurrency(self.currency.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidCurrency(String),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::InvalidCurrency(code) => {
                write!(f, "Invalid currency code '{}': expected 3 letters", code)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        Account::new(
            AccountId::new(1),
            "Banco Digital",
            AccountType::Checking,
            "BRL",
            Money::from_units(5000),
        )
    }

    #[test]
    fn test_new_account_starts_at_opening_balance() {
        let account = sample();
        assert_eq!(account.initial_balance, Money::from_units(5000));
        assert_eq!(account.current_balance, Money::from_units(5000));
    }

    #[test]
    fn test_manual_adjustment_keeps_initial_balance() {
        let mut account = sample();
        account.set_current_balance(Money::from_units(4200));
        assert_eq!(account.current_balance, Money::from_units(4200));
        assert_eq!(account.initial_balance, Money::from_units(5000));
    }

    #[test]
    fn test_validation() {
        let mut account = sample();
        assert!(account.validate().is_ok());

        account.currency = "R$".into();
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::InvalidCurrency(_))
        ));

        account.currency = "BRL".into();
        account.name = "  ".into();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("checking"), Some(AccountType::Checking));
        assert_eq!(AccountType::parse("SAVINGS"), Some(AccountType::Savings));
        assert_eq!(AccountType::parse("credit_card"), Some(AccountType::Credit));
        assert_eq!(AccountType::parse("line_of_credit"), None);
        assert!(AccountType::Credit.is_liability());
    }

    #[test]
    fn test_type_serializes_lowercase() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"type\":\"checking\""));
        assert!(json.contains("\"current_balance\":5000.0"));
    }
}
