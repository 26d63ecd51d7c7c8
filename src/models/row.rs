//! Raw rows as handed over by the data service
//!
//! A transaction row may embed `categories` and `accounts` join objects, any
//! of which can be missing (no category set, category deleted, account row not
//! visible). Fields here stay optional; `analytics::normalize` resolves them to
//! display values once.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::account::{Account, AccountType};
use super::category::Category;
use super::color::ColorTag;
use super::ids::{AccountId, CategoryId, TransactionId};
use super::money::Money;
use super::transaction::{Transaction, TransactionKind, TransactionStatus};

/// Embedded `categories(name, color, icon)` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryJoin {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<ColorTag>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl From<&Category> for CategoryJoin {
    fn from(category: &Category) -> Self {
        Self {
            name: Some(category.name.clone()),
            color: Some(category.color),
            icon: Some(category.icon.clone()),
        }
    }
}

/// Embedded `accounts(name)` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountJoin {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<&Account> for AccountJoin {
    fn from(account: &Account) -> Self {
        Self {
            name: Some(account.name.clone()),
        }
    }
}

/// A transaction row, optionally joined with its category and account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: TransactionId,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub amount: Money,

    pub account_id: AccountId,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    #[serde(deserialize_with = "deserialize_row_date")]
    pub date: NaiveDate,

    #[serde(default)]
    pub status: Option<TransactionStatus>,

    #[serde(default)]
    pub merchant: Option<String>,

    /// `null` and a missing column both read as no tags
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub categories: Option<CategoryJoin>,

    #[serde(default)]
    pub accounts: Option<AccountJoin>,
}

impl TransactionRow {
    /// Build a row from a stored transaction and whatever joins resolved
    pub fn joined(
        txn: &Transaction,
        category: Option<&Category>,
        account: Option<&Account>,
    ) -> Self {
        Self {
            id: txn.id,
            description: Some(txn.description.clone()),
            kind: txn.kind,
            amount: txn.amount,
            account_id: txn.account_id,
            category_id: txn.category_id,
            date: txn.date,
            status: Some(txn.status),
            merchant: txn.merchant.clone(),
            tags: txn.tags.clone(),
            categories: category.map(CategoryJoin::from),
            accounts: account.map(AccountJoin::from),
        }
    }
}

/// An account row; older rows carry a single `balance` column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: AccountId,

    pub name: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub initial_balance: Option<Money>,

    #[serde(default)]
    pub current_balance: Option<Money>,

    #[serde(default)]
    pub balance: Option<Money>,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            account_type: account.account_type,
            currency: Some(account.currency.clone()),
            initial_balance: Some(account.initial_balance),
            current_balance: Some(account.current_balance),
            balance: None,
        }
    }
}

/// Parse a row date: either a plain `YYYY-MM-DD` or an RFC 3339 timestamp,
/// which is reduced to its UTC calendar day
pub fn parse_row_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_row_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_row_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid row date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row_date() {
        let jan25 = NaiveDate::from_ymd_opt(2026, 1, 25).unwrap();
        assert_eq!(parse_row_date("2026-01-25"), Some(jan25));
        assert_eq!(parse_row_date("2026-01-25T00:00:00+00:00"), Some(jan25));
        // 22:30 in UTC-3 is already the next UTC day
        assert_eq!(
            parse_row_date("2026-01-24T22:30:00-03:00"),
            Some(jan25)
        );
        assert_eq!(parse_row_date("25/01/2026"), None);
    }

    #[test]
    fn test_row_with_joins() {
        let json = r#"{
            "id": 2, "description": "Supermercado", "type": "expense",
            "amount": 350, "account_id": 1, "category_id": 4,
            "date": "2026-01-24",
            "categories": {"name": "Alimentação", "color": "bg-orange-500"},
            "accounts": {"name": "Banco Digital"}
        }"#;
        let row: TransactionRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.amount, Money::from_units(350));
        assert_eq!(row.categories.unwrap().color, Some(ColorTag::Orange));
        assert_eq!(row.accounts.unwrap().name.as_deref(), Some("Banco Digital"));
        assert!(row.status.is_none());
    }

    #[test]
    fn test_row_without_joins() {
        let json = r#"{"id": 1, "type": "income", "amount": 5000.0,
                       "account_id": 1, "category_id": null, "date": "2026-01-25",
                       "categories": null}"#;
        let row: TransactionRow = serde_json::from_str(json).unwrap();
        assert!(row.categories.is_none());
        assert!(row.accounts.is_none());
        assert!(row.description.is_none());
        assert!(row.merchant.is_none());
        assert!(row.tags.is_empty());
    }

    #[test]
    fn test_row_with_merchant_and_tags() {
        let json = r#"{"id": 5, "type": "expense", "amount": "42.90", "account_id": 1,
                       "date": "2026-01-20", "merchant": "Padaria Central",
                       "tags": ["café", "trabalho"]}"#;
        let row: TransactionRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.merchant.as_deref(), Some("Padaria Central"));
        assert_eq!(row.tags, vec!["café", "trabalho"]);

        let untagged = r#"{"id": 6, "type": "expense", "amount": 1, "account_id": 1,
                           "date": "2026-01-20", "tags": null}"#;
        let row: TransactionRow = serde_json::from_str(untagged).unwrap();
        assert!(row.tags.is_empty());
    }

    #[test]
    fn test_unknown_color_rejected_on_ingestion() {
        let json = r#"{"id": 1, "type": "expense", "amount": 1, "account_id": 1,
                       "date": "2026-01-25", "categories": {"name": "X", "color": "bg-lime-500"}}"#;
        assert!(serde_json::from_str::<TransactionRow>(json).is_err());
    }

    #[test]
    fn test_legacy_account_row() {
        let json = r#"{"id": 3, "name": "Poupança", "type": "savings", "balance": 10000}"#;
        let row: AccountRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.balance, Some(Money::from_units(10000)));
        assert!(row.current_balance.is_none());
    }
}
