//! Transaction queries
//!
//! Filter, sort and limit over the transactions table, with category and
//! account joins resolved the way the reports expect them.

use chrono::NaiveDate;

use crate::analytics::PeriodWindow;
use crate::models::{AccountId, CategoryId, Transaction, TransactionKind};

/// Filter for [`Storage::query_transactions`](super::Storage::query_transactions)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    /// First day included
    pub from: Option<NaiveDate>,
    /// Last day included
    pub to: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
    pub account: Option<AccountId>,
    pub category: Option<CategoryId>,
    /// Tag the transaction must carry, compared case-insensitively
    pub tag: Option<String>,
    pub limit: Option<usize>,
    /// Sort by date descending instead of ascending
    pub newest_first: bool,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the days a period window selects
    pub fn within(mut self, window: &PeriodWindow) -> Self {
        self.from = Some(window.first_day());
        self.to = Some(window.last_day());
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn account(mut self, account: AccountId) -> Self {
        self.account = Some(account);
        self
    }

    pub fn category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.newest_first = true;
        self
    }

    /// Check a stored transaction against every filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.from.map_or(true, |from| txn.date >= from)
            && self.to.map_or(true, |to| txn.date <= to)
            && self.kind.map_or(true, |kind| txn.kind == kind)
            && self.account.map_or(true, |account| txn.account_id == account)
            && self
                .category
                .map_or(true, |category| txn.category_id == Some(category))
            && self.tag.as_deref().map_or(true, |tag| txn.has_tag(tag))
    }

    /// Filter, order and limit `txns` in place
    pub(crate) fn apply(&self, txns: &mut Vec<Transaction>) {
        txns.retain(|t| self.matches(t));
        // ties on date keep insertion (id) order
        txns.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        if self.newest_first {
            txns.reverse();
        }
        if let Some(limit) = self.limit {
            txns.truncate(limit);
        }
    }
}
