//! Generic JSON table
//!
//! Each table lives in its own file as `{ "next_id": n, "rows": [...] }`.
//! Ids are serial and never reused, even after deletes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{FinlensError, FinlensResult};
use crate::models::{
    Account, AccountId, Budget, BudgetId, Category, CategoryId, Goal, GoalId, Transaction,
    TransactionId,
};

use super::file_io::{read_json, write_json_atomic};

/// A row type stored in a [`Table`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Table name; also the file stem
    const TABLE: &'static str;

    type Id: Copy + Ord + fmt::Display + From<i64> + Into<i64>;

    fn id(&self) -> Self::Id;
}

macro_rules! impl_record {
    ($record:ty, $id:ty, $table:literal) => {
        impl Record for $record {
            const TABLE: &'static str = $table;
            type Id = $id;

            fn id(&self) -> Self::Id {
                self.id
            }
        }
    };
}

impl_record!(Account, AccountId, "accounts");
impl_record!(Category, CategoryId, "categories");
impl_record!(Transaction, TransactionId, "transactions");
impl_record!(Budget, BudgetId, "budgets");
impl_record!(Goal, GoalId, "goals");

#[derive(Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct TableFile<T> {
    #[serde(default)]
    next_id: i64,
    #[serde(default)]
    rows: Vec<T>,
}

impl<T> Default for TableFile<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

struct TableState<T: Record> {
    next_id: i64,
    rows: BTreeMap<T::Id, T>,
}

/// One JSON-backed table held in memory
pub struct Table<T: Record> {
    path: PathBuf,
    state: RwLock<TableState<T>>,
}

impl<T: Record> Table<T> {
    /// Create an empty table backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(TableState {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    fn read(&self) -> FinlensResult<RwLockReadGuard<'_, TableState<T>>> {
        self.state
            .read()
            .map_err(|e| FinlensError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FinlensResult<RwLockWriteGuard<'_, TableState<T>>> {
        self.state
            .write()
            .map_err(|e| FinlensError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load rows from disk, replacing whatever is in memory
    pub fn load(&self) -> FinlensResult<()> {
        let file: TableFile<T> = read_json(&self.path)?;
        let mut state = self.write()?;

        state.rows = file.rows.into_iter().map(|row| (row.id(), row)).collect();
        let max_id: i64 = state
            .rows
            .keys()
            .next_back()
            .map(|id| (*id).into())
            .unwrap_or(0);
        state.next_id = file.next_id.max(max_id + 1).max(1);

        tracing::debug!(table = T::TABLE, rows = state.rows.len(), "loaded table");
        Ok(())
    }

    /// Write rows to disk
    pub fn save(&self) -> FinlensResult<()> {
        let state = self.read()?;
        let file = TableFile {
            next_id: state.next_id,
            rows: state.rows.values().cloned().collect::<Vec<_>>(),
        };
        write_json_atomic(&self.path, &file)?;

        tracing::debug!(table = T::TABLE, rows = file.rows.len(), "saved table");
        Ok(())
    }

    /// Insert a row built around the next free id
    ///
    /// The id is only consumed when `build` succeeds.
    pub fn insert_with<F>(&self, build: F) -> FinlensResult<T>
    where
        F: FnOnce(T::Id) -> FinlensResult<T>,
    {
        let mut state = self.write()?;
        let id = T::Id::from(state.next_id);
        let row = build(id)?;
        if row.id() != id {
            return Err(FinlensError::Storage(format!(
                "{} row built with id {} instead of {}",
                T::TABLE,
                row.id(),
                id
            )));
        }
        state.next_id += 1;
        state.rows.insert(id, row.clone());
        Ok(row)
    }

    /// Replace an existing row; returns false if there is none with that id
    pub fn update(&self, row: T) -> FinlensResult<bool> {
        let mut state = self.write()?;
        match state.rows.get_mut(&row.id()) {
            Some(slot) => {
                *slot = row;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a row, returning it
    pub fn delete(&self, id: T::Id) -> FinlensResult<Option<T>> {
        Ok(self.write()?.rows.remove(&id))
    }

    /// Remove every row matching `pred`; returns how many were removed
    pub fn delete_where<P>(&self, pred: P) -> FinlensResult<usize>
    where
        P: Fn(&T) -> bool,
    {
        let mut state = self.write()?;
        let before = state.rows.len();
        state.rows.retain(|_, row| !pred(row));
        Ok(before - state.rows.len())
    }

    /// Apply `change` to every row matching `pred`; returns how many changed
    pub fn modify_where<P, F>(&self, pred: P, mut change: F) -> FinlensResult<usize>
    where
        P: Fn(&T) -> bool,
        F: FnMut(&mut T),
    {
        let mut state = self.write()?;
        let mut changed = 0;
        for row in state.rows.values_mut().filter(|row| pred(row)) {
            change(row);
            changed += 1;
        }
        Ok(changed)
    }

    pub fn get(&self, id: T::Id) -> FinlensResult<Option<T>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    pub fn exists(&self, id: T::Id) -> FinlensResult<bool> {
        Ok(self.read()?.rows.contains_key(&id))
    }

    /// All rows in id order
    pub fn list(&self) -> FinlensResult<Vec<T>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    pub fn count(&self) -> FinlensResult<usize> {
        Ok(self.read()?.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_table() -> (TempDir, Table<Account>) {
        let temp_dir = TempDir::new().unwrap();
        let table = Table::new(temp_dir.path().join("accounts.json"));
        (temp_dir, table)
    }

    fn account(id: AccountId, name: &str) -> FinlensResult<Account> {
        Ok(Account::new(
            id,
            name,
            AccountType::Checking,
            "BRL",
            Money::from_units(100),
        ))
    }

    #[test]
    fn test_serial_ids() {
        let (_temp_dir, table) = create_test_table();
        table.load().unwrap();

        let a = table.insert_with(|id| account(id, "A")).unwrap();
        let b = table.insert_with(|id| account(id, "B")).unwrap();
        assert_eq!(a.id, AccountId::new(1));
        assert_eq!(b.id, AccountId::new(2));
    }

    #[test]
    fn test_failed_build_does_not_consume_id() {
        let (_temp_dir, table) = create_test_table();
        let failed = table.insert_with(|_| Err(FinlensError::Validation("nope".into())));
        assert!(failed.is_err());

        let a = table.insert_with(|id| account(id, "A")).unwrap();
        assert_eq!(a.id, AccountId::new(1));
    }

    #[test]
    fn test_ids_not_reused_after_reload() {
        let (temp_dir, table) = create_test_table();
        table.insert_with(|id| account(id, "A")).unwrap();
        let b = table.insert_with(|id| account(id, "B")).unwrap();
        table.delete(b.id).unwrap();
        table.save().unwrap();

        let reloaded: Table<Account> = Table::new(temp_dir.path().join("accounts.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 1);
        let c = reloaded.insert_with(|id| account(id, "C")).unwrap();
        assert_eq!(c.id, AccountId::new(3));
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp_dir, table) = create_test_table();
        let mut a = table.insert_with(|id| account(id, "A")).unwrap();

        a.name = "Renamed".into();
        assert!(table.update(a.clone()).unwrap());
        assert_eq!(table.get(a.id).unwrap().unwrap().name, "Renamed");

        assert!(table.delete(a.id).unwrap().is_some());
        assert!(!table.update(a).unwrap());
    }

    #[test]
    fn test_bulk_operations() {
        let (_temp_dir, table) = create_test_table();
        for name in ["A", "B", "C"] {
            table.insert_with(|id| account(id, name)).unwrap();
        }

        let changed = table
            .modify_where(|a| a.name != "B", |a| a.currency = "USD".into())
            .unwrap();
        assert_eq!(changed, 2);

        let removed = table.delete_where(|a| a.currency == "USD").unwrap();
        assert_eq!(removed, 2);
        assert_eq!(table.list().unwrap()[0].name, "B");
    }

    #[test]
    fn test_file_without_next_id() {
        let (temp_dir, table) = create_test_table();
        std::fs::write(
            temp_dir.path().join("accounts.json"),
            r#"{"rows": [{"id": 4, "name": "Carteira", "type": "cash", "currency": "BRL",
                "initial_balance": 10, "current_balance": 10,
                "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"}]}"#,
        )
        .unwrap();
        table.load().unwrap();
        let next = table.insert_with(|id| account(id, "Nova")).unwrap();
        assert_eq!(next.id, AccountId::new(5));
    }
}
