//! Category service
//!
//! Categories are either income or expense; a transaction may only reference a
//! category of its own kind.

use crate::error::{FinlensError, FinlensResult};
use crate::models::{Category, CategoryId, CategoryKind, ColorTag, Money};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Fields that can be changed on an existing category
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub kind: Option<CategoryKind>,
    pub icon: Option<String>,
    pub color: Option<ColorTag>,
}

/// A category with its transaction usage
#[derive(Debug, Clone)]
pub struct CategoryUsage {
    pub category: Category,
    pub transactions: usize,
    pub total: Money,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(
        &self,
        name: &str,
        kind: CategoryKind,
        icon: Option<&str>,
        color: ColorTag,
    ) -> FinlensResult<Category> {
        let name = name.trim();
        self.ensure_unique_name(name, kind, None)?;

        let category = self.storage.categories.insert_with(|id| {
            let mut category = Category::new(id, name, kind);
            if let Some(icon) = icon.map(str::trim).filter(|i| !i.is_empty()) {
                category.icon = icon.to_string();
            }
            category.color = color;
            category
                .validate()
                .map_err(|e| FinlensError::Validation(e.to_string()))?;
            Ok(category)
        })?;
        self.storage.categories.save()?;

        tracing::info!(category = %category.id, name = %category.name, kind = %kind, "created category");
        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> FinlensResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name (case-insensitive) or ID string
    pub fn find(&self, identifier: &str) -> FinlensResult<Option<Category>> {
        let wanted = identifier.trim().to_lowercase();
        let categories = self.storage.categories.list()?;

        if let Some(category) = categories.iter().find(|c| c.name.to_lowercase() == wanted) {
            return Ok(Some(category.clone()));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find) but missing categories are an error
    pub fn resolve(&self, identifier: &str) -> FinlensResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| FinlensError::category_not_found(identifier))
    }

    /// Categories ordered by kind then name, optionally only one kind
    pub fn list(&self, kind: Option<CategoryKind>) -> FinlensResult<Vec<Category>> {
        let mut categories: Vec<_> = self
            .storage
            .categories
            .list()?
            .into_iter()
            .filter(|c| kind.map_or(true, |k| c.kind == k))
            .collect();
        categories.sort_by(|a, b| {
            kind_order(a.kind)
                .cmp(&kind_order(b.kind))
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(categories)
    }

    /// Each category with how many transactions use it and their total
    pub fn usage(&self, kind: Option<CategoryKind>) -> FinlensResult<Vec<CategoryUsage>> {
        let transactions = self.storage.transactions.list()?;

        Ok(self
            .list(kind)?
            .into_iter()
            .map(|category| {
                let used: Vec<_> = transactions
                    .iter()
                    .filter(|t| t.category_id == Some(category.id))
                    .collect();
                CategoryUsage {
                    transactions: used.len(),
                    total: used.iter().map(|t| t.amount).sum(),
                    category,
                }
            })
            .collect())
    }

    /// Apply an update to a category
    ///
    /// Changing the kind is refused while transactions of the old kind still
    /// reference the category.
    pub fn update(&self, id: CategoryId, changes: CategoryUpdate) -> FinlensResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| FinlensError::category_not_found(id.to_string()))?;

        if let Some(kind) = changes.kind.filter(|k| *k != category.kind) {
            let in_use = self
                .storage
                .transactions
                .list()?
                .iter()
                .any(|t| t.category_id == Some(id));
            if in_use {
                return Err(FinlensError::Validation(format!(
                    "Category '{}' is used by transactions and cannot become {}",
                    category.name, kind
                )));
            }
            if kind == CategoryKind::Income && self.has_budgets(id)? {
                return Err(FinlensError::Validation(format!(
                    "Category '{}' has budgets and must stay an expense category",
                    category.name
                )));
            }
            category.kind = kind;
        }
        if let Some(name) = changes.name {
            category.name = name.trim().to_string();
        }
        self.ensure_unique_name(&category.name, category.kind, Some(id))?;
        if let Some(icon) = changes.icon {
            category.icon = icon;
        }
        if let Some(color) = changes.color {
            category.color = color;
        }
        category.updated_at = chrono::Utc::now();

        category
            .validate()
            .map_err(|e| FinlensError::Validation(e.to_string()))?;

        self.storage.categories.update(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(category = %id, "updated category");
        Ok(category)
    }

    /// Delete a category; its transactions become uncategorized and its
    /// budgets are removed
    pub fn delete(&self, id: CategoryId) -> FinlensResult<Category> {
        let category = self.storage.delete_category(id)?;
        self.storage.categories.save()?;
        self.storage.transactions.save()?;
        self.storage.budgets.save()?;
        Ok(category)
    }

    fn has_budgets(&self, id: CategoryId) -> FinlensResult<bool> {
        Ok(self
            .storage
            .budgets
            .list()?
            .iter()
            .any(|b| b.category_id == id))
    }

    fn ensure_unique_name(
        &self,
        name: &str,
        kind: CategoryKind,
        exclude: Option<CategoryId>,
    ) -> FinlensResult<()> {
        let lower = name.to_lowercase();
        let taken = self.storage.categories.list()?.iter().any(|c| {
            c.kind == kind && c.name.to_lowercase() == lower && Some(c.id) != exclude
        });

        if taken {
            return Err(FinlensError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }
        Ok(())
    }
}

fn kind_order(kind: CategoryKind) -> u8 {
    match kind {
        CategoryKind::Income => 0,
        CategoryKind::Expense => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinlensPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinlensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_and_list_by_kind() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service
            .create("Transporte", CategoryKind::Expense, Some("🚗"), ColorTag::Blue)
            .unwrap();
        service
            .create("Salário", CategoryKind::Income, None, ColorTag::Green)
            .unwrap();
        service
            .create("Alimentação", CategoryKind::Expense, None, ColorTag::Orange)
            .unwrap();

        let all: Vec<_> = service.list(None).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(all, vec!["Salário", "Alimentação", "Transporte"]);

        let income = service.list(Some(CategoryKind::Income)).unwrap();
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].icon, "🏷️");
    }

    #[test]
    fn test_same_name_allowed_across_kinds() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service
            .create("Outros", CategoryKind::Expense, None, ColorTag::Gray)
            .unwrap();
        assert!(service
            .create("Outros", CategoryKind::Income, None, ColorTag::Gray)
            .is_ok());
        assert!(matches!(
            service.create("outros", CategoryKind::Expense, None, ColorTag::Gray),
            Err(FinlensError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_update_color_and_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let category = service
            .create("Lazer", CategoryKind::Expense, None, ColorTag::Gray)
            .unwrap();

        let updated = service
            .update(
                category.id,
                CategoryUpdate {
                    name: Some("Diversão".into()),
                    color: Some(ColorTag::Purple),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Diversão");
        assert_eq!(updated.color, ColorTag::Purple);
        assert_eq!(service.resolve("diversão").unwrap().id, category.id);
    }
}
