//! Storage initialization
//!
//! Handles first-run setup: directories plus a starter set of categories.

use crate::config::paths::FinlensPaths;
use crate::error::FinlensError;
use crate::models::{Category, CategoryKind, ColorTag};

use super::Storage;

/// Starter categories: name, kind, icon, color
const DEFAULT_CATEGORIES: &[(&str, CategoryKind, &str, ColorTag)] = &[
    ("Salário", CategoryKind::Income, "💰", ColorTag::Green),
    ("Freelance", CategoryKind::Income, "💻", ColorTag::Teal),
    ("Investimentos", CategoryKind::Income, "📈", ColorTag::Blue),
    ("Alimentação", CategoryKind::Expense, "🍔", ColorTag::Orange),
    ("Transporte", CategoryKind::Expense, "🚗", ColorTag::Blue),
    ("Moradia", CategoryKind::Expense, "🏠", ColorTag::Red),
    ("Saúde", CategoryKind::Expense, "💊", ColorTag::Pink),
    ("Lazer", CategoryKind::Expense, "🎮", ColorTag::Purple),
    ("Educação", CategoryKind::Expense, "📚", ColorTag::Indigo),
];

/// Initialize storage for a fresh installation
///
/// Seeds the default categories when the categories table is empty; calling it
/// again is harmless.
pub fn initialize_storage(paths: &FinlensPaths) -> Result<Storage, FinlensError> {
    let storage = Storage::open(paths.clone())?;

    if storage.categories.count()? == 0 {
        for (name, kind, icon, color) in DEFAULT_CATEGORIES {
            storage.categories.insert_with(|id| {
                let mut category = Category::new(id, *name, *kind);
                category.icon = icon.to_string();
                category.color = *color;
                Ok(category)
            })?;
        }
        storage.categories.save()?;
        tracing::info!(
            categories = DEFAULT_CATEGORIES.len(),
            "seeded default categories"
        );
    }

    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_seeds_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinlensPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = initialize_storage(&paths).unwrap();
        let seeded = storage.categories.count().unwrap();
        assert_eq!(seeded, DEFAULT_CATEGORIES.len());
        assert!(paths.table_file("categories").exists());

        let again = initialize_storage(&paths).unwrap();
        assert_eq!(again.categories.count().unwrap(), seeded);
    }
}
