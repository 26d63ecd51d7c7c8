//! Category display formatting

use super::report::column_width;
use crate::models::{CategoryKind, ColorTag};
use crate::services::CategoryUsage;

const RESET: &str = "\x1b[0m";

/// A colored swatch for a category color
pub fn color_swatch(color: ColorTag) -> String {
    format!("{}●{}", color.ansi(), RESET)
}

/// Format categories grouped by kind, with their usage
pub fn format_category_list(usages: &[CategoryUsage], symbol: &str) -> String {
    if usages.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = column_width(usages.iter().map(|u| u.category.name.as_str()), 8);
    let mut output = String::new();

    for (kind, title) in [(CategoryKind::Income, "INCOME"), (CategoryKind::Expense, "EXPENSE")] {
        let group: Vec<_> = usages.iter().filter(|u| u.category.kind == kind).collect();
        if group.is_empty() {
            continue;
        }

        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(title);
        output.push('\n');

        for usage in group {
            let category = &usage.category;
            output.push_str(&format!(
                "  {:<7} {} {} {:<name_width$}  {:>4} txns  {:>14}\n",
                category.id.to_string(),
                color_swatch(category.color),
                category.icon,
                category.name,
                usage.transactions,
                usage.total.format_with_symbol(symbol),
                name_width = name_width,
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryId, Money};

    #[test]
    fn test_grouped_by_kind() {
        let usages = vec![
            CategoryUsage {
                category: Category::new(CategoryId::new(1), "Salário", CategoryKind::Income),
                transactions: 1,
                total: Money::from_units(5000),
            },
            CategoryUsage {
                category: Category::new(CategoryId::new(2), "Lazer", CategoryKind::Expense),
                transactions: 0,
                total: Money::zero(),
            },
        ];
        let output = format_category_list(&usages, "R$");
        let income_at = output.find("INCOME").unwrap();
        let expense_at = output.find("EXPENSE").unwrap();
        assert!(income_at < expense_at);
        assert!(output.contains("R$ 5000.00"));
    }
}
