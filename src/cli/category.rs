//! Category CLI commands
//!
//! Implements CLI commands for income and expense categories.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::category::format_category_list;
use crate::error::{FinlensError, FinlensResult};
use crate::models::{CategoryKind, ColorTag};
use crate::services::{CategoryService, CategoryUpdate};
use crate::storage::Storage;

use super::parse_color;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories with their usage
    List {
        /// Only show one kind (income or expense)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Kind (income or expense)
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Icon shown next to the name
        #[arg(short, long)]
        icon: Option<String>,
        /// Color swatch (gray, red, orange, yellow, green, teal, blue, indigo, purple, pink)
        #[arg(long, default_value = "gray")]
        color: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New kind
        #[arg(short, long)]
        kind: Option<String>,
        /// New icon
        #[arg(short, long)]
        icon: Option<String>,
        /// New color swatch
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a category (its transactions become uncategorized)
    Delete {
        /// Category name or ID
        category: String,
    },
}

fn parse_kind(s: &str) -> FinlensResult<CategoryKind> {
    CategoryKind::parse(s).ok_or_else(|| {
        FinlensError::Validation(format!(
            "Invalid category kind: '{}'. Use income or expense",
            s
        ))
    })
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> FinlensResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let usages = service.usage(kind)?;
            println!("{}", format_category_list(&usages, &settings.currency_symbol));
        }

        CategoryCommands::Create {
            name,
            kind,
            icon,
            color,
        } => {
            let kind = parse_kind(&kind)?;
            let color: ColorTag = parse_color(&color)?;
            let category = service.create(&name, kind, icon.as_deref(), color)?;
            println!(
                "Created {} category: {} {} ({})",
                category.kind, category.icon, category.name, category.id
            );
        }

        CategoryCommands::Edit {
            category,
            name,
            kind,
            icon,
            color,
        } => {
            let found = service.resolve(&category)?;

            if name.is_none() && kind.is_none() && icon.is_none() && color.is_none() {
                println!("No changes specified. Use --name, --kind, --icon or --color.");
                return Ok(());
            }

            let changes = CategoryUpdate {
                name,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                icon,
                color: color.as_deref().map(parse_color).transpose()?,
            };
            let updated = service.update(found.id, changes)?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let found = service.resolve(&category)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted category: {}", deleted.name);
        }
    }

    Ok(())
}
