//! Transaction CLI commands
//!
//! Implements CLI commands for recording and listing transactions.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::format_transaction_register;
use crate::error::{FinlensError, FinlensResult};
use crate::models::{Category, CategoryKind, TransactionId, TransactionKind, TransactionStatus};
use crate::services::{
    AccountService, CategoryService, NewTransaction, TransactionService, TransactionUpdate,
};
use crate::storage::{Storage, TransactionQuery};

use super::{parse_amount, parse_date, today};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Account name or ID
        account: String,
        /// Amount (always positive; the kind gives the direction)
        amount: String,
        /// Kind (income, expense, transfer)
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Merchant or payer
        #[arg(long)]
        merchant: Option<String>,
        /// Tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Mark as pending
        #[arg(long)]
        pending: bool,
    },
    /// List transactions, newest first
    List {
        /// Kind filter (all, income, expense, transfer)
        #[arg(short, long, default_value = "all")]
        kind: String,
        /// Filter by account
        #[arg(short, long)]
        account: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Only transactions carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// Move to another account
        #[arg(short, long)]
        account: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New kind
        #[arg(short, long)]
        kind: Option<String>,
        /// New category
        #[arg(short, long, conflicts_with = "uncategorize")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        uncategorize: bool,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// New status (completed, pending)
        #[arg(short, long)]
        status: Option<String>,
        /// New merchant
        #[arg(long, conflicts_with = "no_merchant")]
        merchant: Option<String>,
        /// Remove the merchant
        #[arg(long)]
        no_merchant: bool,
        /// Replace the tags (repeatable)
        #[arg(short, long = "tag", conflicts_with = "clear_tags")]
        tags: Vec<String>,
        /// Remove all tags
        #[arg(long)]
        clear_tags: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
    },
}

fn parse_kind(s: &str) -> FinlensResult<TransactionKind> {
    TransactionKind::parse(s).ok_or_else(|| {
        FinlensError::Validation(format!(
            "Invalid transaction kind: '{}'. Use income, expense or transfer",
            s
        ))
    })
}

fn parse_status(s: &str) -> FinlensResult<TransactionStatus> {
    match s.trim().to_lowercase().as_str() {
        "completed" | "done" => Ok(TransactionStatus::Completed),
        "pending" => Ok(TransactionStatus::Pending),
        _ => Err(FinlensError::Validation(format!(
            "Invalid status: '{}'. Use completed or pending",
            s
        ))),
    }
}

/// Resolve a category, preferring one whose kind fits the transaction when
/// an income and an expense category share a name
fn resolve_category(
    service: &CategoryService,
    identifier: &str,
    kind: TransactionKind,
) -> FinlensResult<Category> {
    let preferred = match kind {
        TransactionKind::Income => Some(CategoryKind::Income),
        TransactionKind::Expense => Some(CategoryKind::Expense),
        TransactionKind::Transfer => None,
    };

    if let Some(preferred) = preferred {
        let wanted = identifier.trim().to_lowercase();
        if let Some(category) = service
            .list(Some(preferred))?
            .into_iter()
            .find(|c| c.name.to_lowercase() == wanted)
        {
            return Ok(category);
        }
    }

    service.resolve(identifier)
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinlensResult<()> {
    let service = TransactionService::new(storage);
    let accounts = AccountService::new(storage);
    let categories = CategoryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            kind,
            category,
            date,
            description,
            merchant,
            tags,
            pending,
        } => {
            let kind = parse_kind(&kind)?;
            let account = accounts.resolve(&account)?;
            let category_id = category
                .as_deref()
                .map(|c| resolve_category(&categories, c, kind))
                .transpose()?
                .map(|c| c.id);
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };

            let txn = service.create(NewTransaction {
                account_id: account.id,
                kind,
                amount: parse_amount(&amount)?,
                date,
                description: description.unwrap_or_default(),
                category_id,
                status: if pending {
                    TransactionStatus::Pending
                } else {
                    TransactionStatus::Completed
                },
                merchant,
                tags,
            })?;

            println!(
                "Recorded {} of {} on {} ({})",
                txn.kind,
                txn.amount.format_with_symbol(symbol),
                txn.date.format(&settings.date_format),
                txn.id
            );
        }

        TransactionCommands::List {
            kind,
            account,
            category,
            from,
            to,
            tag,
            limit,
        } => {
            let mut query = TransactionQuery::new().newest_first().limit(limit);
            if !kind.trim().eq_ignore_ascii_case("all") {
                query = query.kind(parse_kind(&kind)?);
            }
            if let Some(account) = account {
                query = query.account(accounts.resolve(&account)?.id);
            }
            if let Some(category) = category {
                query = query.category(categories.resolve(&category)?.id);
            }
            if let Some(from) = from {
                query.from = Some(parse_date(&from)?);
            }
            if let Some(to) = to {
                query.to = Some(parse_date(&to)?);
            }
            if let Some(tag) = tag {
                query = query.tag(tag);
            }

            let views = service.list(&query)?;
            print!(
                "{}",
                format_transaction_register(&views, symbol, &settings.date_format)
            );
        }

        TransactionCommands::Edit {
            id,
            account,
            amount,
            kind,
            category,
            uncategorize,
            date,
            description,
            status,
            merchant,
            no_merchant,
            tags,
            clear_tags,
        } => {
            let existing = service
                .get(id)?
                .ok_or_else(|| FinlensError::transaction_not_found(id.to_string()))?;
            let kind = kind.as_deref().map(parse_kind).transpose()?;

            let category_id = if uncategorize {
                Some(None)
            } else {
                category
                    .as_deref()
                    .map(|c| resolve_category(&categories, c, kind.unwrap_or(existing.kind)))
                    .transpose()?
                    .map(|c| Some(c.id))
            };

            let changes = TransactionUpdate {
                account_id: account
                    .as_deref()
                    .map(|a| accounts.resolve(a).map(|a| a.id))
                    .transpose()?,
                kind,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                description,
                category_id,
                status: status.as_deref().map(parse_status).transpose()?,
                merchant: if no_merchant { Some(None) } else { merchant.map(Some) },
                tags: if clear_tags {
                    Some(Vec::new())
                } else if tags.is_empty() {
                    None
                } else {
                    Some(tags)
                },
            };
            let updated = service.update(id, changes)?;
            println!("Updated transaction: {}", updated.id);
        }

        TransactionCommands::Delete { id } => {
            let deleted = service.delete(id)?;
            println!(
                "Deleted transaction {} ({})",
                deleted.id,
                deleted.amount.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
