//! Goal CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::FinlensResult;
use crate::reports::GoalsReport;
use crate::services::{GoalService, GoalUpdate, NewGoal};
use crate::storage::Storage;

use super::{parse_amount, parse_color, parse_date, today};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Create {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        saved: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
        /// Icon shown next to the name
        #[arg(short, long)]
        icon: Option<String>,
        /// Color swatch
        #[arg(long)]
        color: Option<String>,
    },
    /// List goals with their progress
    List,
    /// Add money to a goal
    #[command(alias = "add-funds")]
    Fund {
        /// Goal name or ID
        goal: String,
        /// Amount to add
        amount: String,
    },
    /// Edit a goal
    Edit {
        /// Goal name or ID
        goal: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New target amount
        #[arg(short, long)]
        target: Option<String>,
        /// Overwrite the saved amount
        #[arg(short, long)]
        saved: Option<String>,
        /// New deadline (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "no_deadline")]
        deadline: Option<String>,
        /// Remove the deadline
        #[arg(long)]
        no_deadline: bool,
        /// New icon
        #[arg(short, long)]
        icon: Option<String>,
        /// New color swatch
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a goal
    Delete {
        /// Goal name or ID
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> FinlensResult<()> {
    let service = GoalService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::Create {
            name,
            target,
            saved,
            deadline,
            icon,
            color,
        } => {
            let goal = service.create(NewGoal {
                name,
                target_amount: parse_amount(&target)?,
                current_amount: parse_amount(&saved)?,
                deadline: deadline.as_deref().map(parse_date).transpose()?,
                icon,
                color: color.as_deref().map(parse_color).transpose()?,
            })?;
            println!(
                "Created goal: {} {} ({} of {})",
                goal.icon,
                goal.name,
                goal.current_amount.format_with_symbol(symbol),
                goal.target_amount.format_with_symbol(symbol)
            );
            println!("  ID: {}", goal.id);
        }

        GoalCommands::List => {
            let report = GoalsReport::generate(storage, today())?;
            print!("{}", report.format_terminal(settings));
        }

        GoalCommands::Fund { goal, amount } => {
            let found = service.resolve(&goal)?;
            let updated = service.add_funds(found.id, parse_amount(&amount)?)?;
            println!(
                "{}: {} of {} saved",
                updated.name,
                updated.current_amount.format_with_symbol(symbol),
                updated.target_amount.format_with_symbol(symbol)
            );
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            saved,
            deadline,
            no_deadline,
            icon,
            color,
        } => {
            let found = service.resolve(&goal)?;

            let deadline = if no_deadline {
                Some(None)
            } else {
                deadline.as_deref().map(parse_date).transpose()?.map(Some)
            };
            let changes = GoalUpdate {
                name,
                target_amount: target.as_deref().map(parse_amount).transpose()?,
                current_amount: saved.as_deref().map(parse_amount).transpose()?,
                deadline,
                icon,
                color: color.as_deref().map(parse_color).transpose()?,
            };
            let updated = service.update(found.id, changes)?;
            println!("Updated goal: {}", updated.name);
        }

        GoalCommands::Delete { goal } => {
            let found = service.resolve(&goal)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted goal: {}", deleted.name);
        }
    }

    Ok(())
}
