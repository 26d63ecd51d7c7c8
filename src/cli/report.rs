//! CLI commands for reports
//!
//! Dashboard, period summary (with export), budget overview and goals.

use chrono::{Local, NaiveDateTime};
use clap::Subcommand;
use std::path::PathBuf;

use crate::analytics::ReportPeriod;
use crate::config::Settings;
use crate::error::FinlensResult;
use crate::export::{default_export_path, write_summary_file, ExportFormat};
use crate::reports::{BudgetOverviewReport, DashboardReport, GoalsReport, SummaryReport};
use crate::storage::Storage;

use super::{parse_month_or_current, today};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Balance, recent transactions and this month's daily activity
    Dashboard,

    /// Income, expenses and categories for a period
    Summary {
        /// Period (week, month, year); defaults to the configured period
        #[arg(short, long)]
        period: Option<ReportPeriod>,

        /// Export to a file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format; guessed from the output extension, else csv
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Budgets with what was spent
    #[command(alias = "budget")]
    Budgets {
        /// Month (YYYY-MM); all months when omitted
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Savings goals progress
    Goals,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FinlensResult<()> {
    match cmd {
        ReportCommands::Dashboard => {
            let report = DashboardReport::generate(storage, settings, now())?;
            print!("{}", report.format_terminal(settings));
        }

        ReportCommands::Summary {
            period,
            output,
            format,
        } => {
            let period = period.unwrap_or(settings.default_period);
            let report = SummaryReport::generate(storage, settings, period, now())?;

            // --format alone writes to the exports directory
            if output.is_none() && format.is_none() {
                print!("{}", report.format_terminal(settings));
                return Ok(());
            }

            let format = format
                .or_else(|| output.as_deref().and_then(ExportFormat::from_path))
                .unwrap_or(ExportFormat::Csv);
            let path = output
                .unwrap_or_else(|| default_export_path(storage.paths(), &report, format));

            write_summary_file(&report, settings, format, &path)?;
            println!("Summary exported to: {}", path.display());
        }

        ReportCommands::Budgets { month } => {
            let month = match month {
                Some(m) => Some(parse_month_or_current(Some(&m))?),
                None => None,
            };
            let report = BudgetOverviewReport::generate(storage, month)?;
            print!("{}", report.format_terminal(settings));
        }

        ReportCommands::Goals => {
            let report = GoalsReport::generate(storage, today())?;
            print!("{}", report.format_terminal(settings));
        }
    }

    Ok(())
}
