use anyhow::Result;
use clap::{Parser, Subcommand};

use finlens::analytics::ReportPeriod;
use finlens::cli::{
    handle_account_command, handle_budget_command, handle_category_command, handle_goal_command,
    handle_report_command, handle_transaction_command,
};
use finlens::config::{paths::FinlensPaths, settings::Settings};
use finlens::logging::init_logging;
use finlens::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "finlens",
    version,
    about = "Personal finance tracker",
    long_about = "Finlens tracks accounts, income and expenses, monthly category \
                  budgets and savings goals, and turns them into dashboards and \
                  period reports from the command line."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and default categories
    Init,

    /// Show or change configuration
    Config {
        /// Currency code for new accounts (e.g. BRL)
        #[arg(long)]
        currency_code: Option<String>,
        /// Symbol printed in front of amounts (e.g. R$)
        #[arg(long)]
        currency_symbol: Option<String>,
        /// Date format (strftime, e.g. %d/%m/%Y)
        #[arg(long)]
        date_format: Option<String>,
        /// Default period for `report summary`
        #[arg(long)]
        period: Option<ReportPeriod>,
    },

    /// Account management commands
    #[command(subcommand)]
    Account(finlens::cli::AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(finlens::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(finlens::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(finlens::cli::BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(finlens::cli::GoalCommands),

    /// Dashboard and reports
    #[command(subcommand)]
    Report(finlens::cli::ReportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = FinlensPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Finlens - personal finance tracker");
            println!();
            println!("Run 'finlens --help' for usage information.");
            println!("Run 'finlens init' to get started.");
            return Ok(());
        }
    };

    match command {
        Commands::Init => {
            println!("Initializing Finlens at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories have been created.");
            println!("Run 'finlens category list' to see them.");
        }
        Commands::Config {
            currency_code,
            currency_symbol,
            date_format,
            period,
        } => {
            let changed = currency_code.is_some()
                || currency_symbol.is_some()
                || date_format.is_some()
                || period.is_some();
            if let Some(code) = currency_code {
                settings.currency_code = code.trim().to_uppercase();
            }
            if let Some(symbol) = currency_symbol {
                settings.currency_symbol = symbol;
            }
            if let Some(format) = date_format {
                settings.date_format = format;
            }
            if let Some(period) = period {
                settings.default_period = period;
            }
            if changed {
                settings.save(&paths)?;
                tracing::info!("settings updated");
            }

            println!("Finlens Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency:       {} ({})", settings.currency_code, settings.currency_symbol);
            println!("  Date format:    {}", settings.date_format);
            println!("  Default period: {}", settings.default_period);
            println!("  Top categories: {}", settings.top_categories);
            println!("  Trend months:   {}", settings.trend_months);
        }
        command => {
            let storage = Storage::open(paths)?;
            match command {
                Commands::Account(cmd) => handle_account_command(&storage, &settings, cmd)?,
                Commands::Category(cmd) => handle_category_command(&storage, &settings, cmd)?,
                Commands::Transaction(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
                Commands::Budget(cmd) => handle_budget_command(&storage, &settings, cmd)?,
                Commands::Goal(cmd) => handle_goal_command(&storage, &settings, cmd)?,
                Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
                Commands::Init | Commands::Config { .. } => {}
            }
        }
    }

    Ok(())
}
