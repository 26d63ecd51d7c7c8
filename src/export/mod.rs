//! Export module for Finlens
//!
//! Writes the period summary (the printable report) in three formats:
//! - CSV: flat table for spreadsheets
//! - JSON: machine-readable, with schema version
//! - YAML: human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use clap::ValueEnum;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::paths::FinlensPaths;
use crate::config::Settings;
use crate::error::{FinlensError, FinlensResult};
use crate::reports::SummaryReport;

pub use self::csv::export_summary_csv;
pub use json::{export_summary_json, SummaryExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_summary_yaml;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// File extension used for default file names
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Write the summary to `writer` in `format`
pub fn export_summary<W: Write>(
    report: &SummaryReport,
    settings: &Settings,
    format: ExportFormat,
    writer: &mut W,
) -> FinlensResult<()> {
    match format {
        ExportFormat::Csv => export_summary_csv(report, writer),
        ExportFormat::Json => export_summary_json(report, settings, writer),
        ExportFormat::Yaml => export_summary_yaml(report, settings, writer),
    }
}

/// Default file for a summary export: `exports/summary-<period>-<last day>.<ext>`
pub fn default_export_path(
    paths: &FinlensPaths,
    report: &SummaryReport,
    format: ExportFormat,
) -> PathBuf {
    paths.export_dir().join(format!(
        "summary-{}-{}.{}",
        report.period,
        report.window.last_day(),
        format.extension()
    ))
}

/// Write the summary to a file, creating parent directories as needed
pub fn write_summary_file(
    report: &SummaryReport,
    settings: &Settings,
    format: ExportFormat,
    path: &Path,
) -> FinlensResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            FinlensError::Export(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let file = File::create(path).map_err(|e| {
        FinlensError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export_summary(report, settings, format, &mut writer)?;
    writer
        .flush()
        .map_err(|e| FinlensError::Export(e.to_string()))?;

    tracing::info!(path = %path.display(), ?format, "exported summary");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analytics::ReportPeriod;
    use crate::models::{AccountType, CategoryKind, ColorTag, Money, TransactionKind, TransactionStatus};
    use crate::services::{AccountService, CategoryService, NewTransaction, TransactionService};
    use crate::storage::Storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    /// March 2026: 1000 income, 200 groceries, 100 rent
    pub(crate) fn sample_summary() -> (TempDir, SummaryReport) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinlensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        let account = AccountService::new(&storage)
            .create("Banco", AccountType::Checking, "BRL", Money::zero())
            .unwrap()
            .id;
        let categories = CategoryService::new(&storage);
        let salary = categories
            .create("Salário", CategoryKind::Income, None, ColorTag::Green)
            .unwrap()
            .id;
        let groceries = categories
            .create("Mercado", CategoryKind::Expense, None, ColorTag::Orange)
            .unwrap()
            .id;
        let rent = categories
            .create("Casa, aluguel", CategoryKind::Expense, None, ColorTag::Red)
            .unwrap()
            .id;

        let transactions = TransactionService::new(&storage);
        for (kind, units, category, day) in [
            (TransactionKind::Income, 1000, salary, 2),
            (TransactionKind::Expense, 200, groceries, 10),
            (TransactionKind::Expense, 100, rent, 15),
        ] {
            transactions
                .create(NewTransaction {
                    account_id: account,
                    kind,
                    amount: Money::from_units(units),
                    date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
                    description: String::new(),
                    category_id: Some(category),
                    status: TransactionStatus::Completed,
                    merchant: None,
                    tags: Vec::new(),
                })
                .unwrap();
        }

        let now = NaiveDate::from_ymd_opt(2026, 3, 31)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let report =
            SummaryReport::generate(&storage, &Settings::default(), ReportPeriod::Month, now)
                .unwrap();
        (temp_dir, report)
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a.CSV")), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_path(Path::new("a.yml")), Some(ExportFormat::Yaml));
        assert_eq!(ExportFormat::from_path(Path::new("report")), None);
    }

    #[test]
    fn test_write_summary_file() {
        let (temp_dir, report) = sample_summary();
        let paths = FinlensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let path = default_export_path(&paths, &report, ExportFormat::Json);
        assert!(path.ends_with("exports/summary-month-2026-03-31.json"));

        write_summary_file(&report, &Settings::default(), ExportFormat::Json, &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"schema_version\": \"1.0.0\""));
    }
}
