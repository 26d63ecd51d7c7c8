//! JSON export of the period summary
//!
//! The summary is wrapped with the schema version and the
//! currency, so a printed report can be read back without the settings file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::config::Settings;
use crate::error::{FinlensError, FinlensResult};
use crate::reports::SummaryReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported summary with metadata
#[derive(Debug, Clone, Serialize)]
pub struct SummaryExport<'a> {
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    pub currency_code: &'a str,
    pub currency_symbol: &'a str,
    pub summary: &'a SummaryReport,
}

impl<'a> SummaryExport<'a> {
    pub fn new(report: &'a SummaryReport, settings: &'a Settings) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            currency_code: &settings.currency_code,
            currency_symbol: &settings.currency_symbol,
            summary: report,
        }
    }
}

/// Write the summary as pretty-printed JSON
pub fn export_summary_json<W: Write>(
    report: &SummaryReport,
    settings: &Settings,
    writer: &mut W,
) -> FinlensResult<()> {
    let export = SummaryExport::new(report, settings);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| FinlensError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FinlensError::Export(e.to_string()))?;
    Ok(())
}
