//! YAML export of the period summary

use std::io::Write;

use crate::config::Settings;
use crate::error::{FinlensError, FinlensResult};
use crate::export::json::SummaryExport;
use crate::reports::SummaryReport;

/// Write the summary as YAML with a short comment header
pub fn export_summary_yaml<W: Write>(
    report: &SummaryReport,
    settings: &Settings,
    writer: &mut W,
) -> FinlensResult<()> {
    let export = SummaryExport::new(report, settings);
    let header = format!(
        "# Finlens summary report\n# Period: {} ({})\n# Generated: {}\n\n",
        report.period, report.window, export.exported_at
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| FinlensError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FinlensError::Export(e.to_string()))?;
    Ok(())
}
