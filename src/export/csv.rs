//! CSV export of the period summary
//!
//! One flat table so the file opens directly in a spreadsheet: a totals row,
//! one row per expense category and one row per trend month.

use std::io::Write;

use crate::error::{FinlensError, FinlensResult};
use crate::models::Money;
use crate::reports::SummaryReport;

fn amount(money: Money) -> String {
    format!("{:.2}", money.to_decimal())
}

/// Write the summary as CSV
pub fn export_summary_csv<W: Write>(report: &SummaryReport, writer: &mut W) -> FinlensResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let err = |e: csv::Error| FinlensError::Export(e.to_string());

    csv.write_record(["Section", "Label", "Income", "Expense", "Balance", "Percentage"])
        .map_err(err)?;

    csv.write_record([
        "total".to_string(),
        report.window.to_string(),
        amount(report.total_income),
        amount(report.total_expense),
        amount(report.balance),
        report.savings_rate.to_string(),
    ])
    .map_err(err)?;

    for share in &report.categories {
        csv.write_record([
            "category".to_string(),
            share.label.clone(),
            String::new(),
            amount(share.total),
            String::new(),
            share.percentage.to_string(),
        ])
        .map_err(err)?;
    }

    for point in &report.trend {
        csv.write_record([
            "month".to_string(),
            point.month.to_string(),
            amount(point.income),
            amount(point.expense),
            amount(point.income - point.expense),
            String::new(),
        ])
        .map_err(err)?;
    }

    csv.flush().map_err(|e| FinlensError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_summary;

    #[test]
    fn test_summary_csv() {
        let (_temp_dir, report) = sample_summary();
        let mut buffer = Vec::new();
        export_summary_csv(&report, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Section,Label,Income,Expense,Balance,Percentage");
        assert_eq!(
            lines[1],
            "total,2026-03-01 to 2026-03-31,1000.00,300.00,700.00,70"
        );
        assert_eq!(lines[2], "category,Mercado,,200.00,,67");
        assert_eq!(lines[3], "category,\"Casa, aluguel\",,100.00,,33");
        assert_eq!(lines[4], "month,2026-03,1000.00,300.00,700.00,");
    }
}
