//! Goals overview
//!
//! Saved vs. target for every goal, with days left until each deadline.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{progress, Progress};
use crate::config::Settings;
use crate::display::color_swatch;
use crate::display::report::{double_separator, format_progress_bar, format_progress_label, separator};
use crate::error::FinlensResult;
use crate::models::{ColorTag, GoalId, Money};
use crate::services::GoalService;
use crate::storage::Storage;

/// One goal in the overview
#[derive(Debug, Clone, Serialize)]
pub struct GoalReportRow {
    pub goal_id: GoalId,
    pub name: String,
    pub icon: String,
    pub color: ColorTag,
    pub saved: Money,
    pub target: Money,
    pub remaining: Money,
    pub progress: Progress,
    pub deadline: Option<NaiveDate>,
    /// Negative once the deadline has passed
    pub days_remaining: Option<i64>,
}

/// All goals with totals
#[derive(Debug, Clone, Serialize)]
pub struct GoalsReport {
    pub today: NaiveDate,
    pub rows: Vec<GoalReportRow>,
    pub total_target: Money,
    pub total_saved: Money,
    /// Total target minus total saved
    pub total_remaining: Money,
}

impl GoalsReport {
    /// Generate the overview as of `today`
    pub fn generate(storage: &Storage, today: NaiveDate) -> FinlensResult<Self> {
        let rows: Vec<GoalReportRow> = GoalService::new(storage)
            .list()?
            .into_iter()
            .map(|goal| GoalReportRow {
                goal_id: goal.id,
                remaining: goal.remaining(),
                progress: progress(goal.current_amount, goal.target_amount),
                days_remaining: goal.days_remaining(today),
                saved: goal.current_amount,
                target: goal.target_amount,
                deadline: goal.deadline,
                icon: goal.icon,
                color: goal.color,
                name: goal.name,
            })
            .collect();

        let total_target: Money = rows.iter().map(|r| r.target).sum();
        let total_saved: Money = rows.iter().map(|r| r.saved).sum();

        tracing::debug!(goals = rows.len(), "generated goals overview");

        Ok(Self {
            today,
            rows,
            total_target,
            total_saved,
            total_remaining: total_target - total_saved,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = settings.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str("Goals\n");
        output.push_str(&double_separator(80));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No goals found.\n");
            return output;
        }

        for row in &self.rows {
            output.push_str(&format!(
                "{:<8} {} {} {}\n",
                row.goal_id.to_string(),
                color_swatch(row.color),
                row.icon,
                row.name
            ));
            output.push_str(&format!(
                "         {} {:>6}  {} / {}\n",
                format_progress_bar(&row.progress, 30),
                format_progress_label(&row.progress),
                row.saved.format_with_symbol(symbol),
                row.target.format_with_symbol(symbol),
            ));
            let deadline = match (row.deadline, row.days_remaining) {
                (Some(date), Some(days)) if days >= 0 => format!(
                    "due {} ({} days left)",
                    date.format(&settings.date_format),
                    days
                ),
                (Some(date), Some(days)) => format!(
                    "was due {} ({} days ago)",
                    date.format(&settings.date_format),
                    -days
                ),
                _ => "no deadline".to_string(),
            };
            output.push_str(&format!(
                "         missing {}, {}\n",
                row.remaining.format_with_symbol(symbol),
                deadline
            ));
        }

        output.push_str(&separator(80));
        output.push('\n');
        output.push_str(&format!(
            "Target {}  Saved {}  Missing {}\n",
            self.total_target.format_with_symbol(symbol),
            self.total_saved.format_with_symbol(symbol),
            self.total_remaining.format_with_symbol(symbol),
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinlensPaths;
    use crate::services::NewGoal;
    use tempfile::TempDir;

    #[test]
    fn test_goals_report() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinlensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        let service = GoalService::new(&storage);

        service
            .create(NewGoal {
                name: "Viagem Europa".into(),
                target_amount: Money::from_units(15000),
                current_amount: Money::from_units(8500),
                deadline: NaiveDate::from_ymd_opt(2026, 6, 1),
                icon: Some("✈️".into()),
                color: Some(ColorTag::Blue),
            })
            .unwrap();
        service
            .create(NewGoal {
                name: "Reserva".into(),
                target_amount: Money::from_units(10000),
                current_amount: Money::from_units(10000),
                deadline: None,
                icon: None,
                color: None,
            })
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2026, 5, 22).unwrap();
        let report = GoalsReport::generate(&storage, today).unwrap();

        assert_eq!(report.rows[0].name, "Viagem Europa");
        assert_eq!(report.rows[0].progress.percentage, 57);
        assert_eq!(report.rows[0].days_remaining, Some(10));
        assert_eq!(report.rows[0].remaining, Money::from_units(6500));
        assert_eq!(report.rows[1].progress.percentage, 100);
        assert!(!report.rows[1].progress.over_threshold);

        assert_eq!(report.total_target, Money::from_units(25000));
        assert_eq!(report.total_saved, Money::from_units(18500));
        assert_eq!(report.total_remaining, Money::from_units(6500));

        let text = report.format_terminal(&Settings::default());
        assert!(text.contains("10 days left"));
        assert!(text.contains("no deadline"));
    }
}
