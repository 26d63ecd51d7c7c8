//! Reports module for Finlens
//!
//! The views built on the analytics: dashboard, period summary, budget
//! overview and goals overview. Reports take the reference time as a
//! parameter; only the CLI reads the clock.

pub mod budget_overview;
pub mod dashboard;
pub mod goals;
pub mod summary;

pub use budget_overview::{BudgetOverviewReport, BudgetReportRow};
pub use dashboard::DashboardReport;
pub use goals::{GoalReportRow, GoalsReport};
pub use summary::SummaryReport;
