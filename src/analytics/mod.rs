//! Aggregation and derived metrics
//!
//! Pure functions over in-memory row sets: normalization, period windows, time
//! series, category distribution and progress. Nothing here does I/O or keeps
//! state between calls.

pub mod distribution;
pub mod normalize;
pub mod period;
pub mod progress;
pub mod time_series;

pub use distribution::{
    category_distribution, expense_distribution, CategoryShare, DEFAULT_TOP_CATEGORIES,
};
pub use normalize::{
    normalize_account, normalize_transaction, normalize_transactions, AccountView,
    TransactionView, UNCATEGORIZED_LABEL, UNKNOWN_ACCOUNT_LABEL,
};
pub use period::{PeriodWindow, ReportPeriod};
pub use progress::{budget_spent, progress, Progress};
pub use time_series::{bucket_series, month_label, monthly_trend, Bucket, BucketUnit, TrendPoint};
