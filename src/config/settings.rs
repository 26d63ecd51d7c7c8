//! User settings for Finlens
//!
//! Manages user preferences: currency, date format and the sizes used by the
//! dashboard and report views.

use serde::{Deserialize, Serialize};

use super::paths::FinlensPaths;
use crate::analytics::ReportPeriod;
use crate::error::FinlensError;

/// User settings for Finlens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// ISO currency code used for new accounts
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Symbol printed in front of amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Period used by `report summary` when none is given
    #[serde(default)]
    pub default_period: ReportPeriod,

    /// Number of category shares kept in the summary report
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// Number of months kept in the summary trend
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,

    /// Number of recent transactions on the dashboard
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_code() -> String {
    "BRL".to_string()
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_top_categories() -> usize {
    crate::analytics::DEFAULT_TOP_CATEGORIES
}

fn default_trend_months() -> usize {
    6
}

fn default_recent_transactions() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
            default_period: ReportPeriod::default(),
            top_categories: default_top_categories(),
            trend_months: default_trend_months(),
            recent_transactions: default_recent_transactions(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinlensPaths) -> Result<Self, FinlensError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinlensError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinlensError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            tracing::debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinlensPaths) -> Result<(), FinlensError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinlensError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinlensError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
