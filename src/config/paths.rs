//! Path management for Finlens
//!
//! Provides XDG-compliant path resolution for configuration, table data and
//! report exports.
//!
//! ## Path Resolution Order
//!
//! 1. `FINLENS_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/finlens` or `~/.config/finlens`
//! 3. Windows: `%APPDATA%\finlens`

use std::path::PathBuf;

use crate::error::FinlensError;

/// Manages all paths used by Finlens
#[derive(Debug, Clone)]
pub struct FinlensPaths {
    /// Base directory for all Finlens data
    base_dir: PathBuf,
}

impl FinlensPaths {
    /// Create a new FinlensPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FinlensError> {
        let base_dir = if let Ok(custom) = std::env::var("FINLENS_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FinlensPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding one JSON file per table
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default directory for exported reports
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path of a table file (e.g. `data/accounts.json`)
    pub fn table_file(&self, table: &str) -> PathBuf {
        self.data_dir().join(format!("{}.json", table))
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FinlensError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinlensError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FinlensError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Finlens has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FinlensError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                FinlensError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("finlens"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FinlensError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FinlensError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("finlens"))
}
