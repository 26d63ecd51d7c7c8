//! Finlens - personal finance tracker
//!
//! This library provides the core functionality for Finlens: accounts,
//! income/expense transactions, monthly category budgets and savings goals,
//! plus the aggregation that turns raw rows into dashboards and reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, categories, etc.)
//! - `storage`: JSON file tables and transaction queries
//! - `services`: Business logic layer
//! - `analytics`: Pure aggregation (normalization, periods, series, shares, progress)
//! - `reports`: Dashboard, summary, budget and goal views
//! - `display`: Terminal formatting
//! - `export`: CSV/JSON/YAML export of the summary
//! - `cli`: Command handlers for the `finlens` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finlens::config::{paths::FinlensPaths, settings::Settings};
//! use finlens::storage::Storage;
//!
//! let paths = FinlensPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! ```

pub mod analytics;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinlensError, FinlensResult};
