//! Configuration module for Finlens
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinlensPaths;
pub use settings::Settings;
