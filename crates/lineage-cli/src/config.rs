//! CLI configuration

use std::path::PathBuf;

/// Get default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".lineage")
}
