//! Configuration management for treeignore
//!
//! Settings are read from a TOML file next to the scanned tree or from the
//! user's home directory.

pub mod scan_config;

// Re-export commonly used items
pub use scan_config::{ScanConfig, LOCAL_CONFIG_FILE};
