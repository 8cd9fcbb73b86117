//! Configuration loading for rulebook.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - `rule:param:value` overrides in [`overrides`]
//!
//! # Example
//!
//! ```
//! use rulebook::config::load_merged_config;
//! use rulebook::rules::Severity;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".rulebook.yml"), "threshold: warning").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert_eq!(config.threshold, Severity::Warning);
//! ```

pub mod loader;
pub mod overrides;
pub mod schema;

pub use loader::{
    find_project_root, load_config, load_config_file, load_merged_config, load_overlay_file,
    parse_config, ConfigPaths, CONFIG_FILE, LOCAL_CONFIG_FILE,
};
pub use overrides::RuleOverride;
pub use schema::{ConfigOverlay, RulebookConfig};
