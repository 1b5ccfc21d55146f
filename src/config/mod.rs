//! Configuration loading, parsing, and merging for permis.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use permis::config::load_merged_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".permis");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("rules.yml"), "categories:\n  F:\n    description: Adapted vehicles\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert!(config.categories.keys().any(|c| c.as_str() == "F"));
//! assert!(config.categories.keys().any(|c| c.as_str() == "B"));
//! ```
//!
//! # Configuration File Locations
//!
//! Configuration is layered in this order:
//! 1. Built-in rule table (compiled in)
//! 2. Project rules (`.permis/rules.yml`)
//! 3. Local overrides (`.permis/rules.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{
    builtin_value, find_project_root, load_builtin_config, load_config, load_config_value,
    load_merged_config, ConfigPaths, BUILTIN_RULES, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_layers};
pub use schema::{CategoryRuleConfig, OutputMode, PermisConfig, Settings};
