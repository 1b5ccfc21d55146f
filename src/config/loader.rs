//! Rule configuration discovery and loading.
//!
//! The effective configuration is the built-in rule table with project
//! overrides layered on top.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::config::merger::merge_layers;
use crate::config::schema::PermisConfig;
use crate::error::{PermisError, Result};

/// The built-in Malagasy rule table, embedded at compile time.
pub const BUILTIN_RULES: &str = include_str!("../rules/builtin.yml");

/// Name of the per-project configuration directory.
pub const CONFIG_DIR: &str = ".permis";

/// Paths to override files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Built-in rule table (always present)
/// 2. Project rules (`.permis/rules.yml`)
/// 3. Local overrides (`.permis/rules.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project rules: .permis/rules.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .permis/rules.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover override files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("rules.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("rules.local.yml")),
        }
    }

    /// Returns all existing override paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if any project override file exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some() || self.project_local.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.permis` directory first, then falls back to `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_DIR).is_dir() || dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Parse the built-in rule table as a raw YAML value.
pub fn builtin_value() -> Result<Value> {
    serde_yaml::from_str(BUILTIN_RULES).map_err(|e| PermisError::ConfigParseError {
        path: PathBuf::from("<builtin>"),
        message: e.to_string(),
    })
}

/// Load an override file as a raw YAML value (for merging).
///
/// An empty file yields an empty mapping.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PermisError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PermisError::Io(e)
        }
    })?;

    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| PermisError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(match value {
        Value::Null => Value::Mapping(Default::default()),
        other => other,
    })
}

/// Parse a merged value into the typed configuration.
fn parse_merged(value: Value, reported_path: &Path) -> Result<PermisConfig> {
    serde_yaml::from_value(value).map_err(|e| PermisError::ConfigParseError {
        path: reported_path.to_path_buf(),
        message: format!("Failed to parse merged rules: {}", e),
    })
}

/// The built-in configuration with no overrides.
pub fn load_builtin_config() -> Result<PermisConfig> {
    parse_merged(builtin_value()?, Path::new("<builtin>"))
}

/// Load the built-in table merged with every discovered project override.
pub fn load_merged_config(project_root: &Path) -> Result<PermisConfig> {
    let paths = ConfigPaths::discover(project_root);

    let mut layers = vec![builtin_value()?];
    for path in paths.all_existing() {
        tracing::debug!("Loading rule overrides from {}", path.display());
        layers.push(load_config_value(path)?);
    }

    parse_merged(
        merge_layers(layers),
        &project_root.join(CONFIG_DIR).join("rules.yml"),
    )
}

/// Load config with optional path override.
///
/// If `config_override` is provided, only that file is layered over the
/// built-in table. Otherwise, project overrides are discovered and merged.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PermisConfig> {
    match config_override {
        Some(path) => {
            tracing::debug!("Loading rule overrides from {}", path.display());
            let layers = vec![builtin_value()?, load_config_value(path)?];
            parse_merged(merge_layers(layers), path)
        }
        None => load_merged_config(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::LicenseCategory;
    use tempfile::TempDir;

    fn setup_project(rules: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("rules.yml"), rules).unwrap();
        temp
    }

    fn cat(code: &str) -> LicenseCategory {
        LicenseCategory::new(code).unwrap()
    }

    #[test]
    fn builtin_config_parses() {
        let config = load_builtin_config().unwrap();
        assert!(config.categories.contains_key(&cat("B")));
        assert!(config.learners_permits.contains_key(&cat("2")));
        assert_eq!(config.learners_mapping[&cat("B")], cat("2"));
    }

    #[test]
    fn discover_finds_project_and_local() {
        let temp = setup_project("");
        fs::write(temp.path().join(CONFIG_DIR).join("rules.local.yml"), "").unwrap();

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.has_project_config());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn discover_returns_none_for_missing_files() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(!paths.has_project_config());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn merged_config_without_overrides_is_builtin() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(
            config.categories.len(),
            load_builtin_config().unwrap().categories.len()
        );
    }

    #[test]
    fn project_override_changes_prerequisites() {
        let temp = setup_project("categories:\n  C1:\n    prerequisites: [C]\n");
        let config = load_merged_config(temp.path()).unwrap();
        let c1 = &config.categories[&cat("C1")];
        assert_eq!(c1.prerequisites, vec![cat("C")]);
        assert!(c1.description.contains("Goods vehicles"));
    }

    #[test]
    fn local_override_wins_over_project() {
        let temp = setup_project("settings:\n  default_output: verbose\n");
        fs::write(
            temp.path().join(CONFIG_DIR).join("rules.local.yml"),
            "settings:\n  default_output: quiet\n",
        )
        .unwrap();

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(
            config.settings.default_output,
            Some(crate::config::OutputMode::Quiet)
        );
    }

    #[test]
    fn null_override_removes_category() {
        let temp = setup_project("categories:\n  DE: null\n");
        let config = load_merged_config(temp.path()).unwrap();
        assert!(!config.categories.contains_key(&cat("DE")));
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let temp = setup_project("categories: [unclosed");
        let err = load_merged_config(temp.path()).unwrap_err();
        match err {
            PermisError::ConfigParseError { path, .. } => {
                assert!(path.ends_with("rules.yml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn explicit_override_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let err = load_config(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, PermisError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_override_is_layered_over_builtin() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, "categories:\n  F:\n    description: Adapted vehicles\n").unwrap();

        let config = load_config(temp.path(), Some(&path)).unwrap();
        assert!(config.categories.contains_key(&cat("F")));
        assert!(config.categories.contains_key(&cat("B")));
    }

    #[test]
    fn find_project_root_prefers_nearest_marker() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("office").join("antananarivo");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::create_dir_all(nested.join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(&nested), Some(nested.clone()));
        assert_eq!(
            find_project_root(&temp.path().join("office")),
            Some(temp.path().to_path_buf())
        );
    }
}
