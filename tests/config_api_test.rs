//! Integration tests for config module public API.

use permis::config::{load_config, load_merged_config, ConfigPaths, OutputMode, PermisConfig};
use permis::license::LicenseCategory;
use permis::rules::{has_errors, validate_rules, RuleSet};
use std::fs;
use tempfile::TempDir;

fn cat(code: &str) -> LicenseCategory {
    LicenseCategory::new(code).unwrap()
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".permis");
    fs::create_dir_all(&dir).unwrap();
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
    temp
}

#[test]
fn public_api_is_accessible() {
    let config = PermisConfig::default();
    assert!(config.categories.is_empty());
    let _mode = OutputMode::Verbose;
}

#[test]
fn layered_rules_build_a_rule_set() {
    let temp = project(&[
        (
            "rules.yml",
            r#"
settings:
  default_output: verbose
  date_bounds:
    min_year: 1950
categories:
  F:
    description: Adapted vehicles
    prerequisites: [B]
    authorizes: [B]
"#,
        ),
        ("rules.local.yml", "categories:\n  F:\n    description: Adapted cars\n"),
    ]);

    let config = load_merged_config(temp.path()).unwrap();
    assert!(!has_errors(&validate_rules(&config)));
    assert_eq!(config.settings.default_output, Some(OutputMode::Verbose));
    assert_eq!(config.settings.date_bounds.min_year, 1950);
    assert_eq!(config.settings.date_bounds.max_year, 2100);

    let rules = RuleSet::from_config(&config).unwrap();
    let f = rules.rule_for(&cat("F")).unwrap();
    assert_eq!(f.description, "Adapted cars");
    assert_eq!(f.prerequisites, vec![cat("B")]);
    assert!(rules.supersedes(&cat("F"), &cat("B1")));
}

#[test]
fn override_file_skips_project_discovery() {
    let temp = project(&[("rules.yml", "categories:\n  F:\n    description: Project only\n")]);
    let override_path = temp.path().join("other.yml");
    fs::write(&override_path, "categories:\n  G:\n    description: Override only\n").unwrap();

    let config = load_config(temp.path(), Some(&override_path)).unwrap();

    assert!(config.categories.contains_key(&cat("G")));
    assert!(!config.categories.contains_key(&cat("F")));
    assert!(config.categories.contains_key(&cat("B")));
}

#[test]
fn invalid_overrides_refuse_to_build() {
    let temp = project(&[("rules.yml", "learners_mapping:\n  B: '9'\n")]);

    let config = load_merged_config(temp.path()).unwrap();
    let issues = validate_rules(&config);

    assert!(has_errors(&issues));
    assert!(RuleSet::from_config(&config).is_err());
}

#[test]
fn config_paths_report_existing_files() {
    let temp = project(&[("rules.local.yml", "{}\n")]);
    let paths = ConfigPaths::discover(temp.path());

    assert!(paths.has_project_config());
    assert_eq!(paths.all_existing().len(), 1);
}
