//! Configuration schema definitions for permis.
//!
//! This module contains the struct definitions that map to the YAML rule
//! table format. The built-in table (`src/rules/builtin.yml`) and any project
//! overrides share this shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::license::{DateBounds, LicenseCategory};

/// Root configuration structure for `rules.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PermisConfig {
    /// Global settings
    pub settings: Settings,

    /// Rules for full license categories, keyed by category code
    pub categories: BTreeMap<LicenseCategory, CategoryRuleConfig>,

    /// Rules for learner's-permit codes, keyed by code
    pub learners_permits: BTreeMap<LicenseCategory, CategoryRuleConfig>,

    /// Which learner's-permit code precedes each full category
    pub learners_mapping: BTreeMap<LicenseCategory, LicenseCategory>,
}

/// Global settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output mode used when no verbosity flag is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_output: Option<OutputMode>,

    /// Accepted years for typed issue/expiry dates
    pub date_bounds: DateBounds,
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    Quiet,
    Silent,
}

/// Rule entry for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRuleConfig {
    /// Human-readable description
    pub description: String,

    /// Categories that must be held before this one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<LicenseCategory>,

    /// Whether a learner's permit must precede this category
    #[serde(skip_serializing_if = "is_false")]
    pub requires_learners_permit: bool,

    /// Whether this category can be learned under a learner's permit
    #[serde(skip_serializing_if = "is_false")]
    pub allows_learners_permit: bool,

    /// Lower categories a license in this category also entitles
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authorizes: Vec<LicenseCategory>,
}

fn is_false(v: &bool) -> bool {
    !v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_rule_table() {
        let yaml = r#"
categories:
  B:
    description: Passenger vehicles
    requires_learners_permit: true
    allows_learners_permit: true
    authorizes: [B1]
  B1:
    description: Light quadricycles
learners_permits:
  2:
    description: Light vehicles
learners_mapping:
  B: 2
"#;
        let config: PermisConfig = serde_yaml::from_str(yaml).unwrap();
        let b = LicenseCategory::new("B").unwrap();
        let rule = &config.categories[&b];
        assert!(rule.requires_learners_permit);
        assert_eq!(rule.authorizes, vec![LicenseCategory::new("B1").unwrap()]);
        assert_eq!(config.learners_mapping[&b].as_str(), "2");
        assert!(config
            .learners_permits
            .contains_key(&LicenseCategory::new("2").unwrap()));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: PermisConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.categories.is_empty());
        assert_eq!(config.settings.date_bounds, DateBounds::default());
        assert!(config.settings.default_output.is_none());
    }

    #[test]
    fn parses_settings() {
        let yaml = r#"
settings:
  default_output: quiet
  date_bounds:
    min_year: 1950
"#;
        let config: PermisConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.settings.default_output, Some(OutputMode::Quiet));
        assert_eq!(config.settings.date_bounds.min_year, 1950);
        assert_eq!(config.settings.date_bounds.max_year, 2100);
    }

    #[test]
    fn rejects_blank_category_key() {
        let yaml = "categories:\n  ' ':\n    description: nothing\n";
        let result: Result<PermisConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn lowercase_codes_normalize() {
        let yaml = "categories:\n  c1:\n    prerequisites: [b]\n";
        let config: PermisConfig = serde_yaml::from_str(yaml).unwrap();
        let rule = &config.categories[&LicenseCategory::new("C1").unwrap()];
        assert_eq!(rule.prerequisites[0].as_str(), "B");
    }
}
