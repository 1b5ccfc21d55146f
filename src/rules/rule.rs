//! Category rules and the rule set.
//!
//! A [`RuleSet`] is built once from configuration and then shared read-only
//! with the resolver. Construction precomputes, for every category, the
//! transitive set of lower categories its holder is also entitled to.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::schema::{CategoryRuleConfig, PermisConfig};
use crate::config::{load_builtin_config, Settings};
use crate::error::{PermisError, Result};
use crate::license::LicenseCategory;

use super::validator::{validate_rules, Severity};

/// Static metadata for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: LicenseCategory,
    /// Categories that must be held before this one.
    pub prerequisites: Vec<LicenseCategory>,
    /// Whether a learner's permit must precede this category.
    pub requires_learners_permit: bool,
    /// Whether this category can be learned under a learner's permit.
    pub allows_learners_permit: bool,
    pub description: String,
    /// Lower categories directly entitled by this one.
    pub authorizes: Vec<LicenseCategory>,
}

impl CategoryRule {
    /// Create a rule with no prerequisites.
    pub fn new(category: LicenseCategory, description: impl Into<String>) -> Self {
        Self {
            category,
            prerequisites: Vec::new(),
            requires_learners_permit: false,
            allows_learners_permit: false,
            description: description.into(),
            authorizes: Vec::new(),
        }
    }

    /// Set the prerequisite categories.
    pub fn with_prerequisites(mut self, prerequisites: Vec<LicenseCategory>) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    /// Require (and allow) a learner's permit before this category.
    pub fn requiring_learners_permit(mut self) -> Self {
        self.requires_learners_permit = true;
        self.allows_learners_permit = true;
        self
    }

    /// Set the directly authorized lower categories.
    pub fn authorizing(mut self, authorizes: Vec<LicenseCategory>) -> Self {
        self.authorizes = authorizes;
        self
    }

    fn from_config(category: &LicenseCategory, config: &CategoryRuleConfig) -> Self {
        Self {
            category: category.clone(),
            prerequisites: config.prerequisites.clone(),
            requires_learners_permit: config.requires_learners_permit,
            allows_learners_permit: config.allows_learners_permit,
            description: config.description.clone(),
            authorizes: config.authorizes.clone(),
        }
    }

    fn to_config(&self) -> CategoryRuleConfig {
        CategoryRuleConfig {
            description: self.description.clone(),
            prerequisites: self.prerequisites.clone(),
            requires_learners_permit: self.requires_learners_permit,
            allows_learners_permit: self.allows_learners_permit,
            authorizes: self.authorizes.clone(),
        }
    }
}

/// The complete, validated rule tables.
#[derive(Debug, Clone)]
pub struct RuleSet {
    categories: BTreeMap<LicenseCategory, CategoryRule>,
    learners_rules: BTreeMap<LicenseCategory, CategoryRule>,
    learners_mapping: BTreeMap<LicenseCategory, LicenseCategory>,
    authorized: BTreeMap<LicenseCategory, BTreeSet<LicenseCategory>>,
    settings: Settings,
}

impl RuleSet {
    /// Create a new rule set builder.
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// The compiled-in Malagasy rule set.
    pub fn builtin() -> Result<Self> {
        Self::from_config(&load_builtin_config()?)
    }

    /// Build a rule set from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PermisError::ConfigValidationError`] listing every
    /// error-severity issue if the table is not usable. Warnings are logged.
    pub fn from_config(config: &PermisConfig) -> Result<Self> {
        let issues = validate_rules(config);
        let mut errors = Vec::new();
        for issue in &issues {
            match issue.severity {
                Severity::Warning => tracing::warn!("{}", issue.message),
                Severity::Error => errors.push(issue.message.as_str()),
            }
        }
        if !errors.is_empty() {
            return Err(PermisError::ConfigValidationError {
                message: errors.join("; "),
            });
        }

        let convert = |table: &BTreeMap<LicenseCategory, CategoryRuleConfig>| {
            table
                .iter()
                .map(|(category, rule)| (category.clone(), CategoryRule::from_config(category, rule)))
                .collect::<BTreeMap<_, _>>()
        };

        let categories = convert(&config.categories);
        let learners_rules = convert(&config.learners_permits);
        let authorized = authorization_closure(categories.values().chain(learners_rules.values()));

        tracing::debug!(
            "Built rule set with {} categories and {} learner's codes",
            categories.len(),
            learners_rules.len()
        );

        Ok(Self {
            categories,
            learners_rules,
            learners_mapping: config.learners_mapping.clone(),
            authorized,
            settings: config.settings.clone(),
        })
    }

    /// Look up the rule for a category, falling back to the learner's-permit
    /// table for learner's codes.
    pub fn rule_for(&self, category: &LicenseCategory) -> Option<&CategoryRule> {
        self.categories
            .get(category)
            .or_else(|| self.learners_rules.get(category))
    }

    /// The learner's code that must precede `category`, if any.
    pub fn learners_code_for(&self, category: &LicenseCategory) -> Option<&LicenseCategory> {
        self.learners_mapping.get(category)
    }

    /// Whether `code` is a learner's-permit code.
    pub fn is_learners_code(&self, code: &LicenseCategory) -> bool {
        self.learners_rules.contains_key(code)
    }

    /// Every lower category a holder of `category` is also entitled to,
    /// excluding `category` itself.
    pub fn authorized_categories(&self, category: &LicenseCategory) -> Option<&BTreeSet<LicenseCategory>> {
        self.authorized.get(category)
    }

    /// Whether holding `held` satisfies a requirement for `required`.
    pub fn supersedes(&self, held: &LicenseCategory, required: &LicenseCategory) -> bool {
        held == required
            || self
                .authorized
                .get(held)
                .is_some_and(|closure| closure.contains(required))
    }

    /// Full-license category rules in code order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryRule> {
        self.categories.values()
    }

    /// Learner's-permit rules in code order.
    pub fn learners_rules(&self) -> impl Iterator<Item = &CategoryRule> {
        self.learners_rules.values()
    }

    /// Settings the rule set was loaded with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Compute the transitive closure of the `authorizes` edges.
fn authorization_closure<'a>(
    rules: impl Iterator<Item = &'a CategoryRule>,
) -> BTreeMap<LicenseCategory, BTreeSet<LicenseCategory>> {
    let edges: BTreeMap<&LicenseCategory, &[LicenseCategory]> = rules
        .map(|rule| (&rule.category, rule.authorizes.as_slice()))
        .collect();

    edges
        .keys()
        .map(|&start| {
            let mut reached = BTreeSet::new();
            let mut to_visit: Vec<&LicenseCategory> = edges[start].iter().collect();

            while let Some(current) = to_visit.pop() {
                if current == start || !reached.insert(current.clone()) {
                    continue;
                }
                if let Some(next) = edges.get(current) {
                    to_visit.extend(next.iter());
                }
            }

            (start.clone(), reached)
        })
        .collect()
}

/// Builder for constructing a [`RuleSet`] in code.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    config: PermisConfig,
}

impl RuleSetBuilder {
    /// Add or replace a full-license category rule.
    pub fn rule(mut self, rule: CategoryRule) -> Self {
        self.config
            .categories
            .insert(rule.category.clone(), rule.to_config());
        self
    }

    /// Add or replace a learner's-permit rule.
    pub fn learners_rule(mut self, rule: CategoryRule) -> Self {
        self.config
            .learners_permits
            .insert(rule.category.clone(), rule.to_config());
        self
    }

    /// Map a category to the learner's code that must precede it.
    pub fn map_learners(mut self, category: LicenseCategory, code: LicenseCategory) -> Self {
        self.config.learners_mapping.insert(category, code);
        self
    }

    /// Build the rule set, validating it.
    pub fn build(self) -> Result<RuleSet> {
        RuleSet::from_config(&self.config)
    }
}
