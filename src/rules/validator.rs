//! Rule table validation.
//!
//! This module checks a [`PermisConfig`] for problems:
//! - prerequisites and authorized categories must reference known codes
//! - a category may not require itself, directly or through a cycle
//! - categories requiring a learner's permit must map to a learner's code
//! - learner's mappings must point at defined learner's codes
//! - date bounds must describe a non-empty range
//!
//! All issues are collected rather than stopping at the first one.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::schema::{CategoryRuleConfig, PermisConfig};
use crate::license::LicenseCategory;

/// Severity of a rule-table issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The table is usable but probably not what was intended.
    Warning,
    /// The table cannot be used.
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single problem found in the rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleIssue {
    /// Check identifier, e.g. `unknown-prerequisite`
    pub check: &'static str,
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Category the issue is attached to, if any
    pub category: Option<LicenseCategory>,
}

impl RuleIssue {
    fn error(check: &'static str, category: &LicenseCategory, message: String) -> Self {
        Self {
            check,
            severity: Severity::Error,
            message,
            category: Some(category.clone()),
        }
    }

    fn warning(check: &'static str, category: &LicenseCategory, message: String) -> Self {
        Self {
            check,
            severity: Severity::Warning,
            message,
            category: Some(category.clone()),
        }
    }
}

/// Validate a rule configuration and return all issues found.
pub fn validate_rules(config: &PermisConfig) -> Vec<RuleIssue> {
    let mut issues = Vec::new();

    issues.extend(validate_references(config));
    issues.extend(validate_learners(config));
    issues.extend(validate_cycles(config));

    let bounds = config.settings.date_bounds;
    if !bounds.is_valid() {
        issues.push(RuleIssue {
            check: "date-bounds",
            severity: Severity::Error,
            message: format!(
                "settings.date_bounds.min_year ({}) is after max_year ({})",
                bounds.min_year, bounds.max_year
            ),
            category: None,
        });
    }

    issues
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[RuleIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

fn all_rules(config: &PermisConfig) -> impl Iterator<Item = (&LicenseCategory, &CategoryRuleConfig)> {
    config.categories.iter().chain(config.learners_permits.iter())
}

fn is_known(config: &PermisConfig, code: &LicenseCategory) -> bool {
    config.categories.contains_key(code) || config.learners_permits.contains_key(code)
}

fn validate_references(config: &PermisConfig) -> Vec<RuleIssue> {
    let mut issues = Vec::new();

    for (category, rule) in all_rules(config) {
        for prereq in &rule.prerequisites {
            if prereq == category {
                issues.push(RuleIssue::error(
                    "self-prerequisite",
                    category,
                    format!("Category '{}' lists itself as a prerequisite", category),
                ));
            } else if !is_known(config, prereq) {
                issues.push(RuleIssue::error(
                    "unknown-prerequisite",
                    category,
                    format!(
                        "Category '{}' requires '{}' which is not defined",
                        category, prereq
                    ),
                ));
            }
        }

        for authorized in &rule.authorizes {
            if !is_known(config, authorized) {
                issues.push(RuleIssue::error(
                    "unknown-authorized",
                    category,
                    format!(
                        "Category '{}' authorizes '{}' which is not defined",
                        category, authorized
                    ),
                ));
            }
        }
    }

    issues
}

fn validate_learners(config: &PermisConfig) -> Vec<RuleIssue> {
    let mut issues = Vec::new();

    for (category, rule) in &config.categories {
        if !rule.requires_learners_permit {
            continue;
        }
        if !config.learners_mapping.contains_key(category) {
            issues.push(RuleIssue::error(
                "missing-learners-mapping",
                category,
                format!(
                    "Category '{}' requires a learner's permit but has no learner's code mapping",
                    category
                ),
            ));
        }
        if !rule.allows_learners_permit {
            issues.push(RuleIssue::warning(
                "learners-not-allowed",
                category,
                format!(
                    "Category '{}' requires a learner's permit but is not marked as learnable",
                    category
                ),
            ));
        }
    }

    for (category, code) in &config.learners_mapping {
        if !config.learners_permits.contains_key(code) {
            issues.push(RuleIssue::error(
                "unknown-learners-code",
                category,
                format!(
                    "Category '{}' maps to learner's code '{}' which is not defined",
                    category, code
                ),
            ));
        }
        if !config.categories.contains_key(category) {
            issues.push(RuleIssue::warning(
                "unknown-mapped-category",
                category,
                format!(
                    "Learner's mapping for '{}' refers to a category that is not defined",
                    category
                ),
            ));
        }
    }

    issues
}

fn validate_cycles(config: &PermisConfig) -> Vec<RuleIssue> {
    let graph: BTreeMap<&LicenseCategory, &[LicenseCategory]> = all_rules(config)
        .map(|(category, rule)| (category, rule.prerequisites.as_slice()))
        .collect();

    match find_prerequisite_cycle(&graph) {
        Some(cycle) => {
            let path = cycle
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(" -> ");
            vec![RuleIssue::error(
                "circular-prerequisite",
                cycle[0],
                format!("Circular prerequisite chain: {}", path),
            )]
        }
        None => Vec::new(),
    }
}

/// Find a prerequisite cycle, returning the path (first node repeated at the
/// end) if one exists. Self-references are reported separately and skipped.
fn find_prerequisite_cycle<'a>(
    graph: &BTreeMap<&'a LicenseCategory, &'a [LicenseCategory]>,
) -> Option<Vec<&'a LicenseCategory>> {
    fn visit<'a>(
        node: &'a LicenseCategory,
        graph: &BTreeMap<&'a LicenseCategory, &'a [LicenseCategory]>,
        done: &mut BTreeSet<&'a LicenseCategory>,
        path: &mut Vec<&'a LicenseCategory>,
    ) -> Option<Vec<&'a LicenseCategory>> {
        if let Some(start) = path.iter().position(|c| *c == node) {
            let mut cycle = path[start..].to_vec();
            cycle.push(node);
            return Some(cycle);
        }
        if done.contains(node) {
            return None;
        }

        path.push(node);
        for prereq in graph.get(node).copied().unwrap_or_default() {
            if prereq == node {
                continue;
            }
            if let Some(cycle) = visit(prereq, graph, done, path) {
                return Some(cycle);
            }
        }
        path.pop();
        done.insert(node);
        None
    }

    let mut done = BTreeSet::new();
    for node in graph.keys() {
        let mut path = Vec::new();
        if let Some(cycle) = visit(node, graph, &mut done, &mut path) {
            return Some(cycle);
        }
    }
    None
}
