//! Prerequisite resolution.
//!
//! [`PrerequisiteResolver::resolve`] takes a [`ResolveRequest`] and returns
//! the external-license list the applicant should be shown: every manually
//! entered row untouched, followed by one placeholder per prerequisite that
//! is still missing.
//!
//! # Rules
//!
//! For the target category's rule:
//!
//! 1. If a learner's permit is required, the mapped learner's code must be
//!    covered by an active, non-expired learner's permit among the system
//!    licenses or the manual external rows. Holding the target, or a
//!    category that supersedes it, waives the permit.
//! 2. Each listed prerequisite must be held (system or manual external), or
//!    be superseded by a held category whose authorized closure contains it.
//!
//! Generated rows never satisfy a requirement; they only stand in for one.
//! A generated row from an earlier pass is reused when it still matches a
//! missing requirement, so edits made to it survive, and dropped otherwise.
//! Each earlier row is reused at most once, and generated ids never collide
//! with the ids of manual rows.
//!
//! The resolver is pure: the same request always yields the same output, and
//! feeding the output back in changes nothing.

use std::collections::{BTreeSet, HashSet};

use chrono::{Local, NaiveDate};

use crate::license::{
    ExternalLicense, LicenseCategory, LicenseRecord, LicenseType, SystemLicense,
};
use crate::rules::{CategoryRule, RuleSet};

use super::application::PrerequisitePolicy;
use super::missing::{MissingPrerequisite, MissingReason};
use super::request::ResolveRequest;

/// What to resolve for one request.
struct Plan {
    targets: Vec<LicenseCategory>,
    /// Whether the learner's-permit gate applies to the targets.
    learners_gate: bool,
}

/// Computes missing prerequisites against an injected [`RuleSet`].
#[derive(Debug, Clone, Copy)]
pub struct PrerequisiteResolver<'r> {
    rules: &'r RuleSet,
    as_of: NaiveDate,
}

impl<'r> PrerequisiteResolver<'r> {
    /// Create a resolver evaluating expiry dates against today.
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            as_of: Local::now().date_naive(),
        }
    }

    /// Evaluate expiry dates against `as_of` instead of today.
    ///
    /// A request's own `as_of` still takes precedence.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// The rule set in use.
    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Compute the full external-license list for a request.
    pub fn resolve(&self, request: &ResolveRequest) -> Vec<ExternalLicense> {
        let Some(missing) = self.compute(request) else {
            return request.external_licenses.clone();
        };

        let previous: Vec<&ExternalLicense> = request
            .external_licenses
            .iter()
            .filter(|license| license.is_auto_populated)
            .collect();

        // Each earlier row stands in for at most one gap; exact ids win.
        let mut used = vec![false; previous.len()];
        let mut claimed: Vec<Option<usize>> = vec![None; missing.len()];
        for (slot, gap) in claimed.iter_mut().zip(&missing) {
            *slot = claim(&previous, &mut used, |row| gap.matches_id(row));
        }
        for (slot, gap) in claimed.iter_mut().zip(&missing) {
            if slot.is_none() {
                *slot = claim(&previous, &mut used, |row| gap.matches_content(row));
            }
        }

        let mut rows: Vec<ExternalLicense> = request.manual_external().cloned().collect();
        let mut taken: HashSet<String> = rows.iter().map(|row| row.id.clone()).collect();

        for (gap, slot) in missing.iter().zip(claimed) {
            let mut row = match slot {
                Some(index) => previous[index].clone(),
                None => {
                    tracing::debug!(
                        "Adding placeholder {} for {} ({:?})",
                        gap.placeholder_id(),
                        gap.category,
                        gap.reason
                    );
                    gap.to_placeholder()
                }
            };
            if taken.contains(&row.id) {
                let id = unused_id(&row.id, &taken);
                tracing::debug!("Placeholder id {} is taken; using {}", row.id, id);
                row.id = id;
            }
            taken.insert(row.id.clone());
            rows.push(row);
        }

        rows
    }

    /// The prerequisites still missing for a request.
    ///
    /// Empty when the request is short-circuited or has no applicable rule.
    pub fn missing_prerequisites(&self, request: &ResolveRequest) -> Vec<MissingPrerequisite> {
        self.compute(request).unwrap_or_default()
    }

    /// `None` means the external list must be returned unchanged.
    fn compute(&self, request: &ResolveRequest) -> Option<Vec<MissingPrerequisite>> {
        let plan = self.plan(request)?;
        let as_of = request.as_of.unwrap_or(self.as_of);
        let manual: Vec<&ExternalLicense> = request.manual_external().collect();

        let mut missing: Vec<MissingPrerequisite> = Vec::new();
        let mut any_rule = false;

        for target in &plan.targets {
            let Some(rule) = self.rules.rule_for(target) else {
                tracing::debug!("No rule for category {}; no prerequisites apply", target);
                continue;
            };
            any_rule = true;

            let found = self.missing_for(
                target,
                rule,
                plan.learners_gate,
                &request.system_licenses,
                &manual,
                as_of,
            );
            for gap in found {
                if !missing.iter().any(|m| m.category == gap.category) {
                    missing.push(gap);
                }
            }
        }

        any_rule.then_some(missing)
    }

    fn plan(&self, request: &ResolveRequest) -> Option<Plan> {
        let target_plan = |target: &LicenseCategory| Plan {
            targets: vec![target.clone()],
            learners_gate: true,
        };

        match request.application_type.policy() {
            PrerequisitePolicy::Skip => {
                tracing::debug!(
                    "{} applications never auto-populate prerequisites",
                    request.application_type
                );
                None
            }
            PrerequisitePolicy::Reissue if !request.system_licenses.is_empty() => {
                tracing::debug!(
                    "{} with {} system license(s); holdings are declared manually",
                    request.application_type,
                    request.system_licenses.len()
                );
                None
            }
            PrerequisitePolicy::Reissue => match &request.target_category {
                Some(target) => Some(target_plan(target)),
                None => {
                    // Declared holdings already passed their learner's stage.
                    let declared: BTreeSet<LicenseCategory> = request
                        .manual_external()
                        .flat_map(|license| license.categories.iter().cloned())
                        .collect();
                    (!declared.is_empty()).then(|| Plan {
                        targets: declared.into_iter().collect(),
                        learners_gate: false,
                    })
                }
            },
            PrerequisitePolicy::Target => request.target_category.as_ref().map(target_plan),
        }
    }

    fn missing_for(
        &self,
        target: &LicenseCategory,
        rule: &CategoryRule,
        learners_gate: bool,
        system: &[SystemLicense],
        manual: &[&ExternalLicense],
        as_of: NaiveDate,
    ) -> Vec<MissingPrerequisite> {
        let mut missing = Vec::new();

        let held: BTreeSet<&LicenseCategory> = system
            .iter()
            .flat_map(|license| license.categories.iter())
            .chain(manual.iter().flat_map(|license| license.categories.iter()))
            .collect();

        if learners_gate && rule.requires_learners_permit {
            if let Some(senior) = held.iter().find(|h| self.rules.supersedes(h, target)) {
                tracing::debug!(
                    "Learner's permit for {} not needed; held category {} covers it",
                    target,
                    senior
                );
            } else {
                match self.rules.learners_code_for(target) {
                    Some(code) if !has_current_learners_permit(code, system, manual, as_of) => {
                        missing.push(self.gap(code, target, MissingReason::LearnersPermit));
                    }
                    Some(code) => {
                        tracing::debug!("Learner's permit {} found for category {}", code, target);
                    }
                    None => {
                        tracing::warn!(
                            "Category {} requires a learner's permit but has no learner's code",
                            target
                        );
                    }
                }
            }
        }

        for prereq in &rule.prerequisites {
            if held.contains(prereq) {
                tracing::debug!("Prerequisite {} for {} is held", prereq, target);
                continue;
            }
            if let Some(senior) = held.iter().find(|h| self.rules.supersedes(h, prereq)) {
                tracing::debug!(
                    "Prerequisite {} for {} is superseded by held category {}",
                    prereq,
                    target,
                    senior
                );
                continue;
            }
            missing.push(self.gap(prereq, target, MissingReason::Prerequisite));
        }

        missing
    }

    fn gap(
        &self,
        category: &LicenseCategory,
        target: &LicenseCategory,
        reason: MissingReason,
    ) -> MissingPrerequisite {
        let license_type = if self.rules.is_learners_code(category) {
            LicenseType::LearnersPermit
        } else {
            LicenseType::DrivingLicense
        };
        MissingPrerequisite {
            category: category.clone(),
            required_for: target.clone(),
            reason,
            license_type,
        }
    }
}

/// Index of the first unused row accepted by `accept`, marking it used.
fn claim(
    previous: &[&ExternalLicense],
    used: &mut [bool],
    accept: impl Fn(&ExternalLicense) -> bool,
) -> Option<usize> {
    let index = (0..previous.len()).find(|&i| !used[i] && accept(previous[i]))?;
    used[index] = true;
    Some(index)
}

/// `base` with the lowest numeric suffix not in `taken`.
fn unused_id(base: &str, taken: &HashSet<String>) -> String {
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|id| !taken.contains(id))
        .unwrap_or_else(|| base.to_string())
}

fn has_current_learners_permit(
    code: &LicenseCategory,
    system: &[SystemLicense],
    manual: &[&ExternalLicense],
    as_of: NaiveDate,
) -> bool {
    system.iter().any(|license| is_current_permit(license, code, as_of))
        || manual
            .iter()
            .any(|license| is_current_permit(*license, code, as_of))
}

fn is_current_permit<L: LicenseRecord>(license: &L, code: &LicenseCategory, as_of: NaiveDate) -> bool {
    license.license_type() == LicenseType::LearnersPermit
        && license.covers(code)
        && license.is_current(as_of)
}
