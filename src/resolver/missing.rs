//! Missing-prerequisite results.
//!
//! Each unmet requirement found by the resolver is described by a
//! [`MissingPrerequisite`], which knows how to turn itself into a
//! placeholder [`ExternalLicense`].

use serde::Serialize;

use crate::license::{ExternalLicense, LicenseCategory, LicenseStatus, LicenseType};

/// Why a category is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingReason {
    /// No active, non-expired learner's permit for the mapped code.
    LearnersPermit,
    /// A listed prerequisite is neither held nor superseded.
    Prerequisite,
}

/// A prerequisite the applicant still has to prove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingPrerequisite {
    /// The missing category or learner's code
    pub category: LicenseCategory,
    /// The category being applied for
    pub required_for: LicenseCategory,
    pub reason: MissingReason,
    /// Credential kind the placeholder will carry
    pub license_type: LicenseType,
}

impl MissingPrerequisite {
    /// Deterministic placeholder row id, e.g. `auto-c1-b`.
    pub fn placeholder_id(&self) -> String {
        format!(
            "auto-{}-{}",
            self.required_for.as_str().to_lowercase(),
            self.category.as_str().to_lowercase()
        )
    }

    /// Explanation shown next to the placeholder.
    pub fn verification_notes(&self) -> String {
        match self.reason {
            MissingReason::LearnersPermit => format!(
                "A learner's permit (code {}) is required before category {}. Please verify the applicant's permit.",
                self.category, self.required_for
            ),
            MissingReason::Prerequisite => format!(
                "Category {} is a prerequisite for category {}. Please verify the applicant holds it.",
                self.category, self.required_for
            ),
        }
    }

    /// Whether a generated row carries this requirement's id.
    ///
    /// The id is stable, so a placeholder keeps its identity even after the
    /// user edits its category.
    pub fn matches_id(&self, row: &ExternalLicense) -> bool {
        row.is_auto_populated && row.id == self.placeholder_id()
    }

    /// Whether a generated row describes this requirement under another id.
    pub fn matches_content(&self, row: &ExternalLicense) -> bool {
        row.is_auto_populated
            && row.required_for_category.as_ref() == Some(&self.required_for)
            && row.categories == [self.category.clone()]
    }

    /// Build a fresh placeholder row.
    pub fn to_placeholder(&self) -> ExternalLicense {
        ExternalLicense {
            id: self.placeholder_id(),
            license_number: String::new(),
            license_type: self.license_type,
            categories: vec![self.category.clone()],
            status: LicenseStatus::Active,
            issue_date: None,
            expiry_date: None,
            issuing_location: None,
            verified: false,
            verification_source: None,
            verification_notes: Some(self.verification_notes()),
            is_required: true,
            is_auto_populated: true,
            required_for_category: Some(self.required_for.clone()),
        }
    }
}
