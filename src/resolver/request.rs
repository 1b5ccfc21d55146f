//! Resolver input.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::license::{ExternalLicense, LicenseCategory, SystemLicense};

use super::application::ApplicationType;

/// Everything the resolver looks at for one applicant.
///
/// This is also the file format accepted by `permis resolve`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolveRequest {
    /// Workflow kind; defaults to a new license
    #[serde(default)]
    pub application_type: ApplicationType,

    /// Category being applied for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_category: Option<LicenseCategory>,

    /// Licenses on file with the authority
    #[serde(default)]
    pub system_licenses: Vec<SystemLicense>,

    /// Declared licenses, including placeholders from earlier passes
    #[serde(default)]
    pub external_licenses: Vec<ExternalLicense>,

    /// Evaluation date for expiry checks; defaults to the resolver's date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

impl ResolveRequest {
    /// A request for the given workflow and target.
    pub fn new(application_type: ApplicationType, target_category: Option<LicenseCategory>) -> Self {
        Self {
            application_type,
            target_category,
            ..Default::default()
        }
    }

    /// Set the system licenses.
    pub fn with_system_licenses(mut self, licenses: Vec<SystemLicense>) -> Self {
        self.system_licenses = licenses;
        self
    }

    /// Set the external licenses.
    pub fn with_external_licenses(mut self, licenses: Vec<ExternalLicense>) -> Self {
        self.external_licenses = licenses;
        self
    }

    /// Set the evaluation date.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// External rows entered by a user, excluding generated placeholders.
    pub fn manual_external(&self) -> impl Iterator<Item = &ExternalLicense> {
        self.external_licenses
            .iter()
            .filter(|license| !license.is_auto_populated)
    }
}
