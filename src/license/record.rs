//! License records.
//!
//! Two kinds of record describe what a person holds:
//!
//! - [`SystemLicense`] - already on file with the licensing authority and
//!   trusted as-is
//! - [`ExternalLicense`] - claimed by the applicant (or generated as a
//!   placeholder for a missing prerequisite) and trusted only once verified
//!
//! Both implement [`LicenseRecord`], and [`License`] is the tagged sum of the
//! two for places that list records of either kind.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::category::LicenseCategory;

/// Kind of credential a record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseType {
    /// Entry-level learner's permit (codes 1/2/3).
    LearnersPermit,
    /// Full driving license.
    DrivingLicense,
}

impl LicenseType {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LearnersPermit => "learner's permit",
            Self::DrivingLicense => "driving license",
        }
    }
}

/// Administrative status of a license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseStatus {
    #[default]
    Active,
    Expired,
    Suspended,
}

impl LicenseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Suspended => "suspended",
        }
    }
}

/// Behaviour shared by every license record.
pub trait LicenseRecord {
    /// Credential kind.
    fn license_type(&self) -> LicenseType;

    /// Categories the record covers.
    fn categories(&self) -> &[LicenseCategory];

    /// Administrative status.
    fn status(&self) -> LicenseStatus;

    /// Expiry date, if known.
    fn expiry_date(&self) -> Option<NaiveDate>;

    /// Whether the record covers the given category.
    fn covers(&self, category: &LicenseCategory) -> bool {
        self.categories().contains(category)
    }

    /// Whether the record is active and not expired on `as_of`.
    ///
    /// A record is valid through its expiry date; a missing expiry date never
    /// expires.
    fn is_current(&self, as_of: NaiveDate) -> bool {
        self.status() == LicenseStatus::Active && self.expiry_date().is_none_or(|d| d >= as_of)
    }
}

/// A license held in the system of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SystemLicense {
    pub license_number: String,
    pub license_type: LicenseType,
    #[serde(default)]
    pub categories: Vec<LicenseCategory>,
    #[serde(default)]
    pub status: LicenseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuing_location: Option<String>,
}

impl LicenseRecord for SystemLicense {
    fn license_type(&self) -> LicenseType {
        self.license_type
    }

    fn categories(&self) -> &[LicenseCategory] {
        &self.categories
    }

    fn status(&self) -> LicenseStatus {
        self.status
    }

    fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }
}

/// A license claimed by the applicant but not held in the system of record.
///
/// Rows with `is_auto_populated` set were generated to stand in for a
/// missing prerequisite; they cannot be deleted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExternalLicense {
    /// Stable row identifier.
    pub id: String,
    #[serde(default)]
    pub license_number: String,
    pub license_type: LicenseType,
    #[serde(default)]
    pub categories: Vec<LicenseCategory>,
    #[serde(default)]
    pub status: LicenseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuing_location: Option<String>,
    /// Whether an officer has confirmed the license.
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_notes: Option<String>,
    /// Whether the application cannot proceed without this license.
    #[serde(default)]
    pub is_required: bool,
    /// Whether the row was generated as a prerequisite placeholder.
    #[serde(default)]
    pub is_auto_populated: bool,
    /// Category the application targets, for generated rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_for_category: Option<LicenseCategory>,
}

impl ExternalLicense {
    /// Create an unverified, manually-entered row.
    pub fn manual(
        id: impl Into<String>,
        license_type: LicenseType,
        categories: Vec<LicenseCategory>,
    ) -> Self {
        Self {
            id: id.into(),
            license_number: String::new(),
            license_type,
            categories,
            status: LicenseStatus::Active,
            issue_date: None,
            expiry_date: None,
            issuing_location: None,
            verified: false,
            verification_source: None,
            verification_notes: None,
            is_required: false,
            is_auto_populated: false,
            required_for_category: None,
        }
    }
}

impl LicenseRecord for ExternalLicense {
    fn license_type(&self) -> LicenseType {
        self.license_type
    }

    fn categories(&self) -> &[LicenseCategory] {
        &self.categories
    }

    fn status(&self) -> LicenseStatus {
        self.status
    }

    fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }
}

/// Either kind of license record, tagged by where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum License {
    System(SystemLicense),
    External(ExternalLicense),
}

impl License {
    /// Whether the record is trusted without further verification.
    pub fn is_trusted(&self) -> bool {
        match self {
            Self::System(_) => true,
            Self::External(ext) => ext.verified,
        }
    }

    /// Display identifier: the license number, or the row id for external
    /// rows that have none yet.
    pub fn display_id(&self) -> &str {
        match self {
            Self::System(sys) => &sys.license_number,
            Self::External(ext) if ext.license_number.is_empty() => &ext.id,
            Self::External(ext) => &ext.license_number,
        }
    }
}

impl LicenseRecord for License {
    fn license_type(&self) -> LicenseType {
        match self {
            Self::System(l) => l.license_type(),
            Self::External(l) => l.license_type(),
        }
    }

    fn categories(&self) -> &[LicenseCategory] {
        match self {
            Self::System(l) => l.categories(),
            Self::External(l) => l.categories(),
        }
    }

    fn status(&self) -> LicenseStatus {
        match self {
            Self::System(l) => l.status(),
            Self::External(l) => l.status(),
        }
    }

    fn expiry_date(&self) -> Option<NaiveDate> {
        match self {
            Self::System(l) => l.expiry_date(),
            Self::External(l) => l.expiry_date(),
        }
    }
}
