//! The per-person license verification aggregate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{PermisError, Result};
use crate::license::{
    DateBounds, ExternalLicense, License, LicenseCategory, LicenseStatus, LicenseType,
    SystemLicense,
};

/// Outcome of removing an external row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The row was removed.
    Removed,
    /// The row was generated as a prerequisite placeholder and was kept.
    Protected,
    /// No row has that id.
    NotFound,
}

/// Changes to apply to an external row.
///
/// `None` leaves a field as it is. Dates are raw user input and are
/// validated against [`DateBounds`] when applied; an empty string clears
/// the date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalLicenseEdit {
    pub license_number: Option<String>,
    pub license_type: Option<LicenseType>,
    pub categories: Option<Vec<LicenseCategory>>,
    pub status: Option<LicenseStatus>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub issuing_location: Option<String>,
    pub verified: Option<bool>,
    pub verification_source: Option<String>,
    pub verification_notes: Option<String>,
}

/// Everything known about one person's licenses.
///
/// `all_license_categories` and `requires_verification` are derived and
/// recomputed after every mutation made through this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseVerificationData {
    pub system_licenses: Vec<SystemLicense>,
    pub external_licenses: Vec<ExternalLicense>,
    /// Sorted union of system categories and verified external categories
    pub all_license_categories: Vec<LicenseCategory>,
    /// Whether any external license is still unverified
    pub requires_verification: bool,
}

impl LicenseVerificationData {
    /// Build the aggregate and compute its derived fields.
    pub fn new(system_licenses: Vec<SystemLicense>, external_licenses: Vec<ExternalLicense>) -> Self {
        let mut data = Self {
            system_licenses,
            external_licenses,
            ..Default::default()
        };
        data.recompute();
        data
    }

    /// Recompute the derived fields from the license lists.
    pub fn recompute(&mut self) {
        let union: BTreeSet<&LicenseCategory> = self
            .system_licenses
            .iter()
            .flat_map(|license| license.categories.iter())
            .chain(
                self.external_licenses
                    .iter()
                    .filter(|license| license.verified)
                    .flat_map(|license| license.categories.iter()),
            )
            .collect();

        self.all_license_categories = union.into_iter().cloned().collect();
        self.requires_verification = self.external_licenses.iter().any(|license| !license.verified);
    }

    /// Replace the system licenses.
    pub fn set_system_licenses(&mut self, licenses: Vec<SystemLicense>) {
        self.system_licenses = licenses;
        self.recompute();
    }

    /// Replace the external licenses, typically with a resolver result.
    pub fn set_external_licenses(&mut self, licenses: Vec<ExternalLicense>) {
        self.external_licenses = licenses;
        self.recompute();
    }

    /// Append a manually entered row.
    pub fn add_external(&mut self, mut license: ExternalLicense) {
        license.is_auto_populated = false;
        license.required_for_category = None;
        self.external_licenses.push(license);
        self.recompute();
    }

    /// Apply an edit to the row with the given id.
    ///
    /// Generated rows may be edited; they keep their generated flag so the
    /// resolver can recognise them on the next pass.
    ///
    /// # Errors
    ///
    /// Returns [`PermisError::UnknownLicense`] if no row has that id.
    pub fn edit_external(&mut self, id: &str, edit: ExternalLicenseEdit, bounds: &DateBounds) -> Result<()> {
        let license = self
            .external_licenses
            .iter_mut()
            .find(|license| license.id == id)
            .ok_or_else(|| PermisError::UnknownLicense { id: id.to_string() })?;

        if let Some(number) = edit.license_number {
            license.license_number = number;
        }
        if let Some(license_type) = edit.license_type {
            license.license_type = license_type;
        }
        if let Some(categories) = edit.categories {
            license.categories = categories;
        }
        if let Some(status) = edit.status {
            license.status = status;
        }
        if let Some(raw) = edit.issue_date {
            license.issue_date = bounds.parse(&raw);
        }
        if let Some(raw) = edit.expiry_date {
            license.expiry_date = bounds.parse(&raw);
        }
        if let Some(location) = edit.issuing_location {
            license.issuing_location = non_empty(location);
        }
        if let Some(verified) = edit.verified {
            license.verified = verified;
        }
        if let Some(source) = edit.verification_source {
            license.verification_source = non_empty(source);
        }
        if let Some(notes) = edit.verification_notes {
            license.verification_notes = non_empty(notes);
        }

        self.recompute();
        Ok(())
    }

    /// Remove a manually entered row.
    pub fn remove_external(&mut self, id: &str) -> Removal {
        let Some(index) = self.external_licenses.iter().position(|license| license.id == id) else {
            return Removal::NotFound;
        };
        if self.external_licenses[index].is_auto_populated {
            tracing::warn!("Refusing to remove required license {}", id);
            return Removal::Protected;
        }

        self.external_licenses.remove(index);
        self.recompute();
        Removal::Removed
    }

    /// All records, system first, as tagged [`License`] values.
    pub fn records(&self) -> Vec<License> {
        self.system_licenses
            .iter()
            .cloned()
            .map(License::System)
            .chain(self.external_licenses.iter().cloned().map(License::External))
            .collect()
    }

    /// Serialize for the submission payload.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PermisError::Other(e.into()))
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cat(code: &str) -> LicenseCategory {
        LicenseCategory::new(code).unwrap()
    }

    fn system(codes: &[&str]) -> SystemLicense {
        SystemLicense {
            license_number: "MG-0001".to_string(),
            license_type: LicenseType::DrivingLicense,
            categories: codes.iter().map(|c| cat(c)).collect(),
            status: LicenseStatus::Active,
            issue_date: None,
            expiry_date: None,
            issuing_location: None,
        }
    }

    fn external(id: &str, codes: &[&str], verified: bool) -> ExternalLicense {
        let mut license = ExternalLicense::manual(
            id,
            LicenseType::DrivingLicense,
            codes.iter().map(|c| cat(c)).collect(),
        );
        license.verified = verified;
        license
    }

    fn generated(id: &str, code: &str) -> ExternalLicense {
        let mut license = external(id, &[code], false);
        license.is_auto_populated = true;
        license.is_required = true;
        license
    }

    #[test]
    fn union_excludes_unverified_external() {
        let data = LicenseVerificationData::new(
            vec![system(&["C", "B"])],
            vec![external("ext-1", &["A"], true), external("ext-2", &["D"], false)],
        );

        assert_eq!(data.all_license_categories, vec![cat("A"), cat("B"), cat("C")]);
        assert!(data.requires_verification);
    }

    #[test]
    fn union_is_deduplicated() {
        let data = LicenseVerificationData::new(
            vec![system(&["B"])],
            vec![external("ext-1", &["B"], true)],
        );

        assert_eq!(data.all_license_categories, vec![cat("B")]);
        assert!(!data.requires_verification);
    }

    #[test]
    fn verifying_row_adds_its_categories() {
        let mut data = LicenseVerificationData::new(vec![], vec![external("ext-1", &["BE"], false)]);
        assert!(data.all_license_categories.is_empty());

        let edit = ExternalLicenseEdit {
            verified: Some(true),
            verification_source: Some("Paper license".to_string()),
            ..Default::default()
        };
        data.edit_external("ext-1", edit, &DateBounds::default()).unwrap();

        assert_eq!(data.all_license_categories, vec![cat("BE")]);
        assert!(!data.requires_verification);
        assert_eq!(
            data.external_licenses[0].verification_source.as_deref(),
            Some("Paper license")
        );
    }

    #[test]
    fn add_forces_manual_flags() {
        let mut data = LicenseVerificationData::default();
        data.add_external(generated("ext-1", "B"));

        assert!(!data.external_licenses[0].is_auto_populated);
        assert!(data.requires_verification);
    }

    #[test]
    fn edit_discards_invalid_dates() {
        let mut data = LicenseVerificationData::new(vec![], vec![external("ext-1", &["B"], false)]);
        let bounds = DateBounds::default();

        let edit = ExternalLicenseEdit {
            issue_date: Some("2020-02-30".to_string()),
            expiry_date: Some("2031-06-30".to_string()),
            ..Default::default()
        };
        data.edit_external("ext-1", edit, &bounds).unwrap();
        assert_eq!(data.external_licenses[0].issue_date, None);
        assert_eq!(
            data.external_licenses[0].expiry_date,
            NaiveDate::from_ymd_opt(2031, 6, 30)
        );

        let edit = ExternalLicenseEdit {
            expiry_date: Some("3020-01-01".to_string()),
            ..Default::default()
        };
        data.edit_external("ext-1", edit, &bounds).unwrap();
        assert_eq!(data.external_licenses[0].expiry_date, None);
    }

    #[test]
    fn edit_unknown_id_fails() {
        let mut data = LicenseVerificationData::default();
        let err = data
            .edit_external("ext-9", ExternalLicenseEdit::default(), &DateBounds::default())
            .unwrap_err();
        assert!(matches!(err, PermisError::UnknownLicense { .. }));
    }

    #[test]
    fn generated_rows_are_protected() {
        let mut data = LicenseVerificationData::new(
            vec![],
            vec![external("ext-1", &["A"], false), generated("auto-b-2", "2")],
        );

        assert_eq!(data.remove_external("auto-b-2"), Removal::Protected);
        assert_eq!(data.external_licenses.len(), 2);

        assert_eq!(data.remove_external("ext-1"), Removal::Removed);
        assert_eq!(data.external_licenses.len(), 1);

        assert_eq!(data.remove_external("ext-1"), Removal::NotFound);
    }

    #[test]
    fn removing_last_unverified_row_clears_flag() {
        let mut data = LicenseVerificationData::new(vec![], vec![external("ext-1", &["A"], false)]);
        data.remove_external("ext-1");
        assert!(!data.requires_verification);
    }

    #[test]
    fn records_are_tagged_by_source() {
        let data = LicenseVerificationData::new(
            vec![system(&["B"])],
            vec![external("ext-1", &["A"], false)],
        );
        let records = data.records();

        assert!(matches!(records[0], License::System(_)));
        assert!(matches!(records[1], License::External(_)));
    }

    #[test]
    fn json_payload_has_derived_fields() {
        let data = LicenseVerificationData::new(vec![system(&["C"])], vec![]);
        let json: serde_json::Value = serde_json::from_str(&data.to_json().unwrap()).unwrap();

        assert_eq!(json["all_license_categories"], serde_json::json!(["C"]));
        assert_eq!(json["requires_verification"], serde_json::json!(false));
    }
}
