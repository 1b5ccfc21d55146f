//! Verification session state for one application form.
//!
//! A [`VerificationSession`] owns the aggregate for the person currently
//! being processed and re-runs the resolver whenever an input changes.
//! System licenses arrive asynchronously from an external lookup; each
//! lookup is tagged with a [`FetchTicket`] so that a slow response for a
//! previous person cannot overwrite the current one.

use crate::error::Result;
use crate::license::{ExternalLicense, LicenseCategory, LicenseType, SystemLicense};
use crate::resolver::{ApplicationType, PrerequisiteResolver, ResolveRequest};

use super::aggregate::{ExternalLicenseEdit, LicenseVerificationData, Removal};

/// Handle for one system-license lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Whether a completed lookup was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// The ticket belongs to a superseded lookup; nothing changed.
    Stale,
}

/// Per-form verification state.
#[derive(Debug)]
pub struct VerificationSession<'r> {
    resolver: PrerequisiteResolver<'r>,
    person_id: Option<String>,
    generation: u64,
    application_type: ApplicationType,
    target_category: Option<LicenseCategory>,
    data: LicenseVerificationData,
    warnings: Vec<String>,
    next_manual_id: u32,
}

impl<'r> VerificationSession<'r> {
    pub fn new(resolver: PrerequisiteResolver<'r>) -> Self {
        Self {
            resolver,
            person_id: None,
            generation: 0,
            application_type: ApplicationType::default(),
            target_category: None,
            data: LicenseVerificationData::default(),
            warnings: Vec::new(),
            next_manual_id: 1,
        }
    }

    /// Switch to another person.
    ///
    /// Clears all person-specific state and invalidates outstanding
    /// lookups. The application type and target are kept.
    pub fn set_person(&mut self, person_id: impl Into<String>) {
        let person_id = person_id.into();
        tracing::debug!("Switching verification session to person {}", person_id);

        self.person_id = Some(person_id);
        self.generation += 1;
        self.data = LicenseVerificationData::default();
        self.warnings.clear();
        self.next_manual_id = 1;
        self.refresh();
    }

    /// Start a system-license lookup for the current person.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Apply the result of a lookup.
    ///
    /// A failed lookup is not fatal: the failure is recorded as a warning and
    /// resolution proceeds as if the person held no system licenses.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<SystemLicense>>) -> FetchOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Ignoring stale license lookup (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return FetchOutcome::Stale;
        }

        let licenses = match result {
            Ok(licenses) => licenses,
            Err(e) => {
                tracing::warn!("License lookup failed, continuing without system licenses: {}", e);
                self.warnings
                    .push(format!("System licenses could not be loaded: {}", e));
                Vec::new()
            }
        };

        self.data.set_system_licenses(licenses);
        self.refresh();
        FetchOutcome::Applied
    }

    pub fn set_application_type(&mut self, application_type: ApplicationType) {
        self.application_type = application_type;
        self.refresh();
    }

    pub fn set_target_category(&mut self, target: Option<LicenseCategory>) {
        self.target_category = target;
        self.refresh();
    }

    /// Add a blank manual row and return its id.
    pub fn add_external(&mut self, license_type: LicenseType, categories: Vec<LicenseCategory>) -> String {
        let id = self.next_id();
        self.data
            .add_external(ExternalLicense::manual(id.clone(), license_type, categories));
        self.refresh();
        id
    }

    /// Edit a row, validating dates against the configured bounds.
    pub fn edit_external(&mut self, id: &str, edit: ExternalLicenseEdit) -> Result<()> {
        let bounds = self.resolver.rules().settings().date_bounds;
        self.data.edit_external(id, edit, &bounds)?;
        self.refresh();
        Ok(())
    }

    /// Remove a manual row. Generated rows are [`Removal::Protected`].
    pub fn remove_external(&mut self, id: &str) -> Removal {
        let removal = self.data.remove_external(id);
        if removal == Removal::Removed {
            self.refresh();
        }
        removal
    }

    /// Re-run the resolver over the current state.
    pub fn refresh(&mut self) {
        let resolved = self.resolver.resolve(&self.request());
        self.data.set_external_licenses(resolved);
    }

    /// The resolver input for the current state.
    pub fn request(&self) -> ResolveRequest {
        ResolveRequest::new(self.application_type, self.target_category.clone())
            .with_system_licenses(self.data.system_licenses.clone())
            .with_external_licenses(self.data.external_licenses.clone())
    }

    pub fn data(&self) -> &LicenseVerificationData {
        &self.data
    }

    /// Non-fatal problems met since the person was selected.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn person_id(&self) -> Option<&str> {
        self.person_id.as_deref()
    }

    fn next_id(&mut self) -> String {
        loop {
            let id = format!("ext-{}", self.next_manual_id);
            self.next_manual_id += 1;
            if !self.data.external_licenses.iter().any(|license| license.id == id) {
                return id;
            }
        }
    }
}
