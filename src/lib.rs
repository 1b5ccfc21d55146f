//! permis - Driving-license prerequisite resolution.
//!
//! Given the licenses an applicant already holds and the category they are
//! applying for, permis works out which prerequisites (a learner's permit,
//! a lower category) are still missing and generates placeholder rows an
//! officer has to verify before the application can proceed.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Rule table loading, layering, and merging
//! - [`error`] - Error types and result aliases
//! - [`license`] - License records, categories, and date input
//! - [`resolver`] - Missing-prerequisite resolution
//! - [`rules`] - Category rules and rule table validation
//! - [`ui`] - Terminal output
//! - [`verification`] - Per-person verification aggregate and session
//!
//! # Example
//!
//! ```
//! use permis::license::{LicenseCategory, LicenseStatus, LicenseType, SystemLicense};
//! use permis::resolver::{ApplicationType, PrerequisiteResolver, ResolveRequest};
//! use permis::rules::RuleSet;
//!
//! let rules = RuleSet::builtin().unwrap();
//! let held = SystemLicense {
//!     license_number: "MG-2015-1187".to_string(),
//!     license_type: LicenseType::DrivingLicense,
//!     categories: vec![LicenseCategory::new("C").unwrap()],
//!     status: LicenseStatus::Active,
//!     issue_date: None,
//!     expiry_date: None,
//!     issuing_location: None,
//! };
//!
//! // C already entitles its holder to B, so a trailer endorsement needs nothing else.
//! let request = ResolveRequest::new(
//!     ApplicationType::NewLicense,
//!     Some(LicenseCategory::new("BE").unwrap()),
//! )
//! .with_system_licenses(vec![held]);
//!
//! assert!(PrerequisiteResolver::new(&rules).resolve(&request).is_empty());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod license;
pub mod resolver;
pub mod rules;
pub mod ui;
pub mod verification;

pub use error::{PermisError, Result};
