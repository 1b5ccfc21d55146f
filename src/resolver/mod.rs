//! Prerequisite resolution for license applications.
//!
//! Given what an applicant already holds and what they are applying for,
//! the resolver returns the external-license list extended with one
//! placeholder row per prerequisite that still has to be proven.
//!
//! # Example
//!
//! ```
//! use permis::license::LicenseCategory;
//! use permis::resolver::{ApplicationType, PrerequisiteResolver, ResolveRequest};
//! use permis::rules::RuleSet;
//!
//! let rules = RuleSet::builtin().unwrap();
//! let resolver = PrerequisiteResolver::new(&rules);
//!
//! let request = ResolveRequest::new(
//!     ApplicationType::NewLicense,
//!     Some(LicenseCategory::new("B").unwrap()),
//! );
//! let rows = resolver.resolve(&request);
//!
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].categories[0].as_str(), "2");
//! ```
//!
//! # Modules
//!
//! - [`application`] - Application types and how each is treated
//! - [`request`] - Resolver input
//! - [`missing`] - Unmet requirements and placeholder generation
//! - [`prerequisite`] - The resolver itself

pub mod application;
pub mod missing;
pub mod prerequisite;
pub mod request;

pub use application::{ApplicationType, PrerequisitePolicy};
pub use missing::{MissingPrerequisite, MissingReason};
pub use prerequisite::PrerequisiteResolver;
pub use request::ResolveRequest;
