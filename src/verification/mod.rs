//! License verification state.
//!
//! - [`aggregate`] - The per-person [`LicenseVerificationData`] and its edits
//! - [`session`] - [`VerificationSession`], which keeps the aggregate in step
//!   with the resolver and sequences system-license lookups

pub mod aggregate;
pub mod session;

pub use aggregate::{ExternalLicenseEdit, LicenseVerificationData, Removal};
pub use session::{FetchOutcome, FetchTicket, VerificationSession};
