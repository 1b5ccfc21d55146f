//! License domain types.
//!
//! - [`category`] - Validated license category codes
//! - [`record`] - System and external license records
//! - [`date`] - Validation of operator-typed dates

pub mod category;
pub mod date;
pub mod record;

pub use category::{join_categories, LicenseCategory};
pub use date::DateBounds;
pub use record::{
    ExternalLicense, License, LicenseRecord, LicenseStatus, LicenseType, SystemLicense,
};
