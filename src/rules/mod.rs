//! License category rules.
//!
//! Defines which categories exist, what each requires, and which lower
//! categories each one entitles. The built-in Malagasy table lives in
//! `builtin.yml` and is layered with project overrides by [`crate::config`].
//!
//! # Modules
//!
//! - [`rule`] - [`CategoryRule`] and the validated [`RuleSet`]
//! - [`validator`] - Rule table consistency checks

pub mod rule;
pub mod validator;

pub use rule::{CategoryRule, RuleSet, RuleSetBuilder};
pub use validator::{has_errors, validate_rules, RuleIssue, Severity};
