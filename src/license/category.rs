//! License category codes.
//!
//! A [`LicenseCategory`] identifies a class of driving entitlement such as
//! `B` or `C1`, or a learner's-permit code such as `2`. Whether a code is a
//! learner's code is a property of the rule table, not of the code itself;
//! see [`crate::rules::RuleSet::is_learners_code`].

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PermisError, Result};

/// A normalized license category code.
///
/// Codes are trimmed and upper-cased at construction, so `"c1"` and `" C1 "`
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
pub struct LicenseCategory(String);

impl LicenseCategory {
    /// Create a category from a string, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`PermisError::InvalidCategory`] if the value is empty,
    /// whitespace-only, or contains whitespace or control characters.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let raw = value.into();
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty()
            || normalized
                .chars()
                .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(PermisError::InvalidCategory { value: raw });
        }
        Ok(Self(normalized))
    }

    /// Access the category code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LicenseCategory {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Accept bare YAML numbers so learner's codes can be written unquoted.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        let raw = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl FromStr for LicenseCategory {
    type Err = PermisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for LicenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Join categories for display, e.g. `"B, C1"`.
pub fn join_categories<'a>(categories: impl IntoIterator<Item = &'a LicenseCategory>) -> String {
    categories
        .into_iter()
        .map(LicenseCategory::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_case_and_whitespace() {
        let cat = LicenseCategory::new(" c1 ").unwrap();
        assert_eq!(cat.as_str(), "C1");
        assert_eq!(cat, LicenseCategory::new("C1").unwrap());
    }

    #[test]
    fn new_rejects_empty() {
        assert!(LicenseCategory::new("").is_err());
        assert!(LicenseCategory::new("   ").is_err());
    }

    #[test]
    fn new_rejects_inner_whitespace() {
        assert!(LicenseCategory::new("C 1").is_err());
    }

    #[test]
    fn deserializes_numbers_as_codes() {
        let cat: LicenseCategory = serde_yaml::from_str("2").unwrap();
        assert_eq!(cat.as_str(), "2");
    }

    #[test]
    fn deserialize_rejects_blank() {
        let result: std::result::Result<LicenseCategory, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let cat = LicenseCategory::new("be").unwrap();
        assert_eq!(serde_json::to_string(&cat).unwrap(), "\"BE\"");
    }

    #[test]
    fn join_categories_formats_list() {
        let cats = vec![
            LicenseCategory::new("B").unwrap(),
            LicenseCategory::new("C1").unwrap(),
        ];
        assert_eq!(join_categories(&cats), "B, C1");
    }
}
