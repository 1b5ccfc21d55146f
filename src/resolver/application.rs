//! Application workflow kinds.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PermisError;

/// The workflow an application belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationType {
    /// First license in a category.
    #[default]
    NewLicense,
    /// Conversion of a Malagasy license to another format.
    Conversion,
    /// Professional driving endorsement.
    Professional,
    /// Conversion of a license issued abroad.
    ForeignConversion,
    /// Temporary license while a card is produced.
    TemporaryLicense,
    /// Renewal of held categories.
    Renewal,
    /// Learner's permit.
    LearnersPermit,
}

/// How the resolver treats an application type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrerequisitePolicy {
    /// Resolve prerequisites for the target category.
    Target,
    /// Re-issue of held categories: skip when system licenses exist,
    /// otherwise check the categories the applicant declared.
    Reissue,
    /// Never auto-populate.
    Skip,
}

impl ApplicationType {
    /// All application types, in display order.
    pub const ALL: [ApplicationType; 7] = [
        Self::NewLicense,
        Self::Conversion,
        Self::Professional,
        Self::ForeignConversion,
        Self::TemporaryLicense,
        Self::Renewal,
        Self::LearnersPermit,
    ];

    /// Resolver policy for this application type.
    ///
    /// Every type is listed explicitly so that adding a type forces a
    /// decision here.
    pub fn policy(&self) -> PrerequisitePolicy {
        match self {
            Self::NewLicense | Self::Conversion | Self::Professional | Self::ForeignConversion => {
                PrerequisitePolicy::Target
            }
            Self::TemporaryLicense | Self::Renewal => PrerequisitePolicy::Reissue,
            Self::LearnersPermit => PrerequisitePolicy::Skip,
        }
    }

    /// Kebab-case name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewLicense => "new-license",
            Self::Conversion => "conversion",
            Self::Professional => "professional",
            Self::ForeignConversion => "foreign-conversion",
            Self::TemporaryLicense => "temporary-license",
            Self::Renewal => "renewal",
            Self::LearnersPermit => "learners-permit",
        }
    }
}

impl FromStr for ApplicationType {
    type Err = PermisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| PermisError::UnknownApplicationType {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_and_snake_case() {
        assert_eq!(
            "foreign-conversion".parse::<ApplicationType>().unwrap(),
            ApplicationType::ForeignConversion
        );
        assert_eq!(
            "LEARNERS_PERMIT".parse::<ApplicationType>().unwrap(),
            ApplicationType::LearnersPermit
        );
    }

    #[test]
    fn rejects_unknown_type() {
        let err = "duplicate".parse::<ApplicationType>().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for app in ApplicationType::ALL {
            assert_eq!(app.to_string().parse::<ApplicationType>().unwrap(), app);
        }
    }

    #[test]
    fn policies() {
        assert_eq!(ApplicationType::NewLicense.policy(), PrerequisitePolicy::Target);
        assert_eq!(
            ApplicationType::ForeignConversion.policy(),
            PrerequisitePolicy::Target
        );
        assert_eq!(ApplicationType::Renewal.policy(), PrerequisitePolicy::Reissue);
        assert_eq!(
            ApplicationType::TemporaryLicense.policy(),
            PrerequisitePolicy::Reissue
        );
        assert_eq!(ApplicationType::LearnersPermit.policy(), PrerequisitePolicy::Skip);
    }

    #[test]
    fn serializes_screaming_case() {
        let json = serde_json::to_string(&ApplicationType::TemporaryLicense).unwrap();
        assert_eq!(json, "\"TEMPORARY_LICENSE\"");
    }
}
