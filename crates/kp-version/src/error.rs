//! Error type shared by parsing, validation and requirement compilation

use thiserror::Error;

use crate::VersionType;

/// Broad category of a [`VersionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed version or requirement text
    Parse,
    /// Well-formed version rejected by an explicitly requested strictness level
    Validation,
    /// Requirement uses syntax the selected grammar does not support
    Grammar,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version \"{version}\" ({version_type}): {reason}")]
    InvalidVersion {
        version: String,
        version_type: VersionType,
        reason: String,
    },
    #[error("Invalid requirement \"{requirement}\": {reason}")]
    InvalidRequirement { requirement: String, reason: String },
    #[error("Unknown version type \"{0}\", expected one of: strict, loose, npm, cocoapods, ivy")]
    UnknownVersionType(String),
    #[error("Invalid version (no {component} version): {version}")]
    MissingComponent {
        version: String,
        component: &'static str,
    },
    #[error("Unsupported token '{token}' in \"{requirement}\" for {version_type} requirements")]
    UnsupportedToken {
        token: String,
        version_type: VersionType,
        requirement: String,
    },
    #[error("The {operator} requirements are not supported for {version_type} versions")]
    UnsupportedOperator {
        operator: &'static str,
        version_type: VersionType,
    },
    #[error("Ivy dynamic revisions are not supported: \"{0}\"")]
    UnsupportedDynamicRevision(String),
}

impl VersionError {
    pub(crate) fn invalid_version(
        version: &str,
        version_type: VersionType,
        reason: impl Into<String>,
    ) -> Self {
        VersionError::InvalidVersion {
            version: version.to_string(),
            version_type,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_requirement(requirement: &str, reason: impl Into<String>) -> Self {
        VersionError::InvalidRequirement {
            requirement: requirement.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            VersionError::InvalidVersion { .. }
            | VersionError::InvalidRequirement { .. }
            | VersionError::UnknownVersionType(_) => ErrorKind::Parse,
            VersionError::MissingComponent { .. } => ErrorKind::Validation,
            VersionError::UnsupportedToken { .. }
            | VersionError::UnsupportedOperator { .. }
            | VersionError::UnsupportedDynamicRevision(_) => ErrorKind::Grammar,
        }
    }
}
