//! Grammar selection and diff classification

use std::fmt;
use std::str::FromStr;

use crate::VersionError;

/// The version grammars understood by the parser and the requirement lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VersionType {
    /// `major.minor.patch[-suffix][+build]`, all three numbers mandatory
    Strict,
    /// Major required; minor, patch, suffix and build optional
    #[default]
    Loose,
    /// Rules of npm: leading `v`, `x`/`*` wildcards, `~ ^ = < <= > >= - || ( )`
    Npm,
    /// Rules of CocoaPods: `~> = < <= > >=`
    Cocoapods,
    /// Rules of Ivy. Dynamic revisions (`4.2.+`, `[1.0,2.0]`) are not supported yet
    Ivy,
}

impl VersionType {
    pub const ALL: [VersionType; 5] = [
        VersionType::Strict,
        VersionType::Loose,
        VersionType::Npm,
        VersionType::Cocoapods,
        VersionType::Ivy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionType::Strict => "STRICT",
            VersionType::Loose => "LOOSE",
            VersionType::Npm => "NPM",
            VersionType::Cocoapods => "COCOAPODS",
            VersionType::Ivy => "IVY",
        }
    }

    /// Whether minor and patch must be present at parse time
    pub fn requires_full_version(&self) -> bool {
        matches!(self, VersionType::Strict)
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VersionType {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VersionError::UnknownVersionType(s.to_string()))
    }
}

/// The most significant component at which two versions differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionDiff {
    None,
    Major,
    Minor,
    Patch,
    Suffix,
    Build,
}

impl VersionDiff {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionDiff::None => "NONE",
            VersionDiff::Major => "MAJOR",
            VersionDiff::Minor => "MINOR",
            VersionDiff::Patch => "PATCH",
            VersionDiff::Suffix => "SUFFIX",
            VersionDiff::Build => "BUILD",
        }
    }
}

impl fmt::Display for VersionDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("npm".parse::<VersionType>().unwrap(), VersionType::Npm);
        assert_eq!("CocoaPods".parse::<VersionType>().unwrap(), VersionType::Cocoapods);
        assert_eq!(" STRICT ".parse::<VersionType>().unwrap(), VersionType::Strict);
        assert!("maven".parse::<VersionType>().is_err());
    }

    #[test]
    fn test_default_is_loose() {
        assert_eq!(VersionType::default(), VersionType::Loose);
    }
}
