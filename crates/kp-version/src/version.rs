//! Public version type and the free-function API built on it

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{Requirement, Semver, VersionDiff, VersionError, VersionType};

/// A version together with the grammar it was read with.
///
/// Every derivation returns a new `Version`; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    semver: Semver,
}

impl Version {
    pub fn parse(version: &str, version_type: VersionType) -> Result<Self, VersionError> {
        Ok(Version {
            semver: Semver::parse(version, version_type)?,
        })
    }

    /// Assemble a version from its parts
    pub fn from_parts(
        version_type: VersionType,
        major: u64,
        minor: Option<u64>,
        patch: Option<u64>,
        suffixes: &[&str],
        build: Option<&str>,
    ) -> Result<Self, VersionError> {
        let suffixes = suffixes.iter().map(|s| s.to_string()).collect();
        let semver = Semver::create(version_type, major, minor, patch, suffixes, build.map(str::to_string))?;
        Ok(Version { semver })
    }

    pub fn semver(&self) -> &Semver {
        &self.semver
    }

    pub fn value(&self) -> &str {
        self.semver.value()
    }

    pub fn version_type(&self) -> VersionType {
        self.semver.version_type()
    }

    pub fn major(&self) -> u64 {
        self.semver.major()
    }

    pub fn minor(&self) -> Option<u64> {
        self.semver.minor()
    }

    pub fn patch(&self) -> Option<u64> {
        self.semver.patch()
    }

    pub fn suffixes(&self) -> &[String] {
        self.semver.suffix_tokens()
    }

    pub fn build(&self) -> Option<&str> {
        self.semver.build()
    }

    /// Check the version against a stricter grammar than the one it was parsed with
    pub fn validate(&self, version_type: VersionType) -> Result<(), VersionError> {
        self.semver.validate(version_type)
    }

    fn sibling(&self, other: &str) -> Result<Version, VersionError> {
        Version::parse(other, self.version_type())
    }

    pub fn compare(&self, other: &Version) -> Ordering {
        self.semver.cmp_precedence(&other.semver)
    }

    pub fn is_greater_than(&self, other: &Version) -> bool {
        self.semver.is_greater_than(&other.semver)
    }

    pub fn is_greater_than_or_equal_to(&self, other: &Version) -> bool {
        self.semver.is_greater_than_or_equal_to(&other.semver)
    }

    pub fn is_lower_than(&self, other: &Version) -> bool {
        self.semver.is_lower_than(&other.semver)
    }

    pub fn is_lower_than_or_equal_to(&self, other: &Version) -> bool {
        self.semver.is_lower_than_or_equal_to(&other.semver)
    }

    pub fn is_equivalent_to(&self, other: &Version) -> bool {
        self.semver.is_equivalent_to(&other.semver)
    }

    pub fn is_equal_to(&self, other: &Version) -> bool {
        self.semver.is_equal_to(&other.semver)
    }

    pub fn is_greater_than_str(&self, other: &str) -> Result<bool, VersionError> {
        Ok(self.is_greater_than(&self.sibling(other)?))
    }

    pub fn is_greater_than_or_equal_to_str(&self, other: &str) -> Result<bool, VersionError> {
        Ok(self.is_greater_than_or_equal_to(&self.sibling(other)?))
    }

    pub fn is_lower_than_str(&self, other: &str) -> Result<bool, VersionError> {
        Ok(self.is_lower_than(&self.sibling(other)?))
    }

    pub fn is_lower_than_or_equal_to_str(&self, other: &str) -> Result<bool, VersionError> {
        Ok(self.is_lower_than_or_equal_to(&self.sibling(other)?))
    }

    pub fn is_equivalent_to_str(&self, other: &str) -> Result<bool, VersionError> {
        Ok(self.is_equivalent_to(&self.sibling(other)?))
    }

    pub fn is_equal_to_str(&self, other: &str) -> Result<bool, VersionError> {
        Ok(self.is_equal_to(&self.sibling(other)?))
    }

    pub fn satisfies(&self, requirement: &str) -> Result<bool, VersionError> {
        self.semver.satisfies(requirement)
    }

    pub fn satisfies_requirement(&self, requirement: &Requirement) -> bool {
        self.semver.satisfies_requirement(requirement)
    }

    pub fn is_stable(&self) -> bool {
        self.semver.is_stable()
    }

    pub fn diff(&self, other: &Version) -> VersionDiff {
        self.semver.diff(&other.semver)
    }

    pub fn diff_str(&self, other: &str) -> Result<VersionDiff, VersionError> {
        Ok(self.diff(&self.sibling(other)?))
    }

    pub fn with_inc_major(&self, increment: u64) -> Version {
        self.semver.with_inc_major(increment).into()
    }

    pub fn with_inc_minor(&self, increment: u64) -> Version {
        self.semver.with_inc_minor(increment).into()
    }

    pub fn with_inc_patch(&self, increment: u64) -> Version {
        self.semver.with_inc_patch(increment).into()
    }

    pub fn next_major(&self) -> Version {
        self.semver.next_major().into()
    }

    pub fn next_minor(&self) -> Version {
        self.semver.next_minor().into()
    }

    pub fn next_patch(&self) -> Version {
        self.semver.next_patch().into()
    }

    pub fn with_cleared_suffix(&self) -> Version {
        self.semver.with_cleared_suffix().into()
    }

    pub fn with_cleared_build(&self) -> Version {
        self.semver.with_cleared_build().into()
    }

    pub fn with_cleared_suffix_and_build(&self) -> Version {
        self.semver.with_cleared_suffix_and_build().into()
    }

    pub fn with_suffix(&self, suffix: &str) -> Result<Version, VersionError> {
        Ok(self.semver.with_suffix(suffix)?.into())
    }

    pub fn with_build(&self, build: &str) -> Result<Version, VersionError> {
        Ok(self.semver.with_build(build)?.into())
    }

    pub fn to_strict(&self) -> Version {
        self.semver.to_strict().into()
    }
}

impl From<Semver> for Version {
    fn from(semver: Semver) -> Self {
        Version { semver }
    }
}

impl From<Version> for Semver {
    fn from(version: Version) -> Self {
        version.semver
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.semver)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s, VersionType::Loose)
    }
}

/// Parse a version with the given grammar
pub fn parse(version: &str, version_type: VersionType) -> Result<Version, VersionError> {
    Version::parse(version, version_type)
}

pub fn validate(version: &Version, version_type: VersionType) -> Result<(), VersionError> {
    version.validate(version_type)
}

/// Precedence order, build ignored
pub fn compare(a: &Version, b: &Version) -> Ordering {
    a.compare(b)
}

pub fn diff(a: &Version, b: &Version) -> VersionDiff {
    a.diff(b)
}

/// Check a version against a requirement read with the version's grammar
pub fn satisfies(version: &Version, requirement: &str) -> Result<bool, VersionError> {
    version.satisfies(requirement)
}

/// Return the versions that satisfy the requirement, in input order.
/// Versions that don't parse under `version_type` are skipped.
pub fn satisfied_by(
    versions: &[&str],
    requirement: &str,
    version_type: VersionType,
) -> Result<Vec<String>, VersionError> {
    let requirement = Requirement::parse(requirement, version_type)?;

    Ok(versions
        .iter()
        .filter_map(|v| {
            let semver = Semver::parse(v, version_type).ok()?;
            if requirement.is_satisfied_by(&semver) {
                Some(v.to_string())
            } else {
                None
            }
        })
        .collect())
}

/// Sort versions in ascending precedence order
pub fn sort(versions: &[&str], version_type: VersionType) -> Vec<String> {
    sort_versions(versions, version_type, true)
}

/// Sort versions in descending precedence order (reverse sort)
pub fn rsort(versions: &[&str], version_type: VersionType) -> Vec<String> {
    sort_versions(versions, version_type, false)
}

fn sort_versions(versions: &[&str], version_type: VersionType, ascending: bool) -> Vec<String> {
    let mut parsed: Vec<(Semver, usize)> = versions
        .iter()
        .enumerate()
        .filter_map(|(i, v)| match Semver::parse(v, version_type) {
            Ok(semver) => Some((semver, i)),
            Err(err) => {
                log::debug!("Skipping unsortable version: {}", err);
                None
            }
        })
        .collect();

    // Stable sort keeps equivalent versions in input order
    parsed.sort_by(|(a, _), (b, _)| {
        let cmp = a.cmp_precedence(b);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });

    parsed.into_iter().map(|(_, i)| versions[i].to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sut() -> Version {
        Version::from_parts(VersionType::Npm, 2, Some(3), Some(4), &["rc-1", "beta-2"], None).unwrap()
    }

    const CASES: [&str; 4] = ["0", "2.0", "2.3.4-rc-1.beta-2", "3.0"];

    #[test]
    fn test_value_with_all_parts() {
        assert_eq!(sut().value(), "2.3.4-rc-1.beta-2");
        assert_eq!(sut().version_type(), VersionType::Npm);
        assert_eq!(sut().suffixes(), ["rc-1", "beta-2"]);
    }

    #[test]
    fn test_validate_strict() {
        assert!(sut().validate(VersionType::Strict).is_ok());

        let no_patch = Version::from_parts(VersionType::Npm, 2, Some(3), None, &["rc-1"], None).unwrap();
        let err = no_patch.validate(VersionType::Strict).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Validation);

        let no_minor = Version::from_parts(VersionType::Npm, 2, None, None, &[], None).unwrap();
        assert!(no_minor.validate(VersionType::Strict).is_err());
        assert!(no_minor.validate(VersionType::Loose).is_ok());
    }

    #[test]
    fn test_from_parts_rejects_unreadable_parts() {
        assert!(Version::from_parts(VersionType::Loose, 1, Some(0), Some(0), &["a+b"], None).is_err());
        assert!(Version::from_parts(VersionType::Loose, 1, Some(0), Some(0), &["a.b"], None).is_err());
        assert!(Version::from_parts(VersionType::Loose, 1, Some(0), Some(0), &[], Some("a b")).is_err());
        assert!(Version::from_parts(VersionType::Strict, 1, None, None, &[], None).is_err());

        let version = Version::from_parts(VersionType::Loose, 1, Some(0), Some(0), &["a-b"], Some("c")).unwrap();
        let reparsed = Version::parse(version.value(), VersionType::Loose).unwrap();
        assert_eq!(reparsed, version);
    }

    #[test]
    fn test_greater_than() {
        let expected = [true, true, false, false];
        for (version, expected) in CASES.iter().zip(expected) {
            assert_eq!(sut().is_greater_than_str(version).unwrap(), expected, "{}", version);
            let other = Version::parse(version, VersionType::Loose).unwrap();
            assert_eq!(sut().is_greater_than(&other), expected, "{}", version);
        }
    }

    #[test]
    fn test_greater_than_or_equal_to() {
        let expected = [true, true, true, false];
        for (version, expected) in CASES.iter().zip(expected) {
            assert_eq!(sut().is_greater_than_or_equal_to_str(version).unwrap(), expected, "{}", version);
            let other = Version::parse(version, VersionType::Loose).unwrap();
            assert_eq!(sut().is_greater_than_or_equal_to(&other), expected, "{}", version);
        }
    }

    #[test]
    fn test_lower_than() {
        let expected = [false, false, false, true];
        for (version, expected) in CASES.iter().zip(expected) {
            assert_eq!(sut().is_lower_than_str(version).unwrap(), expected, "{}", version);
            let other = Version::parse(version, VersionType::Loose).unwrap();
            assert_eq!(sut().is_lower_than(&other), expected, "{}", version);
        }
    }

    #[test]
    fn test_lower_than_or_equal_to() {
        let expected = [false, false, true, true];
        for (version, expected) in CASES.iter().zip(expected) {
            assert_eq!(sut().is_lower_than_or_equal_to_str(version).unwrap(), expected, "{}", version);
            let other = Version::parse(version, VersionType::Loose).unwrap();
            assert_eq!(sut().is_lower_than_or_equal_to(&other), expected, "{}", version);
        }
    }

    #[test]
    fn test_satisfies_with_every_type() {
        for version_type in VersionType::ALL {
            let version = Version::parse("1.2.3", version_type).unwrap();
            assert!(version.satisfies("1.2.3").unwrap());
            assert!(!version.satisfies("4.5.6").unwrap());
        }
    }

    #[test]
    fn test_satisfies_requirement() {
        let requirement = Requirement::parse("^1.2.3", VersionType::Npm).unwrap();
        assert!(parse("1.3.0", VersionType::Npm).unwrap().satisfies_requirement(&requirement));
        assert!(!parse("2.0.0", VersionType::Npm).unwrap().satisfies_requirement(&requirement));
    }

    #[test]
    fn test_free_functions() {
        let a = parse("1.2.3-beta", VersionType::Npm).unwrap();
        let b = parse("1.2.3", VersionType::Npm).unwrap();
        assert_eq!(compare(&a, &b), Ordering::Less);
        assert_eq!(diff(&a, &b), VersionDiff::Suffix);
        assert!(satisfies(&b, "1.2.3 - 2.3.4").unwrap());
        assert!(!satisfies(&a, "1.2.3 - 2.3.4").unwrap());
        assert!(validate(&b, VersionType::Strict).is_ok());
        assert!(satisfies(&b, "((1.2.3").is_err());
    }

    #[test]
    fn test_diff_prefers_major() {
        let version = sut();
        assert_eq!(version.diff_str("3.3.4-alpha").unwrap(), VersionDiff::Major);
        assert_eq!(version.diff_str("2.3.4-rc-1.beta-2").unwrap(), VersionDiff::None);
    }

    #[test]
    fn test_derivations_keep_type() {
        let version = sut();
        let next = version.next_minor();
        assert_eq!(next.value(), "2.4.0");
        assert_eq!(next.version_type(), VersionType::Npm);
        assert_eq!(version.with_build("b7").unwrap().value(), "2.3.4-rc-1.beta-2+b7");
        assert_eq!(version.to_strict().version_type(), VersionType::Strict);
        assert!(version.with_suffix("").is_err());
    }

    #[test]
    fn test_sort_and_rsort() {
        let versions = ["1.2.3", "1.0.0-alpha", "0.9.0", "not-a-version", "1.0.0", "1.2.3+build"];
        assert_eq!(
            sort(&versions, VersionType::Strict),
            ["0.9.0", "1.0.0-alpha", "1.0.0", "1.2.3", "1.2.3+build"]
        );
        assert_eq!(
            rsort(&versions, VersionType::Strict),
            ["1.2.3", "1.2.3+build", "1.0.0", "1.0.0-alpha", "0.9.0"]
        );
    }

    #[test]
    fn test_satisfied_by() {
        let versions = ["1.0.0", "1.2.4", "1.3.0-beta", "2.0.0", "junk"];
        assert_eq!(
            satisfied_by(&versions, ">=1.2.0 <2.0.0", VersionType::Npm).unwrap(),
            ["1.2.4"]
        );
        assert!(satisfied_by(&versions, "^", VersionType::Npm).is_err());
    }

    #[test]
    fn test_from_str_is_loose() {
        let version: Version = "1.2".parse().unwrap();
        assert_eq!(version.version_type(), VersionType::Loose);
        assert_eq!(version.to_string(), "1.2");
        assert!("v1.2".parse::<Version>().is_err());
    }
}
