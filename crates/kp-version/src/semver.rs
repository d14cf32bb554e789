//! Parsed version value with ordering, diff and derivations

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::{Comparator, Requirement, VersionDiff, VersionError, VersionParser, VersionType};

/// An immutable, parsed version.
///
/// Equality includes build metadata; [`Semver::is_equivalent_to`] ignores it.
/// `Ord` is precedence order with the suffix text and build as final tie-breakers,
/// so it agrees with `Eq`. Use [`Semver::cmp_precedence`] for pure precedence.
#[derive(Debug, Clone)]
pub struct Semver {
    value: String,
    version_type: VersionType,
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
    suffix_tokens: Vec<String>,
    build: Option<String>,
}

impl Semver {
    /// Parse a version literal with the given grammar
    pub fn parse(version: &str, version_type: VersionType) -> Result<Self, VersionError> {
        VersionParser::new().parse(version, version_type)
    }

    /// Build a version from its components, regenerating the canonical value
    pub fn create(
        version_type: VersionType,
        major: u64,
        minor: Option<u64>,
        patch: Option<u64>,
        suffix_tokens: Vec<String>,
        build: Option<String>,
    ) -> Result<Self, VersionError> {
        let version = Self::assemble(version_type, major, minor, patch, suffix_tokens, build);

        if version.minor.is_none() && version.patch.is_some() {
            return Err(VersionError::invalid_version(
                &version.value,
                version_type,
                "a patch version requires a minor version",
            ));
        }
        if version_type.requires_full_version() && (version.minor.is_none() || version.patch.is_none()) {
            return Err(VersionError::invalid_version(
                &version.value,
                version_type,
                "STRICT versions require major.minor.patch",
            ));
        }

        // Each part must read back unchanged from the regenerated value
        let parser = VersionParser::new();
        for token in &version.suffix_tokens {
            if token.contains('.') {
                return Err(VersionError::invalid_version(
                    &version.value,
                    version_type,
                    format!("invalid suffix identifier \"{}\"", token),
                ));
            }
            parser.parse_suffix(token, &version.value, version_type)?;
        }
        if let Some(build) = &version.build {
            parser.parse_build(build, &version.value, version_type)?;
        }
        Ok(version)
    }

    pub(crate) fn from_components(
        value: String,
        version_type: VersionType,
        major: u64,
        minor: Option<u64>,
        patch: Option<u64>,
        suffix_tokens: Vec<String>,
        build: Option<String>,
    ) -> Self {
        Semver {
            value,
            version_type,
            major,
            minor,
            patch,
            suffix_tokens,
            build,
        }
    }

    fn assemble(
        version_type: VersionType,
        major: u64,
        minor: Option<u64>,
        patch: Option<u64>,
        suffix_tokens: Vec<String>,
        build: Option<String>,
    ) -> Self {
        let mut value = major.to_string();
        if let Some(minor) = minor {
            value.push('.');
            value.push_str(&minor.to_string());
        }
        if let Some(patch) = patch {
            value.push('.');
            value.push_str(&patch.to_string());
        }
        if !suffix_tokens.is_empty() {
            value.push('-');
            value.push_str(&suffix_tokens.join("."));
        }
        if let Some(build) = &build {
            value.push('+');
            value.push_str(build);
        }

        Self::from_components(value, version_type, major, minor, patch, suffix_tokens, build)
    }

    // Derivations only move already-validated parts around, so they skip `create`'s checks.
    fn derive(&self, major: u64, minor: Option<u64>, patch: Option<u64>, suffix_tokens: Vec<String>, build: Option<String>) -> Self {
        Self::assemble(self.version_type, major, minor, patch, suffix_tokens, build)
    }

    /// The canonical string: the trimmed original text, or the regenerated text of a
    /// derived version
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn version_type(&self) -> VersionType {
        self.version_type
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    pub fn suffix_tokens(&self) -> &[String] {
        &self.suffix_tokens
    }

    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    /// Parse `other` with this version's grammar
    fn sibling(&self, other: &str) -> Result<Semver, VersionError> {
        Semver::parse(other, self.version_type)
    }

    /// Fails for STRICT when minor or patch is absent
    pub fn validate(&self, version_type: VersionType) -> Result<(), VersionError> {
        if version_type.requires_full_version() {
            if self.minor.is_none() {
                return Err(VersionError::MissingComponent {
                    version: self.value.clone(),
                    component: "minor",
                });
            }
            if self.patch.is_none() {
                return Err(VersionError::MissingComponent {
                    version: self.value.clone(),
                    component: "patch",
                });
            }
        }
        Ok(())
    }

    pub fn cmp_precedence(&self, other: &Semver) -> Ordering {
        Comparator::compare(self, other)
    }

    pub fn is_greater_than(&self, other: &Semver) -> bool {
        Comparator::greater_than(self, other)
    }

    pub fn is_greater_than_or_equal_to(&self, other: &Semver) -> bool {
        Comparator::greater_than_or_equal_to(self, other)
    }

    pub fn is_lower_than(&self, other: &Semver) -> bool {
        Comparator::less_than(self, other)
    }

    pub fn is_lower_than_or_equal_to(&self, other: &Semver) -> bool {
        Comparator::less_than_or_equal_to(self, other)
    }

    /// Same precedence, build ignored
    pub fn is_equivalent_to(&self, other: &Semver) -> bool {
        Comparator::equivalent_to(self, other)
    }

    /// Identical components including build
    pub fn is_equal_to(&self, other: &Semver) -> bool {
        self == other
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

    /// A stable version has a non-zero major and no suffix
    pub fn is_stable(&self) -> bool {
        self.major > 0 && self.suffix_tokens.is_empty()
    }

    /// The most significant differing component
    pub fn diff(&self, other: &Semver) -> VersionDiff {
        if self.major != other.major {
            VersionDiff::Major
        } else if self.minor != other.minor {
            VersionDiff::Minor
        } else if self.patch != other.patch {
            VersionDiff::Patch
        } else if self.suffix_tokens != other.suffix_tokens {
            VersionDiff::Suffix
        } else if self.build != other.build {
            VersionDiff::Build
        } else {
            VersionDiff::None
        }
    }

    pub fn diff_str(&self, other: &str) -> Result<VersionDiff, VersionError> {
        Ok(self.diff(&self.sibling(other)?))
    }

    /// Check against a requirement string parsed with this version's grammar
    pub fn satisfies(&self, requirement: &str) -> Result<bool, VersionError> {
        let requirement = Requirement::parse(requirement, self.version_type)?;
        Ok(requirement.is_satisfied_by(self))
    }

    pub fn satisfies_requirement(&self, requirement: &Requirement) -> bool {
        requirement.is_satisfied_by(self)
    }

    pub fn with_inc_major(&self, increment: u64) -> Semver {
        self.derive(
            self.major.saturating_add(increment),
            self.minor,
            self.patch,
            self.suffix_tokens.clone(),
            self.build.clone(),
        )
    }

    pub fn with_inc_minor(&self, increment: u64) -> Semver {
        self.derive(
            self.major,
            Some(self.minor.unwrap_or(0).saturating_add(increment)),
            self.patch,
            self.suffix_tokens.clone(),
            self.build.clone(),
        )
    }

    pub fn with_inc_patch(&self, increment: u64) -> Semver {
        // A patch needs a minor to sit next to
        self.derive(
            self.major,
            Some(self.minor.unwrap_or(0)),
            Some(self.patch.unwrap_or(0).saturating_add(increment)),
            self.suffix_tokens.clone(),
            self.build.clone(),
        )
    }

    pub fn next_major(&self) -> Semver {
        self.derive(self.major.saturating_add(1), Some(0), Some(0), Vec::new(), self.build.clone())
    }

    pub fn next_minor(&self) -> Semver {
        self.derive(
            self.major,
            Some(self.minor.unwrap_or(0).saturating_add(1)),
            Some(0),
            Vec::new(),
            self.build.clone(),
        )
    }

    pub fn next_patch(&self) -> Semver {
        self.derive(
            self.major,
            Some(self.minor.unwrap_or(0)),
            Some(self.patch.unwrap_or(0).saturating_add(1)),
            Vec::new(),
            self.build.clone(),
        )
    }

    pub fn with_cleared_suffix(&self) -> Semver {
        self.derive(self.major, self.minor, self.patch, Vec::new(), self.build.clone())
    }

    pub fn with_cleared_build(&self) -> Semver {
        self.derive(self.major, self.minor, self.patch, self.suffix_tokens.clone(), None)
    }

    pub fn with_cleared_suffix_and_build(&self) -> Semver {
        self.derive(self.major, self.minor, self.patch, Vec::new(), None)
    }

    /// Replace the suffix. The text is validated like the suffix of a literal.
    pub fn with_suffix(&self, suffix: &str) -> Result<Semver, VersionError> {
        let tokens = VersionParser::new().parse_suffix(suffix, &format!("{}-{}", self.value, suffix), self.version_type)?;
        Ok(self.derive(self.major, self.minor, self.patch, tokens, self.build.clone()))
    }

    /// Replace the build metadata. The text is validated like the build of a literal.
    pub fn with_build(&self, build: &str) -> Result<Semver, VersionError> {
        let build = VersionParser::new().parse_build(build, &format!("{}+{}", self.value, build), self.version_type)?;
        Ok(self.derive(self.major, self.minor, self.patch, self.suffix_tokens.clone(), Some(build)))
    }

    /// Fill absent minor/patch with zero and switch to the STRICT grammar
    pub fn to_strict(&self) -> Semver {
        Self::assemble(
            VersionType::Strict,
            self.major,
            Some(self.minor.unwrap_or(0)),
            Some(self.patch.unwrap_or(0)),
            self.suffix_tokens.clone(),
            self.build.clone(),
        )
    }
}

impl PartialEq for Semver {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.suffix_tokens == other.suffix_tokens
            && self.build == other.build
    }
}

impl Eq for Semver {}

impl Hash for Semver {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.suffix_tokens.hash(state);
        self.build.hash(state);
    }
}

impl PartialOrd for Semver {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Semver {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_precedence(other)
            .then_with(|| self.suffix_tokens.cmp(&other.suffix_tokens))
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl fmt::Display for Semver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Semver {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Semver::parse(s, VersionType::Loose)
    }
}
