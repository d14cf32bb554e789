//! Version literal parsing

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::{Semver, VersionError, VersionType};

lazy_static! {
    // Numeric run, optional suffix after the first hyphen, build after the first plus.
    // Wildcards are captured here and rejected later for grammars that don't allow them.
    static ref VERSION_RE: Regex = Regex::new(
        r"^(?P<major>[0-9]+)(?:\.(?P<minor>[0-9]+|[xX*]))?(?:\.(?P<patch>[0-9]+|[xX*]))?(?:-(?P<suffix>[^+\s]*))?(?:\+(?P<build>\S*))?$"
    ).unwrap();

    static ref LEADING_NUMBER_RE: Regex = Regex::new(r"^[0-9]").unwrap();
}

/// Parser turning version literals into [`Semver`] values
pub struct VersionParser;

impl VersionParser {
    pub fn new() -> Self {
        VersionParser
    }

    /// Check if a version string is valid for the given grammar
    pub fn is_valid(&self, version: &str, version_type: VersionType) -> bool {
        self.parse(version, version_type).is_ok()
    }

    /// Parse a version literal.
    ///
    /// The canonical value of the result is the trimmed input (minus the npm `v` prefix),
    /// case preserved. Absent minor/patch stay absent; only STRICT rejects them here.
    pub fn parse(&self, version: &str, version_type: VersionType) -> Result<Semver, VersionError> {
        let mut value = version.trim();
        if version_type == VersionType::Npm {
            if let Some(rest) = value.strip_prefix('v') {
                value = rest.trim_start();
            }
        }

        if value.is_empty() {
            return Err(VersionError::invalid_version(version, version_type, "empty version"));
        }

        let caps = VERSION_RE.captures(value).ok_or_else(|| {
            let reason = if LEADING_NUMBER_RE.is_match(value) {
                "expected major[.minor[.patch]][-suffix][+build]"
            } else {
                "major version must be numeric"
            };
            log::debug!("Rejected version literal \"{}\": {}", value, reason);
            VersionError::invalid_version(value, version_type, reason)
        })?;

        let major = parse_number(&caps, "major", value, version_type)?
            .ok_or_else(|| VersionError::invalid_version(value, version_type, "major version must be numeric"))?;
        let minor = parse_number(&caps, "minor", value, version_type)?;
        let patch = parse_number(&caps, "patch", value, version_type)?;

        if minor.is_none() && patch.is_some() {
            return Err(VersionError::invalid_version(
                value,
                version_type,
                "a numeric patch cannot follow a wildcard minor",
            ));
        }

        if version_type.requires_full_version() && (minor.is_none() || patch.is_none()) {
            return Err(VersionError::invalid_version(
                value,
                version_type,
                "STRICT versions require major.minor.patch",
            ));
        }

        let suffix_tokens = match caps.name("suffix") {
            Some(m) => self.parse_suffix(m.as_str(), value, version_type)?,
            None => Vec::new(),
        };

        let build = match caps.name("build") {
            Some(m) => Some(self.parse_build(m.as_str(), value, version_type)?),
            None => None,
        };

        Ok(Semver::from_components(
            value.to_string(),
            version_type,
            major,
            minor,
            patch,
            suffix_tokens,
            build,
        ))
    }

    /// Split a suffix into its dot-separated identifiers
    pub fn parse_suffix(
        &self,
        suffix: &str,
        version: &str,
        version_type: VersionType,
    ) -> Result<Vec<String>, VersionError> {
        if suffix.is_empty() {
            return Err(VersionError::invalid_version(version, version_type, "empty suffix"));
        }
        if suffix.contains('+') || suffix.chars().any(char::is_whitespace) {
            return Err(VersionError::invalid_version(
                version,
                version_type,
                format!("invalid suffix \"{}\"", suffix),
            ));
        }

        let tokens: Vec<String> = suffix.split('.').map(str::to_string).collect();
        if tokens.iter().any(String::is_empty) {
            return Err(VersionError::invalid_version(
                version,
                version_type,
                format!("empty identifier in suffix \"{}\"", suffix),
            ));
        }
        Ok(tokens)
    }

    /// Validate build metadata. Everything after the first `+` is kept verbatim.
    pub fn parse_build(
        &self,
        build: &str,
        version: &str,
        version_type: VersionType,
    ) -> Result<String, VersionError> {
        if build.is_empty() {
            return Err(VersionError::invalid_version(version, version_type, "empty build"));
        }
        if build.chars().any(char::is_whitespace) {
            return Err(VersionError::invalid_version(
                version,
                version_type,
                format!("invalid build \"{}\"", build),
            ));
        }
        Ok(build.to_string())
    }
}

impl Default for VersionParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_number(
    caps: &Captures,
    name: &str,
    value: &str,
    version_type: VersionType,
) -> Result<Option<u64>, VersionError> {
    let Some(m) = caps.name(name) else {
        return Ok(None);
    };

    match m.as_str() {
        "x" | "X" | "*" => {
            if version_type == VersionType::Npm {
                Ok(None)
            } else {
                Err(VersionError::invalid_version(
                    value,
                    version_type,
                    format!("wildcard {} version is only supported for NPM", name),
                ))
            }
        }
        digits => digits.parse::<u64>().map(Some).map_err(|_| {
            VersionError::invalid_version(value, version_type, format!("{} version is out of range", name))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(version: &str, version_type: VersionType) -> Result<Semver, VersionError> {
        VersionParser::new().parse(version, version_type)
    }

    fn assert_is_semver(
        semver: &Semver,
        value: &str,
        major: u64,
        minor: Option<u64>,
        patch: Option<u64>,
        suffix: &[&str],
        build: Option<&str>,
    ) {
        assert_eq!(semver.value(), value);
        assert_eq!(semver.major(), major);
        assert_eq!(semver.minor(), minor);
        assert_eq!(semver.patch(), patch);
        assert_eq!(semver.suffix_tokens(), suffix);
        assert_eq!(semver.build(), build);
    }

    #[test]
    fn test_strict_full_version() {
        let version = "1.2.3-beta.11+sha.0nsfgkjkjsdf";
        let semver = parse(version, VersionType::Strict).unwrap();
        assert_is_semver(&semver, version, 1, Some(2), Some(3), &["beta", "11"], Some("sha.0nsfgkjkjsdf"));
    }

    #[test]
    fn test_strict_requires_three_components() {
        assert!(parse("1.2-beta.11+sha.0nsfgkjkjsdf", VersionType::Strict).is_err());
        assert!(parse("1-beta.11+sha.0nsfgkjkjsdf", VersionType::Strict).is_err());
    }

    #[test]
    fn test_partial_versions_for_lenient_grammars() {
        for version_type in [VersionType::Loose, VersionType::Npm, VersionType::Cocoapods, VersionType::Ivy] {
            let version = "1.2-beta.11+sha.0nsfgkjkjsdf";
            let semver = parse(version, version_type).unwrap();
            assert_is_semver(&semver, version, 1, Some(2), None, &["beta", "11"], Some("sha.0nsfgkjkjsdf"));

            let version = "1-beta.11+sha.0nsfgkjkjsdf";
            let semver = parse(version, version_type).unwrap();
            assert_is_semver(&semver, version, 1, None, None, &["beta", "11"], Some("sha.0nsfgkjkjsdf"));
        }
    }

    #[test]
    fn test_npm_leading_v() {
        let semver = parse("v1.2.3-beta.11+sha.0nsfgkjkjsdf", VersionType::Npm).unwrap();
        assert_is_semver(&semver, "1.2.3-beta.11+sha.0nsfgkjkjsdf", 1, Some(2), Some(3), &["beta", "11"], Some("sha.0nsfgkjkjsdf"));

        let semver = parse("v 1.2.3-beta.11+sha.0nsfgkjkjsdf", VersionType::Npm).unwrap();
        assert_is_semver(&semver, "1.2.3-beta.11+sha.0nsfgkjkjsdf", 1, Some(2), Some(3), &["beta", "11"], Some("sha.0nsfgkjkjsdf"));

        assert!(parse("v1.2.3", VersionType::Loose).is_err());
    }

    #[test]
    fn test_multiple_hyphens_fold_into_suffix() {
        let version = "1.2.3-beta.1-1.ab-c+sha.0nsfgkjkjs-df";
        let semver = parse(version, VersionType::Strict).unwrap();
        assert_is_semver(&semver, version, 1, Some(2), Some(3), &["beta", "1-1", "ab-c"], Some("sha.0nsfgkjkjs-df"));
    }

    #[test]
    fn test_value_is_trimmed_with_case_preserved() {
        let semver = parse("  1.2.3-BETA.11+sHa.0nSFGKjkjsdf  ", VersionType::Strict).unwrap();
        assert_eq!(semver.value(), "1.2.3-BETA.11+sHa.0nSFGKjkjsdf");
    }

    #[test]
    fn test_empty_segments_fail() {
        assert!(parse("1.0.0+", VersionType::Strict).is_err());
        assert!(parse("1.0.0-", VersionType::Strict).is_err());
        assert!(parse("1.0.0-alpha..1", VersionType::Loose).is_err());
        assert!(parse("1.0.0-+build", VersionType::Loose).is_err());
        assert!(parse("", VersionType::Loose).is_err());
    }

    #[test]
    fn test_non_numeric_components_fail() {
        let err = parse("a.b.c", VersionType::Loose).unwrap_err();
        assert!(err.to_string().contains("major version must be numeric"));
        assert!(parse("1.b.3", VersionType::Loose).is_err());
        assert!(parse("1.2.3.4", VersionType::Loose).is_err());
        assert!(parse("1.0.0beta", VersionType::Loose).is_err());
        assert!(parse("99999999999999999999.0.0", VersionType::Loose).is_err());
    }

    #[test]
    fn test_non_ascii_digits_fail() {
        for version in ["\u{0661}.2.3", "1.\u{0662}.3", "1.2.\u{0663}", "\u{FF11}.0.0"] {
            let err = parse(version, VersionType::Loose).unwrap_err();
            assert!(!err.to_string().contains("out of range"), "{}", err);
        }
        let err = parse("\u{0661}.2.3", VersionType::Loose).unwrap_err();
        assert!(err.to_string().contains("major version must be numeric"));
    }

    #[test]
    fn test_npm_wildcards_are_absent_components() {
        let semver = parse("3.1.x", VersionType::Npm).unwrap();
        assert_eq!(semver.minor(), Some(1));
        assert_eq!(semver.patch(), None);

        let semver = parse("3.*", VersionType::Npm).unwrap();
        assert_eq!(semver.minor(), None);

        let semver = parse("3.X.X", VersionType::Npm).unwrap();
        assert_eq!(semver.minor(), None);
        assert_eq!(semver.patch(), None);

        assert!(parse("3.x.5", VersionType::Npm).is_err());
        assert!(parse("3.1.x", VersionType::Loose).is_err());
    }

    #[test]
    fn test_is_valid() {
        let parser = VersionParser::new();
        assert!(parser.is_valid("1.2.3", VersionType::Strict));
        assert!(!parser.is_valid("1.2", VersionType::Strict));
        assert!(parser.is_valid("1.2", VersionType::Loose));
    }
}
