//! Version precedence

use std::cmp::Ordering;

use crate::Semver;

/// Comparator implementing semantic version precedence.
///
/// Build metadata never takes part in precedence.
pub struct Comparator;

impl Comparator {
    /// Check if version1 > version2
    pub fn greater_than(version1: &Semver, version2: &Semver) -> bool {
        Self::compare(version1, version2) == Ordering::Greater
    }

    /// Check if version1 >= version2
    pub fn greater_than_or_equal_to(version1: &Semver, version2: &Semver) -> bool {
        Self::compare(version1, version2) != Ordering::Less
    }

    /// Check if version1 < version2
    pub fn less_than(version1: &Semver, version2: &Semver) -> bool {
        Self::compare(version1, version2) == Ordering::Less
    }

    /// Check if version1 <= version2
    pub fn less_than_or_equal_to(version1: &Semver, version2: &Semver) -> bool {
        Self::compare(version1, version2) != Ordering::Greater
    }

    /// Check if version1 and version2 have the same precedence
    pub fn equivalent_to(version1: &Semver, version2: &Semver) -> bool {
        Self::compare(version1, version2) == Ordering::Equal
    }

    /// Compare two versions by precedence.
    ///
    /// Major, minor and patch compare numerically, an absent component being lower than
    /// any present one (`1.2 < 1.2.0`). On a numeric tie a release ranks above its
    /// prereleases, and two prereleases compare identifier by identifier.
    pub fn compare(version1: &Semver, version2: &Semver) -> Ordering {
        version1
            .major()
            .cmp(&version2.major())
            .then_with(|| version1.minor().cmp(&version2.minor()))
            .then_with(|| version1.patch().cmp(&version2.patch()))
            .then_with(|| Self::compare_suffix(version1.suffix_tokens(), version2.suffix_tokens()))
    }

    /// Compare two prerelease identifier lists. An empty list means "release".
    pub fn compare_suffix(suffix1: &[String], suffix2: &[String]) -> Ordering {
        match (suffix1.is_empty(), suffix2.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }

        for (a, b) in suffix1.iter().zip(suffix2) {
            match Self::compare_identifier(a, b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }

        // All shared identifiers are equal: the longer list wins
        suffix1.len().cmp(&suffix2.len())
    }

    /// Numeric identifiers compare numerically and rank below alphanumeric ones;
    /// alphanumeric identifiers compare in ASCII order.
    pub fn compare_identifier(a: &str, b: &str) -> Ordering {
        match (is_numeric(a), is_numeric(b)) {
            (true, true) => compare_numeric(a, b),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a.cmp(b),
        }
    }
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

// Compares digit strings of any length without overflowing.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VersionType;

    fn strict(version: &str) -> Semver {
        Semver::parse(version, VersionType::Strict).unwrap()
    }

    fn loose(version: &str) -> Semver {
        Semver::parse(version, VersionType::Loose).unwrap()
    }

    #[test]
    fn test_prerelease_chain() {
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];

        for pair in chain.windows(2) {
            let (lower, higher) = (strict(pair[0]), strict(pair[1]));
            assert!(Comparator::less_than(&lower, &higher), "{} < {}", pair[0], pair[1]);
            assert!(Comparator::greater_than(&higher, &lower), "{} > {}", pair[1], pair[0]);
            assert!(!Comparator::greater_than(&lower, &higher));
            assert!(!Comparator::less_than(&higher, &lower));
        }
    }

    #[test]
    fn test_equal_versions() {
        for version in ["1.0.0", "1.0.0-alpha.12", "1.0.0-alpha.12.ab-c"] {
            let v = strict(version);
            assert!(!Comparator::greater_than(&v, &v));
            assert!(!Comparator::less_than(&v, &v));
            assert!(Comparator::equivalent_to(&v, &v));
            assert!(Comparator::greater_than_or_equal_to(&v, &v));
            assert!(Comparator::less_than_or_equal_to(&v, &v));
        }
        assert!(!Comparator::greater_than(&strict("0.0.1"), &strict("5.0.0")));
    }

    #[test]
    fn test_missing_components() {
        assert!(Comparator::greater_than(&loose("1.2.3"), &loose("1.2")));
        assert!(Comparator::greater_than(&loose("1.3"), &loose("1.2.3")));
        assert!(Comparator::greater_than(&loose("1.2.3"), &loose("1")));
        assert!(Comparator::greater_than(&loose("2"), &loose("1.2.3")));
        assert!(Comparator::less_than(&loose("1.2"), &loose("1.2.0")));
    }

    #[test]
    fn test_build_is_ignored() {
        let v1 = strict("1.24.1-rc3+903423.234");
        let v2 = strict("1.24.1-rc3+903423.235");
        assert_eq!(Comparator::compare(&v1, &v2), Ordering::Equal);
    }

    const MIXED: [&str; 16] = [
        "0.9.9",
        "1",
        "1-beta",
        "1.2",
        "1.2-rc.1",
        "1.2.0-1",
        "1.2.0-007",
        "1.2.0-7",
        "1.2.0-alpha",
        "1.2.0-alpha+b1",
        "1.2.0-alpha.1",
        "1.2.0",
        "1.2.0+b1",
        "1.2.0+b2",
        "1.10",
        "2",
    ];

    #[test]
    fn test_precedence_is_a_total_order() {
        let versions: Vec<Semver> = MIXED.iter().map(|v| loose(v)).collect();

        for a in &versions {
            for b in &versions {
                let outcomes = [
                    Comparator::less_than(a, b),
                    Comparator::equivalent_to(a, b),
                    Comparator::greater_than(a, b),
                ];
                assert_eq!(outcomes.iter().filter(|&&o| o).count(), 1, "{} vs {}", a, b);
                assert_eq!(Comparator::compare(a, b), Comparator::compare(b, a).reverse(), "{} vs {}", a, b);
                assert_eq!(a.cmp(b), b.cmp(a).reverse(), "{} vs {}", a, b);
                assert_eq!(a.cmp(b) == Ordering::Equal, a == b, "{} vs {}", a, b);
            }
        }

        for a in &versions {
            for b in &versions {
                for c in &versions {
                    if Comparator::less_than_or_equal_to(a, b) && Comparator::less_than_or_equal_to(b, c) {
                        assert!(Comparator::less_than_or_equal_to(a, c), "{} <= {} <= {}", a, b, c);
                    }
                    if a <= b && b <= c {
                        assert!(a <= c, "{} <= {} <= {} by Ord", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_mixed_versions_sort_by_precedence() {
        let mut versions: Vec<Semver> = MIXED.iter().map(|v| loose(v)).collect();
        versions.sort();
        let sorted: Vec<&str> = versions.iter().map(Semver::value).collect();
        assert_eq!(
            sorted,
            [
                "0.9.9",
                "1-beta",
                "1",
                "1.2-rc.1",
                "1.2",
                "1.2.0-1",
                "1.2.0-007",
                "1.2.0-7",
                "1.2.0-alpha",
                "1.2.0-alpha+b1",
                "1.2.0-alpha.1",
                "1.2.0",
                "1.2.0+b1",
                "1.2.0+b2",
                "1.10",
                "2",
            ]
        );
    }

    #[test]
    fn test_compare_identifier() {
        assert_eq!(Comparator::compare_identifier("2", "11"), Ordering::Less);
        assert_eq!(Comparator::compare_identifier("11", "alpha"), Ordering::Less);
        assert_eq!(Comparator::compare_identifier("rc2", "rc1"), Ordering::Greater);
        assert_eq!(Comparator::compare_identifier("1-1", "2"), Ordering::Greater);
        assert_eq!(Comparator::compare_identifier("007", "7"), Ordering::Equal);
        assert_eq!(
            Comparator::compare_identifier("123456789012345678901234567890", "99"),
            Ordering::Greater
        );
    }
}
