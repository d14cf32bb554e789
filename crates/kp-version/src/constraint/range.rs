//! A single bound: one operator and one version

use std::fmt;

use super::RangeOperator;
use crate::{Semver, VersionError, VersionType};

/// One comparison against a bound version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    version: Semver,
    operator: RangeOperator,
}

impl Range {
    pub fn new(version: Semver, operator: RangeOperator) -> Self {
        Range { version, operator }
    }

    /// Build a range from a LOOSE version literal
    pub fn parse(version: &str, operator: RangeOperator) -> Result<Self, VersionError> {
        Ok(Range::new(Semver::parse(version, VersionType::Loose)?, operator))
    }

    pub fn version(&self) -> &Semver {
        &self.version
    }

    pub fn operator(&self) -> RangeOperator {
        self.operator
    }

    /// EQ uses equivalence, so build metadata is ignored but the suffix is not
    pub fn is_satisfied_by(&self, candidate: &Semver) -> bool {
        match self.operator {
            RangeOperator::Eq => candidate.is_equivalent_to(&self.version),
            RangeOperator::Lt => candidate.is_lower_than(&self.version),
            RangeOperator::Lte => candidate.is_lower_than_or_equal_to(&self.version),
            RangeOperator::Gt => candidate.is_greater_than(&self.version),
            RangeOperator::Gte => candidate.is_greater_than_or_equal_to(&self.version),
        }
    }

    /// Parse the candidate with the bound's grammar and check it
    pub fn is_satisfied_by_str(&self, candidate: &str) -> Result<bool, VersionError> {
        let candidate = Semver::parse(candidate, self.version.version_type())?;
        Ok(self.is_satisfied_by(&candidate))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}
