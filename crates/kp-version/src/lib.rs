//! Semantic version parsing, ordering and requirement matching
//!
//! Versions are read under one of several grammars ([`VersionType`]): strict semver,
//! a loose variant with optional minor/patch, and the npm, CocoaPods and Ivy dialects.
//! Requirements such as `>1.2.1 <1.2.8 || ^2.0` compile once into a [`Requirement`]
//! and can then be evaluated against any number of versions.

mod comparator;
pub mod constraint;
mod error;
mod semver;
mod version;
mod version_parser;
mod version_type;

pub use comparator::Comparator;
pub use constraint::{Range, RangeOperator, Requirement, RequirementExpr};
pub use error::{ErrorKind, VersionError};
pub use semver::Semver;
pub use version::{compare, diff, parse, rsort, satisfied_by, satisfies, sort, validate, Version};
pub use version_parser::VersionParser;
pub use version_type::{VersionDiff, VersionType};
