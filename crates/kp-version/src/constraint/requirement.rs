//! Requirement parsing and evaluation
//!
//! A requirement compiles to an OR-of-ANDs tree of [`Range`] bounds. Partial versions,
//! tilde, caret and hyphen ranges are rewritten into plain bounds at parse time, so
//! evaluation is a straight walk over the tree.

use std::fmt;

use super::tokenizer::{tokenize, Token, TokenType};
use super::{Range, RangeOperator};
use crate::{Semver, VersionError, VersionType};

/// Deepest group nesting a requirement may use
const MAX_GROUP_DEPTH: usize = 64;

/// Compiled requirement tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementExpr {
    /// Matches every version
    Wildcard,
    Bound(Range),
    And(Vec<RequirementExpr>),
    Or(Vec<RequirementExpr>),
}

impl RequirementExpr {
    fn bound(version: Semver, operator: RangeOperator) -> Self {
        RequirementExpr::Bound(Range::new(version, operator))
    }

    fn and(mut children: Vec<RequirementExpr>) -> Self {
        if children.len() == 1 {
            return children.remove(0);
        }
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                RequirementExpr::And(nested) => flat.extend(nested),
                other => flat.push(other),
            }
        }
        RequirementExpr::And(flat)
    }

    fn or(mut children: Vec<RequirementExpr>) -> Self {
        if children.len() == 1 {
            return children.remove(0);
        }
        RequirementExpr::Or(children)
    }

    /// Evaluate against a candidate. Some alternative of the OR-of-ANDs expansion must
    /// hold all of its bounds and, for a prerelease candidate, carry a bound that opts in
    /// to that prerelease.
    pub fn is_satisfied_by(&self, candidate: &Semver) -> bool {
        let (holds, admitted) = self.evaluate(candidate);
        if candidate.suffix_tokens().is_empty() {
            holds
        } else {
            admitted
        }
    }

    // First flag: some alternative holds every bound. Second flag: some alternative
    // holds every bound and admits the candidate's prerelease. Nested groups are
    // combined as if distributed, so grouping never changes the result.
    fn evaluate(&self, candidate: &Semver) -> (bool, bool) {
        match self {
            RequirementExpr::Wildcard => (true, true),
            RequirementExpr::Bound(range) => {
                let holds = range.is_satisfied_by(candidate);
                (holds, holds && admits_prerelease(range, candidate))
            }
            RequirementExpr::And(children) => {
                let results: Vec<(bool, bool)> = children.iter().map(|c| c.evaluate(candidate)).collect();
                let holds = results.iter().all(|&(holds, _)| holds);
                (holds, holds && results.iter().any(|&(_, admitted)| admitted))
            }
            RequirementExpr::Or(children) => children
                .iter()
                .map(|c| c.evaluate(candidate))
                .fold((false, false), |(holds, admitted), (h, a)| (holds || h, admitted || a)),
        }
    }
}

// A prerelease only matches a bound that has a prerelease on the same major.minor.patch
fn admits_prerelease(range: &Range, candidate: &Semver) -> bool {
    let bound = range.version();
    !bound.suffix_tokens().is_empty()
        && bound.major() == candidate.major()
        && bound.minor() == candidate.minor()
        && bound.patch() == candidate.patch()
}

impl fmt::Display for RequirementExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementExpr::Wildcard => write!(f, "*"),
            RequirementExpr::Bound(range) => write!(f, "{}", range),
            RequirementExpr::And(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    match child {
                        RequirementExpr::Or(_) => write!(f, "({})", child)?,
                        _ => write!(f, "{}", child)?,
                    }
                }
                Ok(())
            }
            RequirementExpr::Or(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " || ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
        }
    }
}

/// A parsed requirement, reusable for any number of evaluations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    source: String,
    version_type: VersionType,
    expr: RequirementExpr,
}

impl Requirement {
    /// Parse a requirement for the given grammar.
    ///
    /// NPM and COCOAPODS understand operators; STRICT, LOOSE and IVY accept a single
    /// version literal, which must match exactly. An empty string or `*` matches everything.
    pub fn parse(requirement: &str, version_type: VersionType) -> Result<Self, VersionError> {
        let trimmed = requirement.trim();

        if version_type == VersionType::Ivy && is_dynamic_revision(trimmed) {
            return Err(VersionError::UnsupportedDynamicRevision(trimmed.to_string()));
        }

        let tokens = tokenize(trimmed, version_type)?;
        let expr = if tokens.is_empty() {
            RequirementExpr::Wildcard
        } else {
            Parser {
                requirement: trimmed,
                version_type,
                tokens,
                position: 0,
                depth: 0,
            }
            .parse()?
        };

        log::debug!("Compiled requirement \"{}\" ({}) to {}", trimmed, version_type, expr);

        Ok(Requirement {
            source: requirement.to_string(),
            version_type,
            expr,
        })
    }

    /// A requirement matching every version
    pub fn any(version_type: VersionType) -> Self {
        Requirement {
            source: "*".to_string(),
            version_type,
            expr: RequirementExpr::Wildcard,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn version_type(&self) -> VersionType {
        self.version_type
    }

    pub fn expression(&self) -> &RequirementExpr {
        &self.expr
    }

    pub fn is_satisfied_by(&self, candidate: &Semver) -> bool {
        self.expr.is_satisfied_by(candidate)
    }

    /// Parse the candidate with this requirement's grammar and evaluate it
    pub fn is_satisfied_by_str(&self, candidate: &str) -> Result<bool, VersionError> {
        Ok(self.is_satisfied_by(&Semver::parse(candidate, self.version_type)?))
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

// Ivy's `4.2.+`, `[1.0,2.0[`, `]1.0,)` and `latest.integration` forms
fn is_dynamic_revision(requirement: &str) -> bool {
    requirement.ends_with('+')
        || requirement.starts_with(['[', ']', '('])
        || requirement.contains(',')
        || requirement.starts_with("latest.")
}

fn is_wildcard(literal: &str, version_type: VersionType) -> bool {
    literal == "*" || (version_type == VersionType::Npm && matches!(literal, "x" | "X"))
}

fn is_full(version: &Semver) -> bool {
    version.minor().is_some() && version.patch().is_some()
}

/// The smallest version above every version `version` stands for: `1` -> `2.0.0`,
/// `1.2` -> `1.3.0`. Full versions bump their patch.
fn next_after(version: &Semver) -> Semver {
    match (version.minor(), version.patch()) {
        (None, _) => version.next_major(),
        (Some(_), None) => version.next_minor(),
        (Some(_), Some(_)) => version.next_patch(),
    }
}

struct Parser<'a> {
    requirement: &'a str,
    version_type: VersionType,
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

/// Operators that take a single version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unary {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
    Tilde,
    Caret,
}

impl Unary {
    fn from_token(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Eq => Some(Unary::Eq),
            TokenType::Lt => Some(Unary::Lt),
            TokenType::Lte => Some(Unary::Lte),
            TokenType::Gt => Some(Unary::Gt),
            TokenType::Gte => Some(Unary::Gte),
            TokenType::Tilde => Some(Unary::Tilde),
            TokenType::Caret => Some(Unary::Caret),
            TokenType::Hyphen
            | TokenType::Or
            | TokenType::And
            | TokenType::Opening
            | TokenType::Closing
            | TokenType::Version => None,
        }
    }
}

impl Parser<'_> {
    fn parse(mut self) -> Result<RequirementExpr, VersionError> {
        let expr = self.parse_or()?;
        if let Some(token) = self.peek() {
            let reason = match token.token_type {
                TokenType::Closing => "unbalanced ')'".to_string(),
                _ => format!("unexpected '{}'", token.value),
            };
            return Err(self.error(reason));
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn eat(&mut self, token_type: TokenType) -> bool {
        if self.peek().is_some_and(|t| t.token_type == token_type) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, reason: impl Into<String>) -> VersionError {
        VersionError::invalid_requirement(self.requirement, reason)
    }

    fn parse_or(&mut self) -> Result<RequirementExpr, VersionError> {
        let mut branches = vec![self.parse_and()?];
        while self.eat(TokenType::Or) {
            branches.push(self.parse_and()?);
        }
        Ok(RequirementExpr::or(branches))
    }

    fn parse_and(&mut self) -> Result<RequirementExpr, VersionError> {
        let mut terms = vec![self.parse_term()?];
        while self.eat(TokenType::And) {
            terms.push(self.parse_term()?);
        }
        Ok(RequirementExpr::and(terms))
    }

    fn parse_term(&mut self) -> Result<RequirementExpr, VersionError> {
        let Some(token) = self.next() else {
            return Err(self.error("expected a version at end of input"));
        };

        match token.token_type {
            TokenType::Opening => {
                self.depth += 1;
                if self.depth > MAX_GROUP_DEPTH {
                    return Err(self.error(format!("groups nested deeper than {}", MAX_GROUP_DEPTH)));
                }
                let expr = self.parse_or()?;
                if !self.eat(TokenType::Closing) {
                    return Err(self.error("unterminated group, expected ')'"));
                }
                self.depth -= 1;
                Ok(expr)
            }
            TokenType::Version => {
                if self.eat(TokenType::Hyphen) {
                    let upper = self.expect_version("-")?;
                    return self.hyphen(&token.value, &upper);
                }
                if is_wildcard(&token.value, self.version_type) {
                    return Ok(RequirementExpr::Wildcard);
                }
                let version = self.version(&token.value)?;
                Ok(self.unary(Unary::Eq, version))
            }
            other => {
                let Some(op) = Unary::from_token(other) else {
                    return Err(self.error(format!("unexpected '{}'", token.value)));
                };
                let literal = self.expect_version(&token.value)?;
                if is_wildcard(&literal, self.version_type) {
                    return Ok(RequirementExpr::Wildcard);
                }
                let version = self.version(&literal)?;
                Ok(self.unary(op, version))
            }
        }
    }

    fn expect_version(&mut self, after: &str) -> Result<String, VersionError> {
        match self.next() {
            Some(token) if token.token_type == TokenType::Version => Ok(token.value),
            _ => Err(self.error(format!("expected a version after '{}'", after))),
        }
    }

    fn version(&self, literal: &str) -> Result<Semver, VersionError> {
        Semver::parse(literal, self.version_type)
    }

    fn hyphen(&self, lower: &str, upper: &str) -> Result<RequirementExpr, VersionError> {
        let mut bounds = Vec::with_capacity(2);
        if !is_wildcard(lower, self.version_type) {
            let lower = self.version(lower)?;
            bounds.push(RequirementExpr::bound(lower.to_strict(), RangeOperator::Gte));
        }
        if !is_wildcard(upper, self.version_type) {
            let upper = self.version(upper)?;
            bounds.push(if is_full(&upper) {
                RequirementExpr::bound(upper, RangeOperator::Lte)
            } else {
                RequirementExpr::bound(next_after(&upper), RangeOperator::Lt)
            });
        }

        Ok(match bounds.len() {
            0 => RequirementExpr::Wildcard,
            _ => RequirementExpr::and(bounds),
        })
    }

    /// Rewrite one operator and its version into plain bounds
    fn unary(&self, op: Unary, version: Semver) -> RequirementExpr {
        use RangeOperator::*;

        if !matches!(self.version_type, VersionType::Npm | VersionType::Cocoapods) {
            return RequirementExpr::bound(version, Eq);
        }

        let floor = version.to_strict();
        let full = is_full(&version);

        match op {
            Unary::Eq if full => RequirementExpr::bound(version, Eq),
            Unary::Eq => RequirementExpr::and(vec![
                RequirementExpr::bound(floor, Gte),
                RequirementExpr::bound(next_after(&version), Lt),
            ]),
            Unary::Gt if full => RequirementExpr::bound(version, Gt),
            Unary::Gt => RequirementExpr::bound(next_after(&version), Gte),
            Unary::Gte => RequirementExpr::bound(floor, Gte),
            Unary::Lt => RequirementExpr::bound(floor, Lt),
            Unary::Lte if full => RequirementExpr::bound(version, Lte),
            Unary::Lte => RequirementExpr::bound(next_after(&version), Lt),
            Unary::Tilde => {
                let upper = match (self.version_type, version.minor(), version.patch()) {
                    (VersionType::Cocoapods, Some(_), Some(_)) => Some(floor.next_minor()),
                    (VersionType::Cocoapods, Some(_), None) => Some(floor.next_major()),
                    (VersionType::Cocoapods, None, _) => None,
                    (_, Some(_), _) => Some(floor.next_minor()),
                    (_, None, _) => Some(floor.next_major()),
                };
                let lower = RequirementExpr::bound(floor, Gte);
                match upper {
                    Some(upper) => RequirementExpr::and(vec![lower, RequirementExpr::bound(upper, Lt)]),
                    None => lower,
                }
            }
            Unary::Caret => {
                // Bump the left-most non-zero component among those given
                let upper = match (version.major(), version.minor(), version.patch()) {
                    (major, _, _) if major > 0 => floor.next_major(),
                    (_, Some(minor), _) if minor > 0 => floor.next_minor(),
                    (_, Some(_), Some(_)) => floor.next_patch(),
                    (_, Some(_), None) => floor.next_minor(),
                    (_, None, _) => floor.next_major(),
                };
                RequirementExpr::and(vec![
                    RequirementExpr::bound(floor, Gte),
                    RequirementExpr::bound(upper, Lt),
                ])
            }
        }
    }
}
