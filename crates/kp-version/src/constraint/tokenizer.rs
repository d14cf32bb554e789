//! Requirement lexer

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::{VersionError, VersionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Tilde,
    Caret,
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
    Hyphen,
    Or,
    And,
    Opening,
    Closing,
    Version,
}

impl TokenType {
    /// Whether the grammar recognizes this token in requirements.
    /// VERSION literals are legal everywhere.
    pub fn supports(&self, version_type: VersionType) -> bool {
        use VersionType::*;

        match self {
            TokenType::Version => true,
            TokenType::Tilde | TokenType::Eq | TokenType::Lt | TokenType::Lte | TokenType::Gt | TokenType::Gte | TokenType::And => {
                matches!(version_type, Npm | Cocoapods)
            }
            TokenType::Caret | TokenType::Hyphen | TokenType::Or | TokenType::Opening | TokenType::Closing => {
                matches!(version_type, Npm)
            }
        }
    }

    /// Operators that prefix a single version
    pub fn is_unary(&self) -> bool {
        matches!(
            self,
            TokenType::Tilde | TokenType::Caret | TokenType::Eq | TokenType::Lt | TokenType::Lte | TokenType::Gt | TokenType::Gte
        )
    }

    fn starts_operand(&self) -> bool {
        self.is_unary() || matches!(self, TokenType::Opening | TokenType::Version)
    }

    fn ends_operand(&self) -> bool {
        matches!(self, TokenType::Version | TokenType::Closing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    /// Literal text for VERSION tokens, the operator as written otherwise
    pub value: String,
}

impl Token {
    fn new(token_type: TokenType, value: impl Into<String>) -> Self {
        Token {
            token_type,
            value: value.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::Version => write!(f, "VERSION({})", self.value),
            TokenType::And => write!(f, "AND"),
            _ => write!(f, "{:?}", self.token_type),
        }
    }
}

struct Lexer<'a> {
    requirement: &'a str,
    version_type: VersionType,
    tokens: Vec<Token>,
    literal: String,
}

impl Lexer<'_> {
    fn flush(&mut self) {
        if !self.literal.is_empty() {
            let literal = std::mem::take(&mut self.literal);
            self.emit(Token::new(TokenType::Version, literal));
        }
    }

    fn emit(&mut self, token: Token) {
        let follows_operand = self.tokens.last().is_some_and(|last| last.token_type.ends_operand());
        if follows_operand && token.token_type.starts_operand() && TokenType::And.supports(self.version_type) {
            self.tokens.push(Token::new(TokenType::And, " "));
        }
        self.tokens.push(token);
    }

    fn special(&self, c: char, chars: &mut Peekable<Chars>) -> Option<(TokenType, &'static str)> {
        let special = match c {
            '~' if self.version_type == VersionType::Cocoapods && chars.next_if_eq(&'>').is_some() => (TokenType::Tilde, "~>"),
            '~' => (TokenType::Tilde, "~"),
            '^' => (TokenType::Caret, "^"),
            '=' => (TokenType::Eq, "="),
            '<' if chars.next_if_eq(&'=').is_some() => (TokenType::Lte, "<="),
            '<' => (TokenType::Lt, "<"),
            '>' if chars.next_if_eq(&'=').is_some() => (TokenType::Gte, ">="),
            '>' => (TokenType::Gt, ">"),
            '|' if chars.next_if_eq(&'|').is_some() => (TokenType::Or, "||"),
            '|' => (TokenType::Or, "|"),
            '(' => (TokenType::Opening, "("),
            ')' => (TokenType::Closing, ")"),
            // A hyphen glued to a literal belongs to its suffix
            '-' if self.literal.is_empty() => (TokenType::Hyphen, "-"),
            _ => return None,
        };
        Some(special)
    }
}

/// Split a requirement into tokens for the given grammar.
///
/// Whitespace separates literals; adjacent operands get an implicit AND
/// (`>1.2.1 <1.2.8`, `1.2 <1.2.8`) when the grammar supports conjunction.
pub fn tokenize(requirement: &str, version_type: VersionType) -> Result<Vec<Token>, VersionError> {
    let mut lexer = Lexer {
        requirement,
        version_type,
        tokens: Vec::new(),
        literal: String::new(),
    };
    let mut chars = requirement.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            lexer.flush();
            continue;
        }

        match lexer.special(c, &mut chars) {
            Some((token_type, lexeme)) => {
                if !token_type.supports(version_type) {
                    return Err(VersionError::UnsupportedToken {
                        token: lexeme.to_string(),
                        version_type,
                        requirement: lexer.requirement.to_string(),
                    });
                }
                lexer.flush();
                lexer.emit(Token::new(token_type, lexeme));
            }
            None => lexer.literal.push(c),
        }
    }
    lexer.flush();

    log::trace!(
        "Tokenized \"{}\" ({}): [{}]",
        requirement,
        version_type,
        lexer.tokens.iter().map(Token::to_string).collect::<Vec<_>>().join(", ")
    );

    Ok(lexer.tokens)
}
