//! Ranges, the requirement lexer and requirement expressions

mod operator;
mod range;
mod requirement;
pub mod tokenizer;

pub use operator::RangeOperator;
pub use range::Range;
pub use requirement::{Requirement, RequirementExpr};
pub use tokenizer::{tokenize, Token, TokenType};
