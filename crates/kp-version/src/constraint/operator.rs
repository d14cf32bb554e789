//! Comparison operators of a single range bound

use std::fmt;

/// Comparison operator of a [`Range`](super::Range)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeOperator {
    /// Equivalent (=)
    Eq,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
}

impl RangeOperator {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "=" => Some(RangeOperator::Eq),
            "<" => Some(RangeOperator::Lt),
            "<=" => Some(RangeOperator::Lte),
            ">" => Some(RangeOperator::Gt),
            ">=" => Some(RangeOperator::Gte),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeOperator::Eq => "=",
            RangeOperator::Lt => "<",
            RangeOperator::Lte => "<=",
            RangeOperator::Gt => ">",
            RangeOperator::Gte => ">=",
        }
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
