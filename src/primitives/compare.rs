//! Comparison operators and match-selection modes for grid queries.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Elementwise comparison operator.
///
/// Comparisons follow IEEE 754 semantics, so a NaN operand only satisfies
/// [`CmpOp::Ne`].
///
/// # Examples
///
/// ```
/// use gridmask::primitives::CmpOp;
///
/// let op: CmpOp = ">=".parse().expect("valid operator");
/// assert!(op.apply(0.5, 0.5));
/// assert!(!CmpOp::Gt.apply(0.5, 0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl CmpOp {
    /// All operators, in declaration order.
    pub const ALL: [CmpOp; 6] = [
        CmpOp::Gt,
        CmpOp::Ge,
        CmpOp::Lt,
        CmpOp::Le,
        CmpOp::Eq,
        CmpOp::Ne,
    ];

    /// Evaluates `lhs <op> rhs`.
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
        }
    }

    /// Symbolic form of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CmpOp {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            ">" | "gt" => Ok(CmpOp::Gt),
            ">=" | "ge" => Ok(CmpOp::Ge),
            "<" | "lt" => Ok(CmpOp::Lt),
            "<=" | "le" => Ok(CmpOp::Le),
            "==" | "=" | "eq" => Ok(CmpOp::Eq),
            "!=" | "ne" => Ok(CmpOp::Ne),
            other => Err(GridError::invalid_argument(
                "op",
                other,
                "one of >, >=, <, <=, ==, !=",
            )),
        }
    }
}

/// Which end of the row-major match sequence a capped query keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMode {
    /// Keep the first `limit` matches.
    #[default]
    First,
    /// Keep the last `limit` matches, still in row-major order.
    Last,
}

impl SelectMode {
    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SelectMode::First => "first",
            SelectMode::Last => "last",
        }
    }
}

impl fmt::Display for SelectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectMode {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(SelectMode::First),
            "last" => Ok(SelectMode::Last),
            other => Err(GridError::invalid_argument("mode", other, "first or last")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_each_operator() {
        assert!(CmpOp::Gt.apply(0.6, 0.5));
        assert!(!CmpOp::Gt.apply(0.5, 0.5));
        assert!(CmpOp::Ge.apply(0.5, 0.5));
        assert!(CmpOp::Lt.apply(0.4, 0.5));
        assert!(CmpOp::Le.apply(0.5, 0.5));
        assert!(CmpOp::Eq.apply(1.0, 1.0));
        assert!(CmpOp::Ne.apply(1.0, 2.0));
    }

    #[test]
    fn test_nan_only_satisfies_ne() {
        for op in CmpOp::ALL {
            assert_eq!(op.apply(f64::NAN, 0.5), op == CmpOp::Ne, "op {op}");
        }
    }

    #[test]
    fn test_parse_symbols_and_words() {
        for op in CmpOp::ALL {
            assert_eq!(op.as_str().parse::<CmpOp>().expect("symbol parses"), op);
        }
        assert_eq!("GT".parse::<CmpOp>().expect("word parses"), CmpOp::Gt);
        assert_eq!(" le ".parse::<CmpOp>().expect("padded word parses"), CmpOp::Le);
    }

    #[test]
    fn test_parse_unknown_operator() {
        let err = "=>".parse::<CmpOp>().unwrap_err();
        assert!(matches!(err, GridError::InvalidArgument { .. }));
    }

    #[test]
    fn test_select_mode_default_and_parse() {
        assert_eq!(SelectMode::default(), SelectMode::First);
        assert_eq!("LAST".parse::<SelectMode>().expect("valid"), SelectMode::Last);
        assert!("middle".parse::<SelectMode>().is_err());
    }

    #[test]
    fn test_select_mode_serde_lowercase() {
        let json = serde_json::to_string(&SelectMode::Last).expect("serialize");
        assert_eq!(json, "\"last\"");
    }
}
