use super::error::FilterError;
use std::fmt;
use std::str::FromStr;

/// The closed set of filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Tag present on the series (`+`)
    HasTag,
    /// Tag equals a value (`=`)
    MatchTag,
    /// Tag value starts with a prefix (`^`)
    StartsWith,
    /// Conjunction of terms
    And,
    /// Matches nothing
    False,
    /// Series key equals a value
    MatchKey,
    /// Negation of a single term
    Not,
    /// Disjunction of terms
    Or,
    /// Matches everything
    True,
    /// Tag value matches a regular expression (`~`)
    Regex,
}

/// Number and kind of operands an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No operands (`true`, `false`)
    Nullary,
    /// A single string operand (`+`, `key`)
    UnaryValue,
    /// A single filter operand (`not`)
    UnaryFilter,
    /// Two string operands (`=`, `^`, `~`)
    Binary,
    /// One or more filter operands (`and`, `or`)
    Multi,
}

impl Arity {
    /// Human readable operand count used in arity errors
    pub fn describe(&self) -> &'static str {
        match self {
            Arity::Nullary => "no operands",
            Arity::UnaryValue | Arity::UnaryFilter => "exactly one operand",
            Arity::Binary => "exactly two operands",
            Arity::Multi => "at least one operand",
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Nullary => count == 0,
            Arity::UnaryValue | Arity::UnaryFilter => count == 1,
            Arity::Binary => count == 2,
            Arity::Multi => count >= 1,
        }
    }

    /// Whether operands are nested filters rather than strings
    pub fn takes_filters(&self) -> bool {
        matches!(self, Arity::UnaryFilter | Arity::Multi)
    }
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::HasTag,
        Operator::MatchTag,
        Operator::StartsWith,
        Operator::And,
        Operator::False,
        Operator::MatchKey,
        Operator::Not,
        Operator::Or,
        Operator::True,
        Operator::Regex,
    ];

    /// Stable wire tag of this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::HasTag => "+",
            Operator::MatchTag => "=",
            Operator::StartsWith => "^",
            Operator::And => "and",
            Operator::False => "false",
            Operator::MatchKey => "key",
            Operator::Not => "not",
            Operator::Or => "or",
            Operator::True => "true",
            Operator::Regex => "~",
        }
    }

    /// Position of the operator in the cross-kind ordering.
    ///
    /// The table follows the byte order of the wire tags, so sorting by rank
    /// and sorting by tag agree.
    pub fn rank(&self) -> u8 {
        match self {
            Operator::HasTag => 0,
            Operator::MatchTag => 1,
            Operator::StartsWith => 2,
            Operator::And => 3,
            Operator::False => 4,
            Operator::MatchKey => 5,
            Operator::Not => 6,
            Operator::Or => 7,
            Operator::True => 8,
            Operator::Regex => 9,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operator::True | Operator::False => Arity::Nullary,
            Operator::HasTag | Operator::MatchKey => Arity::UnaryValue,
            Operator::Not => Arity::UnaryFilter,
            Operator::MatchTag | Operator::StartsWith | Operator::Regex => Arity::Binary,
            Operator::And | Operator::Or => Arity::Multi,
        }
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| FilterError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
