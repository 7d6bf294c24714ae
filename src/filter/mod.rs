//! Filter algebra over series tags
//!
//! A [`Filter`] is an immutable boolean predicate over a series' key and tag
//! set. Filters are built through the arity-checked builders (see
//! [`builder`]) or decoded from their wire form, and reduced to a unique
//! canonical form with [`Filter::optimize`].
//!
//! # Wire and text form
//!
//! ```text
//! ["=", "host", "web01"]                 host tag equals web01
//! ["^", "role", "db"]                    role tag starts with db
//! ["~", "dc", "eu-.*"]                   dc tag matches the whole pattern
//! ["+", "shard"]                         shard tag is present
//! ["key", "cpu-load"]                    series key equals cpu-load
//! ["true"] / ["false"]                   match everything / nothing
//! ["and", f1, f2, ...]                   all terms match
//! ["or", f1, f2, ...]                    any term matches
//! ["not", f]                             term does not match
//! ```
//!
//! `Display` renders the same structure without quotes, e.g.
//! `[and, [=, host, web01], [not, [+, shard]]]`.
//!
//! # Canonical form
//!
//! ```text
//! [and, [and, a, b], c]                  -> [and, a, b, c]
//! [and, [=, host, a], [=, host, b]]      -> [false]
//! [and, [^, host, web], [^, host, web1]] -> [^, host, web1]
//! [and, [not, [or, a, b]], c]            -> [and, [not, a], [not, b], c]
//! [not, [not, f]]                        -> f
//! ```

pub mod builder;
pub mod error;
pub mod matcher;
pub mod operator;
pub mod optimizer;
pub mod ordering;
pub mod pattern;
pub mod wire;

pub use builder::{Operand, build};
pub use error::FilterError;
pub use operator::{Arity, Operator};
pub use pattern::Pattern;

use std::fmt;
use std::slice;

/// Boolean predicate over a series
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Matches every series
    True,
    /// Matches no series
    False,
    /// Series key equals the value
    MatchKey(String),
    /// Series carries the tag
    HasTag(String),
    /// Tag equals the value
    MatchTag { key: String, value: String },
    /// Tag value starts with the prefix
    StartsWith { key: String, prefix: String },
    /// Tag value matches the whole pattern
    Regex { key: String, pattern: Pattern },
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn operator(&self) -> Operator {
        match self {
            Filter::True => Operator::True,
            Filter::False => Operator::False,
            Filter::MatchKey(_) => Operator::MatchKey,
            Filter::HasTag(_) => Operator::HasTag,
            Filter::MatchTag { .. } => Operator::MatchTag,
            Filter::StartsWith { .. } => Operator::StartsWith,
            Filter::Regex { .. } => Operator::Regex,
            Filter::And(_) => Operator::And,
            Filter::Or(_) => Operator::Or,
            Filter::Not(_) => Operator::Not,
        }
    }

    /// First operand of a leaf: the tag key, or the sole value of a unary leaf
    pub fn first(&self) -> Option<&str> {
        match self {
            Filter::MatchKey(value) => Some(value.as_str()),
            Filter::HasTag(key)
            | Filter::MatchTag { key, .. }
            | Filter::StartsWith { key, .. }
            | Filter::Regex { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }

    /// Second operand of a binary leaf: value, prefix or pattern
    pub fn second(&self) -> Option<&str> {
        match self {
            Filter::MatchTag { value, .. } => Some(value.as_str()),
            Filter::StartsWith { prefix, .. } => Some(prefix.as_str()),
            Filter::Regex { pattern, .. } => Some(pattern.as_str()),
            _ => None,
        }
    }

    /// Child filters of a combinator; empty for leaves
    pub fn terms(&self) -> &[Filter] {
        match self {
            Filter::And(terms) | Filter::Or(terms) => terms,
            Filter::Not(inner) => slice::from_ref(&**inner),
            _ => &[],
        }
    }

    /// Operand of a negation
    pub fn inner(&self) -> Option<&Filter> {
        match self {
            Filter::Not(inner) => Some(&**inner),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Filter::And(_) | Filter::Or(_) | Filter::Not(_))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.operator())?;

        if self.is_leaf() {
            for operand in [self.first(), self.second()].into_iter().flatten() {
                write!(f, ", {operand}")?;
            }
        } else {
            for term in self.terms() {
                write!(f, ", {term}")?;
            }
        }

        f.write_str("]")
    }
}
