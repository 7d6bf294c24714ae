//! Arity-checked construction of filters.
//!
//! [`build`] is the generic entry used by the wire decoder: it validates the
//! operand count and kind for an operator before constructing the node. The
//! typed constructors on [`Filter`] cover the same ground for callers that
//! already hold well-typed operands. Nothing here optimizes.

use super::error::FilterError;
use super::operator::Operator;
use super::Filter;
use super::pattern::Pattern;

/// A single operand handed to [`build`]
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(String),
    Filter(Filter),
}

impl From<Filter> for Operand {
    fn from(filter: Filter) -> Self {
        Operand::Filter(filter)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Value(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Value(value)
    }
}

/// Build a filter node for `operator` from its operands
pub fn build(operator: Operator, operands: Vec<Operand>) -> Result<Filter, FilterError> {
    let arity = operator.arity();

    if !arity.accepts(operands.len()) {
        return Err(arity_error(operator, operands.len()));
    }

    match operator {
        Operator::True => Ok(Filter::True),
        Operator::False => Ok(Filter::False),
        Operator::And => Ok(Filter::And(filter_operands(operator, operands)?)),
        Operator::Or => Ok(Filter::Or(filter_operands(operator, operands)?)),
        Operator::Not => {
            let [term] = exactly::<_, 1>(operator, filter_operands(operator, operands)?)?;
            Ok(Filter::not(term))
        }
        Operator::HasTag => {
            let [key] = exactly::<_, 1>(operator, value_operands(operator, operands)?)?;
            Ok(Filter::has_tag(key))
        }
        Operator::MatchKey => {
            let [value] = exactly::<_, 1>(operator, value_operands(operator, operands)?)?;
            Ok(Filter::match_key(value))
        }
        Operator::MatchTag => {
            let [key, value] = exactly::<_, 2>(operator, value_operands(operator, operands)?)?;
            Ok(Filter::match_tag(key, value))
        }
        Operator::StartsWith => {
            let [key, prefix] = exactly::<_, 2>(operator, value_operands(operator, operands)?)?;
            Ok(Filter::starts_with(key, prefix))
        }
        Operator::Regex => {
            let [key, pattern] = exactly::<_, 2>(operator, value_operands(operator, operands)?)?;
            Filter::regex(key, pattern)
        }
    }
}

fn arity_error(operator: Operator, actual: usize) -> FilterError {
    FilterError::InvalidArity {
        operator: operator.as_str().to_string(),
        expected: operator.arity().describe(),
        actual,
    }
}

fn exactly<T, const N: usize>(operator: Operator, items: Vec<T>) -> Result<[T; N], FilterError> {
    <[T; N]>::try_from(items).map_err(|items| arity_error(operator, items.len()))
}

fn filter_operands(operator: Operator, operands: Vec<Operand>) -> Result<Vec<Filter>, FilterError> {
    operands
        .into_iter()
        .map(|operand| match operand {
            Operand::Filter(filter) => Ok(filter),
            Operand::Value(_) => Err(FilterError::InvalidOperand {
                operator: operator.as_str().to_string(),
                expected: "filter",
            }),
        })
        .collect()
}

fn value_operands(operator: Operator, operands: Vec<Operand>) -> Result<Vec<String>, FilterError> {
    operands
        .into_iter()
        .map(|operand| match operand {
            Operand::Value(value) => Ok(value),
            Operand::Filter(_) => Err(FilterError::InvalidOperand {
                operator: operator.as_str().to_string(),
                expected: "string",
            }),
        })
        .collect()
}

impl Filter {
    /// Conjunction of one or more terms, kept in caller order
    pub fn and(terms: Vec<Filter>) -> Result<Filter, FilterError> {
        build(Operator::And, terms.into_iter().map(Operand::Filter).collect())
    }

    /// Disjunction of one or more terms, kept in caller order
    pub fn or(terms: Vec<Filter>) -> Result<Filter, FilterError> {
        build(Operator::Or, terms.into_iter().map(Operand::Filter).collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(term: Filter) -> Filter {
        Filter::Not(Box::new(term))
    }

    pub fn match_tag(key: impl Into<String>, value: impl Into<String>) -> Filter {
        Filter::MatchTag {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn starts_with(key: impl Into<String>, prefix: impl Into<String>) -> Filter {
        Filter::StartsWith {
            key: key.into(),
            prefix: prefix.into(),
        }
    }

    /// Regex leaf; the pattern must compile
    pub fn regex(key: impl Into<String>, pattern: impl Into<String>) -> Result<Filter, FilterError> {
        Ok(Filter::Regex {
            key: key.into(),
            pattern: Pattern::new(pattern)?,
        })
    }

    pub fn has_tag(key: impl Into<String>) -> Filter {
        Filter::HasTag(key.into())
    }

    pub fn match_key(value: impl Into<String>) -> Filter {
        Filter::MatchKey(value.into())
    }
}
