use thiserror::Error;

/// Errors raised while building or decoding filters
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Unknown filter operator: '{0}'. Valid operators are: =, ^, ~, +, key, true, false, and, or, not")]
    UnknownOperator(String),

    #[error("Operator '{operator}' takes {expected}, got {actual}")]
    InvalidArity {
        operator: String,
        expected: &'static str,
        actual: usize,
    },

    #[error("Operator '{operator}' expects {expected} operands")]
    InvalidOperand {
        operator: String,
        expected: &'static str,
    },

    #[error("Invalid regular expression '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },
}
