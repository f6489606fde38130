//! Construction-time errors.
//!
//! Every failure while building an [`Instance`](crate::models::Instance)
//! surfaces as a [`ConfigurationError`]. Candidate evaluation never fails;
//! invalid candidates are absorbed into the score (see
//! [`Evaluation`](crate::evaluation::Evaluation)).

use thiserror::Error;

use crate::validation::ValidationError;

/// An instance could not be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A required field was not supplied to the builder.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The structured integer stream ended early.
    #[error("instance data ended early: expected {expected}")]
    UnexpectedEnd {
        /// Description of the token that was expected next.
        expected: String,
    },

    /// Tokens remained after the last class block.
    #[error("instance data has {count} trailing token(s)")]
    TrailingTokens {
        /// Number of unread tokens.
        count: usize,
    },

    /// A token could not be parsed as an integer.
    #[error("token {index} (`{token}`) is not an integer")]
    InvalidToken {
        /// Zero-based token position.
        index: usize,
        /// The offending text.
        token: String,
    },

    /// A count, size, or limit was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeValue {
        /// Which quantity was negative.
        field: &'static str,
        /// The value read.
        value: i64,
    },

    /// An option indicator was neither 0 nor 1.
    #[error("class {class} option {option}: indicator must be 0 or 1, got {value}")]
    InvalidIndicator {
        /// Class index (0-based, in file order).
        class: usize,
        /// Option index.
        option: usize,
        /// The value read.
        value: i64,
    },

    /// Per-class car counts do not add up to the number of positions.
    #[error("sum of car counts ({actual}) does not equal position count ({expected})")]
    CarCountMismatch {
        /// Declared position count.
        expected: usize,
        /// Sum of per-class car counts.
        actual: usize,
    },

    /// One or more structural invariants failed.
    #[error("invalid instance: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
