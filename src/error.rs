//! Error types for candidate-set construction and simulation

use crate::puzzle::Pair;
use thiserror::Error;

/// Errors raised by the puzzle core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The range arguments cannot describe a sequence of values.
    #[error("Invalid range: start {start}, end {end}, step {step}")]
    InvalidRange { start: i64, end: i64, step: i64 },

    /// A value is large enough that a pair product would overflow.
    #[error("Value {0} is too large: pair products would overflow")]
    ValueOverflow(i64),

    /// The requested pair is not part of the seeded candidate set.
    #[error("Pair {0} is not in the candidate range")]
    PairOutOfRange(Pair),

    /// A dialogue statement could not be parsed.
    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    /// A classification code could not be parsed.
    #[error("Invalid classification: {0}")]
    InvalidClassification(String),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
