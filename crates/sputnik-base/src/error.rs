//! Unified error types for sputnik.

use thiserror::Error;

/// The main error type for sputnik operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The DIMACS header line is missing or malformed.
    #[error("malformed DIMACS header: {0}")]
    BadHeader(String),

    /// A token that should have been a literal could not be parsed.
    #[error("invalid literal token {token:?} on line {line}")]
    BadToken { token: String, line: usize },

    /// A clause was still open when the input ended.
    #[error("clause not terminated by 0 at end of input")]
    UnterminatedClause,

    /// A literal references a variable outside the declared range.
    #[error("variable {var} outside declared range 1..={num_vars}")]
    VariableOutOfRange { var: i64, num_vars: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal solver error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
