//! Error types for cellwire-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cellwire-core
///
/// All of these are synchronous usage errors raised for malformed arguments.
/// They are never retried and never produce a partial result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Value passed to the signed codec has a fractional part or is not finite
    #[error("expected an integer, got {0}")]
    NotAnInteger(f64),

    /// Value magnitude exceeds the exactly-representable integer range
    #[error("magnitude too large to encode exactly: {0}")]
    OutOfRange(f64),

    /// Signed numeral string could not be decoded
    #[error("invalid base-26 numeral: {0:?}")]
    InvalidNumeral(String),

    /// Row index was zero (row addresses are 1-based)
    #[error("row index must be at least 1")]
    InvalidRowIndex,

    /// Column index was zero (column addresses are 1-based)
    #[error("column index must be at least 1")]
    InvalidColumnIndex,

    /// Column label was empty, non-alphabetic, or too large
    #[error("invalid column label: {0:?}")]
    InvalidColumnLabel(String),

    /// Cell address string could not be parsed
    #[error("invalid cell address: {0:?}")]
    InvalidAddress(String),
}
