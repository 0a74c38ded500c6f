//! Error types shared across Ironforge crates.

use thiserror::Error;

/// Errors raised while parsing textual identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text does not name a known base material.
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// The text is not a `major.minor.patch` version.
    #[error("Invalid schema version: {0}")]
    InvalidVersion(String),
}

/// Result type alias for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
