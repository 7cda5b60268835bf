//! Type definitions for the style module.

use thiserror::Error;

/// Errors that can occur when encoding a [`StyleSpec`](super::StyleSpec).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// A style value is not a string or number, or a `class` value is not a
    /// string or a list of strings.
    #[error("Invalid value for `{key}`: {reason}")]
    InvalidStyleValue {
        /// The offending style key, as supplied by the caller.
        key: String,
        /// What the value was expected to be.
        reason: &'static str,
    },
}

/// Result type for style operations.
pub type StyleResult<T> = Result<T, StyleError>;
