//! Error types for the MHRD front end.
//!
//! This module provides a unified error type [`MhrdError`]. Grammar failures
//! are reported as [`MhrdError::UnexpectedToken`]; the scanner itself never
//! fails. I/O variants only come from the reader and file entry points.

use thiserror::Error;

use crate::dsl::Token;

/// Result type alias using [`MhrdError`].
pub type Result<T> = std::result::Result<T, MhrdError>;

/// Unified error type for all MHRD front-end operations.
#[derive(Error, Debug)]
pub enum MhrdError {
    // ============ Parsing Errors ============
    /// A grammar rule required a token class or keyword that was absent
    #[error("line {line}, column {column}: found {found:?}, expected {expected:?}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: usize,
        column: usize,
    },

    /// A digit run that does not fit in a pin index
    #[error("line {line}, column {column}: pin index '{literal}' is out of range")]
    InvalidPinIndex {
        literal: String,
        line: usize,
        column: usize,
    },

    // ============ I/O Errors ============
    /// The character source failed while it was being scanned
    #[error("Failed to read netlist source: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Error reading a netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl MhrdError {
    /// Create an unexpected-token error located at `token`.
    pub fn unexpected(token: &Token, expected: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            found: token.text.clone(),
            expected: expected.into(),
            line: token.line,
            column: token.column,
        }
    }

    /// Create an out-of-range pin index error located at `token`.
    pub fn invalid_pin_index(token: &Token) -> Self {
        Self::InvalidPinIndex {
            literal: token.text.clone(),
            line: token.line,
            column: token.column,
        }
    }
}
