//! Error types for grid construction, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (G001-G003) for documentation lookup:
//!
//! - G001: `EmptyStructure` (Structure text has no rows or no columns)
//! - G002: `RaggedStructure` (Structure rows have unequal widths)
//! - G003: `Io` (Structure file could not be read)
//!
//! Malformed structure is the only recoverable error surface in the crate:
//! an unsatisfiable puzzle is a normal solver outcome (`None`), not an
//! error, and broken internal invariants are debug assertions.

use std::io;

/// Custom error type for structure parsing
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("empty grid structure")]
    EmptyStructure,

    #[error("ragged grid structure: row {row} has {found} cells, expected {expected}")]
    RaggedStructure {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to read grid structure: {0}")]
    Io(#[from] io::Error),
}

impl GridError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GridError::EmptyStructure => "G001",
            GridError::RaggedStructure { .. } => "G002",
            GridError::Io(_) => "G003",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GridError::EmptyStructure => {
                Some("The structure file must contain at least one row of cells ('_' = open, '#' = blocked)")
            }
            GridError::RaggedStructure { .. } => {
                Some("Every row of the structure must have the same number of characters; pad short rows with '#'")
            }
            GridError::Io(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(
    base_msg: &str,
    code: &str,
    help: Option<&str>,
) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
