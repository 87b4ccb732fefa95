//! Error types for the board core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for board operations
pub type BoardResult<T> = std::result::Result<T, BoardError>;

/// Board-level errors.
///
/// None of these are fatal: a failed operation leaves the prior snapshot in place.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    /// Move/reorder/toggle target id is absent
    #[error("not found: {id}")]
    NotFound { id: String },

    /// Task operation against a missing section
    #[error("section not found: {id}")]
    SectionNotFound { id: String },

    /// Configuration could not be parsed or failed validation
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Logging subscriber could not be installed
    #[error("logging init failed: {message}")]
    Logging { message: String },
}

impl BoardError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    pub fn section_not_found(id: impl ToString) -> Self {
        Self::SectionNotFound { id: id.to_string() }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// A vanished target during reorder is a benign race with the user's own edits
    pub fn is_benign_race(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::SectionNotFound { .. })
    }
}
