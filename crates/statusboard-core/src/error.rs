//! Error types for board rendering.

use thiserror::Error;

/// Errors that can occur while encoding or rebuilding a board.
#[derive(Debug, Error)]
pub enum BoardError {
    /// An encoded token would not fit into a button payload.
    #[error("callback data is {length} characters, limit is {limit}: {token}")]
    BudgetExceeded {
        token: String,
        length: usize,
        limit: usize,
    },

    /// Serialization of a token failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `/create` was sent without any names.
    #[error("you must send command in format /create name1 name2 nameN")]
    Usage,
}

/// Result type for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;
