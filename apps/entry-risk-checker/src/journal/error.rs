//! Journal errors.

use thiserror::Error;

/// Errors raised while maintaining journal records.
#[derive(Debug, Error)]
pub enum JournalError {
    /// The sizing verdict does not allow an entry.
    #[error("Cannot journal a trade whose entry is forbidden")]
    EntryForbidden,

    /// The trade already has an outcome.
    #[error("Trade {id} is already closed")]
    AlreadyClosed {
        /// Record ID.
        id: String,
    },

    /// The exit timestamp precedes the entry timestamp.
    #[error("Trade {id} cannot exit before it was entered")]
    ExitBeforeEntry {
        /// Record ID.
        id: String,
    },

    /// No record with this ID.
    #[error("Trade {id} not found")]
    NotFound {
        /// Record ID.
        id: String,
    },

    /// A record with this ID already exists.
    #[error("Trade {id} already exists")]
    DuplicateId {
        /// Record ID.
        id: String,
    },

    /// History snapshot could not be read or written.
    #[error("History JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
