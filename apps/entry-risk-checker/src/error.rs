//! Crate-level error type for the calling layer.
//!
//! Sizing and analytics never fail; these errors come from loading
//! configuration, reading documents and maintaining the journal.

use thiserror::Error;

use crate::config::ConfigError;
use crate::journal::JournalError;
use crate::risk::SettingsError;
use crate::telemetry::TelemetryError;

/// Errors surfaced to the binary.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Risk settings violate their invariant.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Journal operation failed.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Logging could not be initialised.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// An input document could not be opened.
    #[error("Failed to open '{path}': {source}")]
    Io {
        /// Path of the document.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// An input document is not valid JSON for its type.
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias using the crate [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;
