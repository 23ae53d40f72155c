//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Every variant is recoverable at the session level. Navigation errors leave
/// the history untouched, commit errors keep the dialog open.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The navigation target is missing, not a directory, or cannot be enumerated.
    #[error("Directory is not available: {}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Undo or redo was requested at a history boundary.
    #[error("No history entry in that direction")]
    NoHistory,

    /// The typed name contains reserved characters or a reserved device name.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// An open-file commit pointed at something that is not an existing file.
    #[error("{} not found", .0.display())]
    FileNotFound(PathBuf),

    /// The directory vanished (or became unreadable) between validation and enumeration.
    #[error("Failed to list directory {}: {source}", path.display())]
    ListingFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: Option<std::io::Error>) -> Self {
        Self::DirectoryUnavailable {
            path: path.into(),
            source,
        }
    }
}
