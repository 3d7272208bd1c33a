use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while importing, listing or removing custom drivers.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("no valid manifest found in archive")]
    MissingManifest,

    #[error("unreadable manifest '{entry}': {source}")]
    InvalidManifest {
        entry: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest names an unusable driver identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("driver '{0}' is not installed")]
    NotFound(String),
}

impl DriverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Status line shown after a failed import.
    pub fn import_message(&self) -> String {
        match self {
            DriverError::MissingManifest
            | DriverError::InvalidManifest { .. }
            | DriverError::InvalidIdentifier(_) => {
                "Failed to install driver: no valid manifest found in archive".to_string()
            }
            other => format!("Error importing driver: {}", other),
        }
    }

    /// Status line shown after a failed removal of `id`.
    pub fn remove_message(&self, id: &str) -> String {
        match self {
            DriverError::NotFound(_) => format!("Failed to remove {}", id),
            other => format!("Error removing {}: {}", id, other),
        }
    }
}
