//! Surface catalogue error types.

use std::path::PathBuf;

/// Errors that can occur when loading a catalogue snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Snapshot file could not be read
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON in the expected shape
    #[error("catalogue parse error: {message}")]
    Json { message: String },
}
