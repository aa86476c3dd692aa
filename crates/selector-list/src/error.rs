//! Error types.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors reading or writing a selector artifact.
#[derive(Debug, Error)]
pub enum SelectorListError {
    /// The artifact file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// The artifact path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON of the expected shape.
    #[error("invalid selector artifact: {0}")]
    Json(#[from] serde_json::Error),
}
