//! Error types for dataset loading.

use std::path::PathBuf;

/// Errors that can occur while reading a dataset file.
#[derive(Debug)]
pub enum DataError {
    /// I/O error while reading the file.
    Io { path: PathBuf, source: std::io::Error },
    /// The file is not a JSON array of records.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Io { path, source } => {
                write!(f, "I/O error reading '{}': {}", path.display(), source)
            }
            DataError::Parse { path, source } => {
                write!(f, "Parse error in '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io { source, .. } => Some(source),
            DataError::Parse { source, .. } => Some(source),
        }
    }
}
