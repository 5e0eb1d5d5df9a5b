//! CLI error types.

use std::path::PathBuf;

use mdsite_core::ConvertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("invalid config '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("directory '{}' does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("{}: {source}", .path.display())]
    Page {
        path: PathBuf,
        #[source]
        source: Box<CliError>,
    },

    #[error("{failed} of {total} page(s) failed to generate")]
    PagesFailed { failed: usize, total: usize },
}

impl CliError {
    /// Attach a path to an I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
