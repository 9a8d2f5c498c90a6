use std::path::PathBuf;
use thiserror::Error;

use poldrift_core::DriftError;

/// Errors surfaced by the CLI layer.
///
/// Everything here is a hard failure of the run: the process exits
/// non-zero and nothing is swallowed.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collector capture file is not the expected JSON shape
    #[error("invalid capture file {path}: {message}")]
    InvalidCapture { path: PathBuf, message: String },

    /// The persisted state archive has the wrong phase for this command
    #[error("state file {path} holds a {found} archive, expected {expected}")]
    WrongPhase {
        path: PathBuf,
        found: String,
        expected: String,
    },

    /// A core operation failed (archive codec, digest check)
    #[error(transparent)]
    Core(#[from] DriftError),
}

impl CliError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}
