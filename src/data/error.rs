//! Transcript loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a dialogue transcript.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// The file could not be opened or read.
    #[error("cannot read transcript '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid UTF-8.
    #[error("transcript '{path}' is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
