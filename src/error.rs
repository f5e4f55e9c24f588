//! Error types for the inference core

use std::path::PathBuf;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Persisted model state is missing, undecodable or inconsistent.
///
/// Raised only at load time. Nothing partially built is ever handed out
/// alongside it.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    /// The artifact could not be read from disk
    #[error("failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension names no known encoding
    #[error("unsupported model artifact format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The bytes do not decode into an artifact (truncated, corrupt, wrong shape)
    #[error("failed to decode model artifact: {0}")]
    Decode(String),

    #[error("unsupported model artifact version {0}")]
    UnsupportedVersion(u32),

    /// Dimensions or values disagree with each other
    #[error("inconsistent model artifact: {0}")]
    Inconsistent(String),
}

impl ModelLoadError {
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Self::Inconsistent(msg.into())
    }

    pub fn decode(msg: impl ToString) -> Self {
        Self::Decode(msg.to_string())
    }
}

/// A feature vector of the wrong length was handed to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("feature vector has {found} dimensions, model expects {expected}")]
pub struct DimensionMismatchError {
    pub expected: usize,
    pub found: usize,
}

/// Crate-level error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),

    /// Writing an artifact failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding an artifact failed
    #[error("failed to encode model artifact: {0}")]
    Encode(String),
}
