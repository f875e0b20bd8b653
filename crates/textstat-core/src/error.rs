//! Error types for textstat-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading input text.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input exceeds the configured size limit.
    #[error("input too large: {source_name} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// File path, or `stdin`.
        source_name: String,
        /// Size of the input in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The input could not be read.
    #[error("failed to read {source_name}")]
    Read {
        /// File path, or `stdin`.
        source_name: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`InputError`].
pub type InputResult<T> = Result<T, InputError>;

/// Errors reported by a clipboard backend.
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// No clipboard is reachable from this environment.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// A backend was reachable but refused the text.
    #[error("{backend} clipboard failed: {message}")]
    Backend {
        /// Name of the backend that failed.
        backend: String,
        /// What went wrong.
        message: String,
    },
}
