//! Error types for book-freq-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or saving pipeline files.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file could not be written.
    #[error("failed to write {path}")]
    Write {
        /// Path that was being written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid UTF-8.
    #[error("{path} is not valid UTF-8 text")]
    InvalidUtf8 {
        /// Path whose content failed to decode.
        path: Utf8PathBuf,
    },

    /// The file exceeds the configured input limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// Offending path.
        path: Utf8PathBuf,
        /// Actual file size.
        size: u64,
        /// Configured limit.
        limit: usize,
    },

    /// A frequency table could not be encoded or decoded as CSV.
    #[error("malformed word count table: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias using [`DatasetError`].
pub type DatasetResult<T> = Result<T, DatasetError>;
