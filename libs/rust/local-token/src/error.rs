//! Error types for token issuing.
//!
//! Failures are split into configuration errors (the token path cannot be
//! resolved) and I/O errors (the token file cannot be written or read).
//! A rejected candidate is never an error.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while resolving, persisting or reading a token.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Runtime directory variable is unset or empty
    #[error("Environment variable {var} is not set")]
    MissingRuntimeDir {
        /// Variable name that was looked up
        var: String,
    },

    /// Runtime directory variable is not an absolute path
    #[error("Environment variable {var} must be an absolute path, got {value:?}")]
    InvalidRuntimeDir {
        /// Variable name that was looked up
        var: String,
        /// Value found in the environment
        value: String,
    },

    /// File identifier would resolve outside the runtime directory
    #[error("Token file identifier {file_id:?} must be a relative path without '..'")]
    InvalidFileId {
        /// Identifier that was rejected
        file_id: String,
    },

    /// Custom path resolver failed
    #[error("Token path resolution failed: {0}")]
    Resolve(String),

    /// Parent directory of the token file could not be created
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory being created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Token file could not be written
    #[error("Failed to write token file {}: {source}", path.display())]
    Write {
        /// Token file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Token file could not be read
    #[error("Failed to read token file {}: {source}", path.display())]
    Read {
        /// Token file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Token file exists but holds no token
    #[error("Token file {} is empty", path.display())]
    EmptyTokenFile {
        /// Token file path
        path: PathBuf,
    },
}

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

impl TokenError {
    /// Check if this error comes from path configuration.
    ///
    /// Configuration errors are fatal and should not be retried.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingRuntimeDir { .. }
                | Self::InvalidRuntimeDir { .. }
                | Self::InvalidFileId { .. }
                | Self::Resolve(_)
        )
    }

    /// Check if this error comes from filesystem access.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(
            self,
            Self::CreateDir { .. } | Self::Write { .. } | Self::Read { .. }
        )
    }

    /// Path involved in the failure, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::CreateDir { path, .. }
            | Self::Write { path, .. }
            | Self::Read { path, .. }
            | Self::EmptyTokenFile { path } => Some(path),
            _ => None,
        }
    }

    /// Create a missing runtime directory error.
    #[must_use]
    pub fn missing_runtime_dir(var: impl Into<String>) -> Self {
        Self::MissingRuntimeDir { var: var.into() }
    }

    /// Create a resolver error with the given message.
    #[must_use]
    pub fn resolve(msg: impl Into<String>) -> Self {
        Self::Resolve(msg.into())
    }
}
