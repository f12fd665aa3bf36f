//! Error types for the token issuer.

use local_token::TokenError;
use thiserror::Error;

/// Token issuer errors.
#[derive(Error, Debug)]
pub enum IssuerError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token lifecycle failure
    #[error(transparent)]
    Token(#[from] TokenError),

    /// I/O failure while serving verification requests
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IssuerError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this error is caused by configuration.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Token(err) => err.is_config_error(),
            Self::Io(_) => false,
        }
    }
}
