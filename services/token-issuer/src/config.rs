//! Centralized configuration for the token issuer.
//!
//! All configuration is loaded from environment variables (and an optional
//! `.env` file) and validated at startup.

use crate::error::IssuerError;
use crate::telemetry::{LogFormat, TracingConfig};
use local_token::{RuntimeDirResolver, TokenAuthority, TracingLogger, ENV_XDG_RUNTIME_DIR};
use std::env;

/// Default token file identifier, relative to the runtime directory.
pub const DEFAULT_TOKEN_FILE: &str = "local-token/auth.token";

/// Token issuer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token file identifier joined with the runtime directory
    pub token_file: String,
    /// Environment variable naming the runtime directory
    pub runtime_dir_var: String,
    /// Tracing configuration
    pub tracing: TracingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, IssuerError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IssuerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_file = lookup("TOKEN_FILE").unwrap_or_else(|| DEFAULT_TOKEN_FILE.to_string());
        if token_file.trim().is_empty() {
            return Err(IssuerError::config("TOKEN_FILE must not be empty"));
        }

        let runtime_dir_var =
            lookup("TOKEN_RUNTIME_DIR_VAR").unwrap_or_else(|| ENV_XDG_RUNTIME_DIR.to_string());
        if runtime_dir_var.is_empty() {
            return Err(IssuerError::config("TOKEN_RUNTIME_DIR_VAR must not be empty"));
        }

        let mut tracing = TracingConfig::default().with_service_name("token-issuer");
        if let Some(level) = lookup("LOG_LEVEL") {
            tracing = tracing.with_log_level(level);
        }
        tracing = tracing.with_format(parse_var(&lookup, "LOG_FORMAT", LogFormat::Text)?);

        Ok(Self {
            token_file,
            runtime_dir_var,
            tracing,
        })
    }

    /// Resolver for the configured runtime directory variable.
    #[must_use]
    pub fn path_resolver(&self) -> RuntimeDirResolver {
        RuntimeDirResolver::new().with_var(&self.runtime_dir_var)
    }

    /// Uninitialized authority for the configured token file, logging
    /// through `tracing`.
    #[must_use]
    pub fn authority(&self) -> TokenAuthority {
        TokenAuthority::new(self.token_file.clone())
            .with_logger(TracingLogger)
            .with_path_resolver(self.path_resolver())
    }
}

/// Parse a variable with a default value.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, IssuerError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(val) => val
            .parse()
            .map_err(|e| IssuerError::config(format!("Invalid {name}: {e}"))),
        None => Ok(default),
    }
}
