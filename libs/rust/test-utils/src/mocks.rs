//! Mock implementations for testing.
//!
//! This module provides substitutes for the logger and path resolver
//! capabilities injected into `TokenAuthority`.

use local_token::{PathResolver, TokenError, TokenLogger, TokenResult};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// Logger that records every message.
///
/// Clones share the same message buffer, so a clone can be handed to the
/// authority while the test keeps the original for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingLogger {
    /// Create a new recording logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get message count.
    #[must_use]
    pub fn count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Clear all messages.
    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl TokenLogger for RecordingLogger {
    fn log(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Resolver joining a fixed base directory with the file identifier.
#[derive(Debug, Clone)]
pub struct FixedPathResolver {
    base: PathBuf,
}

impl FixedPathResolver {
    /// Create a resolver rooted at `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl PathResolver for FixedPathResolver {
    fn resolve(&self, file_id: &str) -> TokenResult<PathBuf> {
        Ok(self.base.join(file_id))
    }
}

/// Resolver that always fails with a configuration error.
#[derive(Debug, Clone)]
pub struct FailingPathResolver {
    reason: String,
}

impl FailingPathResolver {
    /// Create a resolver failing with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for FailingPathResolver {
    fn default() -> Self {
        Self::new("resolver unavailable")
    }
}

impl PathResolver for FailingPathResolver {
    fn resolve(&self, _file_id: &str) -> TokenResult<PathBuf> {
        Err(TokenError::resolve(self.reason.clone()))
    }
}
