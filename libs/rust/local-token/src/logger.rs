//! Logging capability injected into [`TokenAuthority`](crate::TokenAuthority).
//!
//! The authority reports the resolved token path through this trait once
//! per `init`. Logging is best-effort and cannot fail.

/// Sink for informational messages from the token authority.
pub trait TokenLogger: Send + Sync {
    /// Record a message.
    fn log(&self, message: &str);
}

impl<F> TokenLogger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message);
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl TokenLogger for NoopLogger {
    fn log(&self, _message: &str) {}
}

/// Forwards messages to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TokenLogger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(target: "local_token", "{message}");
    }
}
