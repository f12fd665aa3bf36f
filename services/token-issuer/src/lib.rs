//! Token Issuer library.
//!
//! Provides configuration loading, tracing setup, token issuing and the
//! line-oriented verification loop used by the `token-issuer` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

// Re-exports for convenience
pub use config::Config;
pub use error::IssuerError;
pub use session::{issue_token, serve_checks, CheckStats, MAX_LINE_LEN};
pub use telemetry::{init_tracing, service_span, LogFormat, TracingConfig};
