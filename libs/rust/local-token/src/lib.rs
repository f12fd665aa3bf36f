//! Local shared-secret token authority.
//!
//! One process issues a random token, keeps it in memory and writes it to a
//! file under the user's runtime directory. Co-located processes read the
//! file and present the token back, which is verified with a constant-time
//! comparison.
//!
//! This crate provides:
//! - [`TokenAuthority`] owning the token lifecycle
//! - Token generation (`base64(sha256(64 random bytes))`)
//! - Length-independent constant-time comparison
//! - Runtime directory path resolution
//! - Token file persistence and client-side reading

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod authority;
pub mod compare;
pub mod error;
pub mod file;
pub mod generate;
pub mod logger;
pub mod resolver;

pub use authority::TokenAuthority;
pub use compare::constant_time_eq;
pub use error::{TokenError, TokenResult};
pub use file::{read_token_file, write_token_file};
pub use generate::{generate_token, RANDOM_BYTES, TOKEN_LEN};
pub use logger::{NoopLogger, TokenLogger, TracingLogger};
pub use resolver::{PathResolver, RuntimeDirResolver};

/// Environment variable naming the runtime directory for the token file.
pub const ENV_XDG_RUNTIME_DIR: &str = "XDG_RUNTIME_DIR";
