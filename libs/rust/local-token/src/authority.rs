//! Token authority: owns the secret, persists it and verifies candidates.

use crate::compare::constant_time_eq;
use crate::error::TokenResult;
use crate::file::write_token_file;
use crate::generate::generate_token;
use crate::logger::{NoopLogger, TokenLogger};
use crate::resolver::{PathResolver, RuntimeDirResolver};
use secrecy::{ExposeSecret, SecretSlice};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Issues a single shared secret and verifies presented tokens against it.
///
/// The authority starts uninitialized and rejects every candidate until
/// [`init`](Self::init) succeeds. Calling `init` again replaces the secret
/// and overwrites the token file.
///
/// `init` takes `&mut self`, so initialization cannot race with itself or
/// with [`check`](Self::check); share the authority (e.g. behind an `Arc`)
/// only after it is initialized.
///
/// # Examples
///
/// ```no_run
/// use local_token::{read_token_file, TokenAuthority};
/// use secrecy::ExposeSecret;
///
/// # async fn run() -> local_token::TokenResult<()> {
/// let mut authority = TokenAuthority::new("myapp.token");
/// let path = authority.init().await?;
///
/// let token = read_token_file(&path).await?;
/// assert!(authority.check(token.expose_secret()));
/// # Ok(())
/// # }
/// ```
pub struct TokenAuthority {
    file_id: String,
    logger: Arc<dyn TokenLogger>,
    resolver: Arc<dyn PathResolver>,
    secret: Option<SecretSlice<u8>>,
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("file_id", &self.file_id)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl TokenAuthority {
    /// Create an authority for the given token file identifier.
    ///
    /// Uses a no-op logger and resolves the path under `XDG_RUNTIME_DIR`.
    /// No I/O happens here.
    #[must_use]
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            logger: Arc::new(NoopLogger),
            resolver: Arc::new(RuntimeDirResolver::default()),
            secret: None,
        }
    }

    /// Set the logger used to report the token path.
    #[must_use]
    pub fn with_logger(mut self, logger: impl TokenLogger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Set the resolver mapping the file identifier to a path.
    #[must_use]
    pub fn with_path_resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Token file identifier.
    #[must_use]
    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    /// Whether a secret has been generated.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.secret.is_some()
    }

    /// Generate a new token, keep it in memory and write it to the token file.
    ///
    /// Returns the path of the written file. The in-memory secret is
    /// replaced before the file is written, so a persistence failure still
    /// leaves [`check`](Self::check) usable with the new token.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the path cannot be resolved, or an
    /// I/O error if the directory or file cannot be written.
    pub async fn init(&mut self) -> TokenResult<PathBuf> {
        let path = self.resolver.resolve(&self.file_id)?;
        self.logger.log(&format!("token: {}", path.display()));

        let token = generate_token();
        self.secret = Some(SecretSlice::from(token.as_bytes().to_vec()));
        debug!(file_id = %self.file_id, "Token generated");

        write_token_file(&path, &token).await?;
        Ok(path)
    }

    /// Check a presented token in constant time.
    ///
    /// Always `false` before [`init`](Self::init).
    #[must_use]
    pub fn check(&self, candidate: &str) -> bool {
        self.secret.as_ref().is_some_and(|secret| {
            let expected = secret.expose_secret();
            !expected.is_empty() && constant_time_eq(expected, candidate.as_bytes())
        })
    }
}
