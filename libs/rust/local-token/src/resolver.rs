//! Token file path resolution.

use crate::ENV_XDG_RUNTIME_DIR;
use crate::error::{TokenError, TokenResult};
use std::ffi::OsString;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Maps a token file identifier to a full filesystem path.
pub trait PathResolver: Send + Sync {
    /// Resolve the path for `file_id`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no path can be derived.
    fn resolve(&self, file_id: &str) -> TokenResult<PathBuf>;
}

impl<F> PathResolver for F
where
    F: Fn(&str) -> TokenResult<PathBuf> + Send + Sync,
{
    fn resolve(&self, file_id: &str) -> TokenResult<PathBuf> {
        self(file_id)
    }
}

type EnvLookup = Arc<dyn Fn(&str) -> Option<OsString> + Send + Sync>;

/// Joins the runtime directory from the environment with the file identifier.
///
/// The variable is read on every call, not at construction. An unset,
/// empty or relative value is rejected, as is an identifier that is empty,
/// absolute or contains `..`, so the result always stays under the
/// runtime directory.
#[derive(Clone)]
pub struct RuntimeDirResolver {
    var: String,
    lookup: EnvLookup,
}

impl Default for RuntimeDirResolver {
    fn default() -> Self {
        Self {
            var: ENV_XDG_RUNTIME_DIR.to_string(),
            lookup: Arc::new(|key: &str| std::env::var_os(key)),
        }
    }
}

impl fmt::Debug for RuntimeDirResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeDirResolver")
            .field("var", &self.var)
            .finish_non_exhaustive()
    }
}

impl RuntimeDirResolver {
    /// Create a resolver reading `XDG_RUNTIME_DIR`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the runtime directory from a different variable.
    #[must_use]
    pub fn with_var(mut self, var: impl Into<String>) -> Self {
        self.var = var.into();
        self
    }

    /// Replace the environment lookup.
    #[must_use]
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString> + Send + Sync + 'static,
    {
        self.lookup = Arc::new(lookup);
        self
    }

    /// Variable name this resolver reads.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl PathResolver for RuntimeDirResolver {
    fn resolve(&self, file_id: &str) -> TokenResult<PathBuf> {
        let value = (self.lookup)(&self.var)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TokenError::missing_runtime_dir(&self.var))?;

        let dir = PathBuf::from(value);
        if !dir.is_absolute() {
            return Err(TokenError::InvalidRuntimeDir {
                var: self.var.clone(),
                value: dir.to_string_lossy().into_owned(),
            });
        }

        if !is_contained(Path::new(file_id)) {
            return Err(TokenError::InvalidFileId {
                file_id: file_id.to_string(),
            });
        }

        Ok(dir.join(file_id))
    }
}

/// Whether joining `id` onto a directory names an entry beneath it.
fn is_contained(id: &Path) -> bool {
    let mut normal = 0usize;
    for component in id.components() {
        match component {
            Component::Normal(_) => normal += 1,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    normal > 0
}
