//! Test fixtures.
//!
//! This module provides a throwaway runtime directory wired into the
//! resolvers used by `TokenAuthority`.

use crate::mocks::FixedPathResolver;
use local_token::RuntimeDirResolver;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary runtime directory, removed on drop.
#[derive(Debug)]
pub struct RuntimeDirFixture {
    root: TempDir,
    runtime_dir: PathBuf,
}

impl RuntimeDirFixture {
    /// Create a fixture whose runtime directory is `<tmp>/run123`.
    ///
    /// The runtime directory itself is not created; `init` must do it.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary root cannot be created.
    pub fn new() -> io::Result<Self> {
        Self::with_name("run123")
    }

    /// Create a fixture with a custom runtime directory name.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary root cannot be created.
    pub fn with_name(name: &str) -> io::Result<Self> {
        let root = tempfile::tempdir()?;
        let runtime_dir = root.path().join(name);
        Ok(Self { root, runtime_dir })
    }

    /// Runtime directory path.
    #[must_use]
    pub fn runtime_dir(&self) -> &Path {
        &self.runtime_dir
    }

    /// Temporary root containing the runtime directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Expected path of the token file for `file_id`.
    #[must_use]
    pub fn token_path(&self, file_id: &str) -> PathBuf {
        self.runtime_dir.join(file_id)
    }

    /// Default resolver whose `XDG_RUNTIME_DIR` lookup returns this directory.
    #[must_use]
    pub fn env_resolver(&self) -> RuntimeDirResolver {
        let dir = OsString::from(self.runtime_dir.as_os_str());
        RuntimeDirResolver::new().with_lookup(move |_| Some(dir.clone()))
    }

    /// Resolver joining this directory with the file identifier.
    #[must_use]
    pub fn fixed_resolver(&self) -> FixedPathResolver {
        FixedPathResolver::new(&self.runtime_dir)
    }
}
