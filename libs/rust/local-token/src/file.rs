//! Token file persistence.
//!
//! The issuing side writes the token with [`write_token_file`]; a
//! co-located client obtains it with [`read_token_file`]. The file holds
//! the literal token text with no trailing newline.

use crate::error::{TokenError, TokenResult};
use secrecy::SecretString;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Mode for the token file on Unix: owner read/write only.
#[cfg(unix)]
pub const TOKEN_FILE_MODE: u32 = 0o600;

/// Write `token` to `path`, creating missing parent directories.
///
/// Existing contents are replaced. On Unix the file mode is forced to
/// [`TOKEN_FILE_MODE`] even when the file already existed.
///
/// # Errors
///
/// Returns [`TokenError::CreateDir`] or [`TokenError::Write`] on I/O failure.
pub async fn write_token_file(path: &Path, token: &str) -> TokenResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| TokenError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let write_err = |source| TokenError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(TOKEN_FILE_MODE);

    let mut file = options.open(path).await.map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(TOKEN_FILE_MODE))
            .await
            .map_err(write_err)?;
    }

    file.write_all(token.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;
    file.sync_all().await.map_err(write_err)?;

    debug!(path = %path.display(), "Token file written");
    Ok(())
}

/// Read the token text from `path` exactly as written.
///
/// # Errors
///
/// Returns [`TokenError::Read`] if the file cannot be read and
/// [`TokenError::EmptyTokenFile`] if it holds no text.
pub async fn read_token_file(path: &Path) -> TokenResult<SecretString> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| TokenError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    if content.is_empty() {
        return Err(TokenError::EmptyTokenFile {
            path: path.to_path_buf(),
        });
    }

    Ok(SecretString::from(content))
}
