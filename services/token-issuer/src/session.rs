//! Token issuing and the line-oriented verification loop.
//!
//! Each input line is one candidate token. The loop answers `ok` when the
//! candidate matches the issued token and `denied` otherwise. Lines that
//! are not UTF-8 or longer than [`MAX_LINE_LEN`] are denied without being
//! compared, and the loop keeps serving.

use crate::error::IssuerError;
use local_token::TokenAuthority;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// Answer written for an accepted candidate.
pub const ACCEPTED: &str = "ok";

/// Answer written for a rejected candidate.
pub const DENIED: &str = "denied";

/// Longest candidate, in bytes, the loop will buffer. The line terminator
/// is not counted.
pub const MAX_LINE_LEN: usize = 4096;

/// Counters for a verification session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckStats {
    /// Candidates accepted
    pub accepted: u64,
    /// Candidates rejected
    pub denied: u64,
}

impl CheckStats {
    /// Total candidates processed.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.accepted + self.denied
    }
}

/// Initialize `authority`, returning the path of the written token file.
///
/// # Errors
///
/// Returns [`IssuerError::Token`] if the path cannot be resolved or the
/// file cannot be written.
pub async fn issue_token(authority: &mut TokenAuthority) -> Result<PathBuf, IssuerError> {
    let path = authority.init().await?;
    info!(path = %path.display(), "Token issued");
    Ok(path)
}

enum Line {
    Eof,
    Complete,
    TooLong,
}

/// Read one line into `buf` without the `\n`, keeping at most
/// `MAX_LINE_LEN + 1` bytes. The rest of an over-long line is consumed and
/// dropped.
async fn read_line_bounded<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Line>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let mut seen = false;
    let mut overflow = false;

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            break;
        }
        seen = true;

        let newline = available.iter().position(|&b| b == b'\n');
        let chunk = newline.map_or(available, |i| &available[..i]);
        let room = (MAX_LINE_LEN + 1).saturating_sub(buf.len());
        if chunk.len() > room {
            overflow = true;
        }
        buf.extend_from_slice(&chunk[..chunk.len().min(room)]);

        let used = newline.map_or(available.len(), |i| i + 1);
        reader.consume(used);
        if newline.is_some() {
            break;
        }
    }

    if !seen {
        return Ok(Line::Eof);
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    if overflow || buf.len() > MAX_LINE_LEN {
        return Ok(Line::TooLong);
    }
    Ok(Line::Complete)
}

/// Read candidates from `reader` until EOF, writing one answer per line.
///
/// The line terminator (`\n` or `\r\n`) is not part of the candidate.
///
/// # Errors
///
/// Returns [`IssuerError::Io`] if reading or writing fails.
pub async fn serve_checks<R, W>(
    authority: &TokenAuthority,
    mut reader: R,
    mut writer: W,
) -> Result<CheckStats, IssuerError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = CheckStats::default();
    let mut buf = Vec::with_capacity(128);

    loop {
        let accepted = match read_line_bounded(&mut reader, &mut buf).await? {
            Line::Eof => break,
            Line::TooLong => {
                debug!(max = MAX_LINE_LEN, "Candidate too long");
                false
            }
            Line::Complete => match std::str::from_utf8(&buf) {
                Ok(candidate) => authority.check(candidate),
                Err(_) => {
                    debug!("Candidate is not valid UTF-8");
                    false
                }
            },
        };

        let answer = if accepted {
            stats.accepted += 1;
            ACCEPTED
        } else {
            stats.denied += 1;
            DENIED
        };

        writer.write_all(answer.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    debug!(accepted = stats.accepted, denied = stats.denied, "Verification input closed");
    Ok(stats)
}
