//! Migration script loading.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// A SQL script read from disk. Read once, executed once.
#[derive(Debug, Clone)]
pub struct MigrationScript {
    path: PathBuf,
    sql: String,
}

impl MigrationScript {
    /// Read the script at `path`.
    ///
    /// A missing file, an unreadable file and a whitespace-only file are
    /// all rejected here so nothing downstream has to connect first.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref().to_path_buf();
        let sql = match std::fs::read_to_string(&path) {
            Ok(sql) => sql,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CoreError::ScriptNotFound { path });
            }
            Err(source) => return Err(CoreError::ScriptUnreadable { path, source }),
        };

        if sql.trim().is_empty() {
            return Err(CoreError::EmptyScript { path });
        }

        Ok(Self { path, sql })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Size of the script in bytes.
    pub fn byte_len(&self) -> usize {
        self.sql.len()
    }

    /// Approximate number of statements in the script. Used for logging only.
    pub fn statement_count(&self) -> usize {
        statement_count(&self.sql)
    }
}

/// Count semicolon-separated statements, ignoring semicolons inside string
/// literals, quoted identifiers, dollar-quoted bodies and comments. A
/// trailing statement without a terminator is counted too.
pub fn statement_count(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut count = 0;
    // Whether anything other than whitespace/comments has been seen since
    // the last terminator.
    let mut pending = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i);
                continue;
            }
            quote @ (b'\'' | b'"') => {
                pending = true;
                i = skip_quoted(bytes, i, quote);
                continue;
            }
            b'$' if !follows_identifier(bytes, i) => {
                pending = true;
                if let Some(tag_end) = dollar_tag_end(bytes, i) {
                    let tag = &bytes[i..=tag_end];
                    let body_start = tag_end + 1;
                    i = bytes[body_start..]
                        .windows(tag.len())
                        .position(|w| w == tag)
                        .map_or(bytes.len(), |p| body_start + p + tag.len());
                    continue;
                }
            }
            b';' => {
                if pending {
                    count += 1;
                    pending = false;
                }
            }
            b if b.is_ascii_whitespace() => {}
            _ => pending = true,
        }
        i += 1;
    }

    if pending {
        count += 1;
    }
    count
}

/// Returns the index just past the closing `*/`. Block comments nest.
fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let mut depth = 1;
    let mut i = start + 2;
    while i < bytes.len() && depth > 0 {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            depth -= 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    i
}

/// Returns the index just past the closing quote. Doubled quotes escape.
fn skip_quoted(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

fn follows_identifier(bytes: &[u8], i: usize) -> bool {
    i > 0 && (bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'_')
}

/// If a dollar-quote tag (`$$` or `$name$`) starts at `start`, return the
/// index of its closing `$`. Positional parameters like `$1` are not tags.
fn dollar_tag_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut j = start + 1;
    while let Some(&c) = bytes.get(j) {
        if c == b'$' {
            return Some(j);
        }
        let valid = c == b'_' || c.is_ascii_alphabetic() || (j > start + 1 && c.is_ascii_digit());
        if !valid {
            return None;
        }
        j += 1;
    }
    None
}
