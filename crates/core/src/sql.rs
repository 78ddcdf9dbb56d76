//! SQL identifier handling.

use std::fmt;

use crate::error::CoreError;

/// PostgreSQL truncates identifiers longer than this (NAMEDATALEN - 1).
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// A validated SQL identifier (table, column, type, index or schema name).
///
/// Catalog lookups bind [`Ident::as_str`] as a parameter; queries that have
/// to interpolate a name use [`Ident::quoted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident(String);

impl Ident {
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("identifier is empty")
        } else if name.contains('\0') {
            Some("identifier contains a NUL byte")
        } else if name.len() > MAX_IDENTIFIER_LEN {
            Some("identifier is longer than 63 bytes")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CoreError::InvalidIdentifier { name, reason }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form with embedded quotes doubled, safe to splice into SQL.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0.replace('"', "\"\""))
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
