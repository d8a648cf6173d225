//! Document request reference codes.
//!
//! A reference is a two-letter prefix followed by the UTC creation time as
//! `%y%m%d%H%M%S`, e.g. `DR260305090702`. It is assigned once, at insert, and
//! uniqueness is left to the storage layer's unique index.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix for document request references.
pub const DOCUMENT_REQUEST_PREFIX: &str = "DR";

/// Timestamp layout following the prefix.
pub const TIMESTAMP_FORMAT: &str = "%y%m%d%H%M%S";

/// Total length of a document request reference.
pub const REFERENCE_LEN: usize = 14;

/// An immutable record reference code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceCode(String);

impl ReferenceCode {
    /// Generates a reference from a prefix and a creation time.
    #[must_use]
    pub fn generate(prefix: &str, at: DateTime<Utc>) -> Self {
        Self(format!("{prefix}{}", at.format(TIMESTAMP_FORMAT)))
    }

    /// Generates a document request reference.
    #[must_use]
    pub fn for_document_request(at: DateTime<Utc>) -> Self {
        Self::generate(DOCUMENT_REQUEST_PREFIX, at)
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the code, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReferenceCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
