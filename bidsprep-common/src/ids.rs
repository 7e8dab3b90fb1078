//! Subject and session identifiers
//!
//! Callers may pass `01` or `sub-01` interchangeably; both normalize to the
//! canonical `sub-01`. Normalization is idempotent.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Prefix of canonical subject directory names
pub const SUBJECT_PREFIX: &str = "sub-";

/// Prefix of canonical session directory names
pub const SESSION_PREFIX: &str = "ses-";

/// Prepend `sub-` unless already present
pub fn normalize_subject(raw: &str) -> String {
    with_prefix(raw, SUBJECT_PREFIX)
}

/// Prepend `ses-` unless already present
pub fn normalize_session(raw: &str) -> String {
    with_prefix(raw, SESSION_PREFIX)
}

fn with_prefix(raw: &str, prefix: &str) -> String {
    if raw.starts_with(prefix) {
        raw.to_string()
    } else {
        format!("{prefix}{raw}")
    }
}

/// Canonical subject identifier (always `sub-` prefixed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(raw: &str) -> Self {
        Self(normalize_subject(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Canonical session identifier (always `ses-` prefixed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(raw: &str) -> Self {
        Self(normalize_session(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_id_conversions {
    ($ty:ty) => {
        impl From<&str> for $ty {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl FromStr for $ty {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::new(s))
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

impl_id_conversions!(SubjectId);
impl_id_conversions!(SessionId);
