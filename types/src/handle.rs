//! Opaque account handle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// An opaque, non-empty identity for a party interacting with the ledger.
///
/// Journalists, anonymous senders, and the administrator are all addressed
/// by handles. The ledger never interprets the contents.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountHandle(String);

impl AccountHandle {
    /// Create a handle from a raw string, rejecting the empty string.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(TypesError::EmptyHandle);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for AccountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountHandle {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountHandle {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AccountHandle> for String {
    fn from(handle: AccountHandle) -> Self {
        handle.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_handle_rejected() {
        assert_eq!(AccountHandle::new(""), Err(TypesError::EmptyHandle));
    }

    #[test]
    fn handle_displays_raw_value() {
        let h: AccountHandle = "alice".parse().unwrap();
        assert_eq!(h.to_string(), "alice");
        assert_eq!(h.as_bytes(), b"alice");
    }
}
