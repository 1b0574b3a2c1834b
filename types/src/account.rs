//! Account identifier type.

use crate::error::TallyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The identity of a caller, as supplied by the surrounding execution
/// environment (the equivalent of a message sender).
///
/// The ledger treats it as opaque: it is only compared, hashed and stored.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Longest accepted identifier, in bytes.
    pub const MAX_LEN: usize = 128;

    /// Create an account id from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed account id. Use
    /// [`str::parse`] for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(Self::is_well_formed(&s), "malformed account id: {s:?}");
        Self(s)
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the identifier as bytes (used for storage keys).
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn is_well_formed(s: &str) -> bool {
        !s.is_empty() && s.len() <= Self::MAX_LEN && !s.chars().any(char::is_whitespace)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(TallyError::InvalidAccount(s.to_string()))
        }
    }
}

impl TryFrom<&[u8]> for AccountId {
    type Error = TallyError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let s = std::str::from_utf8(bytes)
            .map_err(|e| TallyError::InvalidAccount(e.to_string()))?;
        s.parse()
    }
}
