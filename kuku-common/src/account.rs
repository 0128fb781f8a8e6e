use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::LedgerError;

/// Token amounts are whole units; balances can never go negative.
pub type Amount = u64;

/// Opaque identifier of a balance holder.
///
/// [`AccountId::new`] trims user input and rejects what is left empty.
/// Deserialized ids are taken verbatim: an empty or untrimmed id in stored
/// state is rejected instead of being folded onto another account.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, LedgerError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LedgerError::InvalidAccount);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub(crate) fn from_static(id: &'static str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() || value.trim() != value {
            return Err(LedgerError::InvalidAccount);
        }
        Ok(Self(value))
    }
}

impl std::str::FromStr for AccountId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountId::new(s)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl Borrow<str> for AccountId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_rejects_empty() {
        assert_eq!(AccountId::new("  alice ").unwrap().as_str(), "alice");
        assert_eq!(AccountId::new("").unwrap_err(), LedgerError::InvalidAccount);
        assert_eq!(AccountId::new("   ").unwrap_err(), LedgerError::InvalidAccount);
    }

    #[test]
    fn test_serde_validates_ids() {
        let id: AccountId = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(id.as_str(), "bob");
        assert!(serde_json::from_str::<AccountId>("\"\"").is_err());
        assert!(serde_json::from_str::<AccountId>("\" bob\"").is_err());
        assert!(serde_json::from_str::<AccountId>("\"bob\\n\"").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"bob\"");
    }
}
