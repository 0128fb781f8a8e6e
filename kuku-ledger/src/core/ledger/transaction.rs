use chrono::{DateTime, Utc};
use kuku_common::{AccountId, Amount};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    System,
    Transfer,
    Mint,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TransactionKind::System => "system",
            TransactionKind::Transfer => "transfer",
            TransactionKind::Mint => "mint",
        };
        f.pad(name)
    }
}

/// One entry of the transaction history. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Amount,
    pub recipient: AccountId,
    pub timestamp: DateTime<Utc>,
}

/// Success value of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub message: String,
    pub record: TransactionRecord,
}
