use thiserror::Error;

use crate::account::{AccountId, Amount};

/// Errors returned by every ledger operation.
///
/// All variants are recoverable by the caller: an operation that fails
/// leaves the ledger exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The requested amount is zero, negative, or would overflow the supply.
    #[error("Amount must be greater than 0")]
    InvalidAmount,

    /// The source account holds less than the requested amount.
    #[error("Not enough tokens! {account} has {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: Amount,
        requested: Amount,
    },

    /// Imported or stored state is missing required fields or is inconsistent.
    #[error("Malformed state: {0}")]
    MalformedState(String),

    /// The durable write backing a mutation could not complete.
    ///
    /// The in-memory ledger is left at the last durably written state.
    #[error("Persistence failure during {operation}: {reason}")]
    PersistenceFailure { operation: String, reason: String },

    /// Account identifiers must not be empty.
    #[error("Account id must not be empty")]
    InvalidAccount,

    #[error("Cannot transfer to yourself")]
    SelfTransfer,

    #[error("Account {account} is not allowed to mint")]
    Unauthorized { account: AccountId },

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("Invalid config: {0}")]
    Config(String),
}

impl LedgerError {
    pub fn persistence(operation: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        LedgerError::PersistenceFailure {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::MalformedState(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
