pub mod account;
pub mod error;
pub mod genesis;
pub mod utils;

pub use account::{AccountId, Amount};
pub use error::{LedgerError, Result};
