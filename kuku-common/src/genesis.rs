use crate::account::{AccountId, Amount};

pub const TOKEN_NAME: &str = "KuKu Coin";
pub const TOKEN_SYMBOL: &str = "K";

/// Account credited with the whole supply at genesis.
pub const CREATOR_ID: &str = "admin";

/// Supply created at genesis, also the fallback when an import omits `totalSupply`.
pub const GENESIS_SUPPLY: Amount = 1_000_000;

/// Maximum number of transaction records kept in history.
pub const HISTORY_LIMIT: usize = 20;

pub const GENESIS_DESCRIPTION: &str = "Initial token distribution";

/// Version tag written into export documents.
pub const EXPORT_VERSION: &str = "1.0";

pub fn creator() -> AccountId {
    AccountId::from_static(CREATOR_ID)
}
