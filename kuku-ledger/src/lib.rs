pub mod config;
pub mod core;
pub mod interface;

use std::collections::BTreeMap;

use kuku_common::{AccountId, Amount, LedgerError, Result};
use tracing::{debug, error, info, warn};

use crate::core::ledger::state::State;
use crate::core::ledger::transaction::TransactionRecord;
use crate::core::runtime::snapshot::PersistedState;
use crate::core::runtime::store::StateStore;

pub use crate::core::ledger::transaction::{Receipt, TransactionKind};
pub use crate::core::shared::SharedLedger;

/// Storage key the ledger state lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "kukuCoinData";

/// The token ledger: total supply, balances and the capped history.
///
/// A `Ledger` value only exists in the ready state. [`Ledger::open`] performs
/// the one-time load-or-genesis step, and every mutation afterwards is
/// written through the [`StateStore`] before it becomes visible in memory.
#[derive(Debug)]
pub struct Ledger<S: StateStore> {
    store: S,
    storage_key: String,
    state: State,
}

impl<S: StateStore> Ledger<S> {
    /// Loads the state stored under `storage_key`, or creates and persists genesis.
    ///
    /// Stored state that fails validation is discarded in favour of genesis.
    pub fn open(store: S, storage_key: impl Into<String>) -> Result<Self> {
        let storage_key = storage_key.into();
        let stored = store
            .load(&storage_key)
            .map_err(|e| LedgerError::persistence("load", e))?;

        let mut ledger = Self {
            store,
            storage_key,
            state: State::genesis(),
        };

        match stored {
            Some(bytes) => match PersistedState::from_slice(&bytes).and_then(State::from_loaded) {
                Ok(state) => {
                    info!(
                        "📂 Loaded ledger state '{}': supply {}, {} accounts, {} records",
                        ledger.storage_key,
                        state.total_supply,
                        state.balances.len(),
                        state.history.len()
                    );
                    ledger.state = state;
                }
                Err(e) => {
                    warn!("⚠️ Discarding unreadable ledger state '{}': {}", ledger.storage_key, e);
                    ledger.commit("genesis", State::genesis())?;
                }
            },
            None => {
                info!("🏛️ No stored state under '{}', applying genesis", ledger.storage_key);
                ledger.commit("genesis", State::genesis())?;
            }
        }

        Ok(ledger)
    }

    pub fn total_supply(&self) -> Amount {
        self.state.total_supply
    }

    pub fn balances(&self) -> &BTreeMap<AccountId, Amount> {
        &self.state.balances
    }

    /// Reads a balance without materializing the account.
    pub fn peek_balance(&self, id: &AccountId) -> Option<Amount> {
        self.state.balances.get(id).copied()
    }

    /// Transaction records, newest first.
    pub fn history(&self) -> &[TransactionRecord] {
        &self.state.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes `staged` to storage and, only if that succeeds, makes it current.
    fn commit(&mut self, operation: &str, staged: State) -> Result<()> {
        let persisted = PersistedState::from_state(&staged);
        let bytes = serde_json::to_vec(&persisted)
            .map_err(|e| LedgerError::persistence(operation, e))?;

        if let Err(e) = self.store.save(&self.storage_key, &bytes) {
            error!("❌ Failed to persist {} for '{}': {}", operation, self.storage_key, e);
            return Err(LedgerError::persistence(operation, e));
        }

        debug!("💾 Persisted {} ({} bytes)", operation, bytes.len());
        self.state = staged;
        Ok(())
    }
}
