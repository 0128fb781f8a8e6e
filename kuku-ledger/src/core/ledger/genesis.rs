use kuku_common::Result;
use tracing::info;

use crate::core::ledger::state::State;
use crate::core::runtime::store::StateStore;
use crate::Ledger;

impl<S: StateStore> Ledger<S> {
    /// Replaces the persisted state with a fresh genesis.
    ///
    /// Genesis overwrites the stored entry in a single write, so a failed
    /// reset leaves both storage and memory on the previous state.
    pub fn reset(&mut self) -> Result<()> {
        self.commit("reset", State::genesis())?;
        info!("🏛️ Ledger '{}' reset to genesis", self.storage_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runtime::store::{MemoryStore, StoreError};
    use kuku_common::{AccountId, LedgerError};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Reads from a shared `MemoryStore` but can be told to drop every save.
    #[derive(Debug, Clone)]
    struct SaveRejectingStore {
        inner: MemoryStore,
        reject_saves: Arc<AtomicBool>,
    }

    impl StateStore for SaveRejectingStore {
        fn load(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, StoreError> {
            self.inner.load(key)
        }

        fn save(&self, key: &str, bytes: &[u8]) -> std::result::Result<(), StoreError> {
            if self.reject_saves.load(Ordering::SeqCst) {
                return Err(StoreError::Backend("disk full".to_string()));
            }
            self.inner.save(key, bytes)
        }
    }

    #[test]
    fn test_reset_restores_genesis() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::open(store.clone(), "kukuCoinData").unwrap();
        let dave = AccountId::new("dave").unwrap();
        ledger.mint(&dave, 300).unwrap();

        ledger.reset().unwrap();
        assert_eq!(ledger.total_supply(), 1_000_000);
        assert_eq!(ledger.balances().len(), 1);
        assert_eq!(ledger.peek_balance(&dave), None);
        assert_eq!(ledger.history().len(), 1);

        let reopened = Ledger::open(store, "kukuCoinData").unwrap();
        assert_eq!(reopened.serialize().balances, ledger.serialize().balances);
    }

    #[test]
    fn test_reset_fails_when_storage_unavailable() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::open(store.clone(), "kukuCoinData").unwrap();
        let dave = AccountId::new("dave").unwrap();
        ledger.mint(&dave, 300).unwrap();

        store.set_failing(true);
        assert!(matches!(ledger.reset(), Err(LedgerError::PersistenceFailure { .. })));
        assert_eq!(ledger.peek_balance(&dave), Some(300));
    }

    #[test]
    fn test_failed_reset_keeps_memory_and_storage_in_step() {
        let inner = MemoryStore::new();
        let store = SaveRejectingStore {
            inner: inner.clone(),
            reject_saves: Arc::new(AtomicBool::new(false)),
        };
        let mut ledger = Ledger::open(store.clone(), "kukuCoinData").unwrap();
        ledger.mint(&AccountId::new("dave").unwrap(), 300).unwrap();

        store.reject_saves.store(true, Ordering::SeqCst);
        assert!(matches!(ledger.reset(), Err(LedgerError::PersistenceFailure { .. })));
        assert_eq!(ledger.total_supply(), 1_000_300);
        assert!(inner.load("kukuCoinData").unwrap().is_some());

        let reopened = Ledger::open(inner, "kukuCoinData").unwrap();
        assert_eq!(reopened.total_supply(), ledger.total_supply());
        assert_eq!(reopened.balances(), ledger.balances());
    }
}
