use std::sync::Arc;

use kuku_common::{AccountId, Amount, Result};
use tokio::sync::Mutex;

use crate::core::ledger::transaction::Receipt;
use crate::core::runtime::snapshot::PersistedState;
use crate::core::runtime::store::StateStore;
use crate::Ledger;

/// A ledger behind one global lock, for callers that run concurrently.
///
/// Each operation holds the lock from its first check until its write has
/// landed, so no caller observes a half-applied transfer or mint.
#[derive(Debug)]
pub struct SharedLedger<S: StateStore> {
    inner: Arc<Mutex<Ledger<S>>>,
}

impl<S: StateStore> Clone for SharedLedger<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StateStore> SharedLedger<S> {
    pub fn new(ledger: Ledger<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    pub async fn get_balance(&self, id: &AccountId) -> Result<Amount> {
        self.inner.lock().await.get_balance(id)
    }

    pub async fn ensure_account_exists(&self, id: &AccountId) -> Result<()> {
        self.inner.lock().await.ensure_account_exists(id)
    }

    pub async fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<Receipt> {
        self.inner.lock().await.transfer(from, to, amount)
    }

    pub async fn mint(&self, to: &AccountId, amount: Amount) -> Result<Receipt> {
        self.inner.lock().await.mint(to, amount)
    }

    pub async fn total_supply(&self) -> Amount {
        self.inner.lock().await.total_supply()
    }

    pub async fn serialize(&self) -> PersistedState {
        self.inner.lock().await.serialize()
    }

    /// Runs `f` with exclusive access, for multi-step reads or restores.
    pub async fn with<R>(&self, f: impl FnOnce(&mut Ledger<S>) -> R) -> R {
        let mut ledger = self.inner.lock().await;
        f(&mut ledger)
    }
}
