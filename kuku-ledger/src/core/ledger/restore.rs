use kuku_common::Result;
use tracing::{info, warn};

use crate::core::ledger::state::State;
use crate::core::runtime::snapshot::PersistedState;
use crate::core::runtime::store::StateStore;
use crate::Ledger;

impl<S: StateStore> Ledger<S> {
    /// Full state in its persisted shape, stamped with the current time.
    pub fn serialize(&self) -> PersistedState {
        PersistedState::from_state(&self.state)
    }

    /// Replaces supply, balances and history wholesale.
    ///
    /// The candidate is validated first; on `MalformedState` or a failed
    /// write the current state is kept.
    pub fn restore(&mut self, persisted: PersistedState) -> Result<()> {
        let staged = match State::from_persisted(persisted) {
            Ok(state) => state,
            Err(e) => {
                warn!("Rejected restore into '{}': {}", self.storage_key, e);
                return Err(e);
            }
        };

        self.commit("restore", staged)?;
        info!(
            "📥 Restored ledger '{}': supply {}, {} accounts",
            self.storage_key,
            self.state.total_supply,
            self.state.balances.len()
        );
        Ok(())
    }

    /// Parses and restores a JSON document (persisted state or export).
    pub fn restore_json(&mut self, raw: &str) -> Result<()> {
        let persisted = PersistedState::from_json(raw)?;
        self.restore(persisted)
    }
}
