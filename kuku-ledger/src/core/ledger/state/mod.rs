use std::collections::BTreeMap;

use kuku_common::{
    genesis::{self, GENESIS_DESCRIPTION, GENESIS_SUPPLY, HISTORY_LIMIT},
    utils::time::current_time,
    AccountId, Amount, LedgerError, Result,
};

use crate::core::ledger::transaction::{TransactionKind, TransactionRecord};
use crate::core::runtime::snapshot::PersistedState;

/// In-memory accounting state.
///
/// Holds `total_supply == sum(balances)` and `history.len() <= HISTORY_LIMIT`
/// between operations. Mutations are performed on a clone and swapped in
/// once persisted, so a failed step never leaks a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub total_supply: Amount,
    pub balances: BTreeMap<AccountId, Amount>,
    /// Newest first.
    pub history: Vec<TransactionRecord>,
}

impl State {
    /// Whole supply credited to the creator, plus the single system record.
    pub fn genesis() -> Self {
        let creator = genesis::creator();
        let mut balances = BTreeMap::new();
        balances.insert(creator.clone(), GENESIS_SUPPLY);

        let mut state = Self {
            total_supply: GENESIS_SUPPLY,
            balances,
            history: Vec::new(),
        };
        state.record_transaction(
            TransactionKind::System,
            GENESIS_DESCRIPTION.to_string(),
            GENESIS_SUPPLY,
            creator,
        );
        state
    }

    /// Validates a persisted shape and turns it into live state.
    ///
    /// Rejects zero-amount records and any mismatch between `totalSupply`
    /// and the sum of balances. Overlong history keeps the newest records.
    pub fn from_persisted(persisted: PersistedState) -> Result<Self> {
        let PersistedState {
            total_supply,
            balances,
            mut transactions,
            ..
        } = persisted;

        if let Some(record) = transactions.iter().find(|r| r.amount == 0) {
            return Err(LedgerError::MalformedState(format!(
                "transaction '{}' has a zero amount",
                record.description
            )));
        }
        transactions.truncate(HISTORY_LIMIT);

        let sum = balances
            .values()
            .try_fold(0u64, |acc, v| acc.checked_add(*v))
            .ok_or_else(|| LedgerError::MalformedState("balances overflow".to_string()))?;
        if sum != total_supply {
            return Err(LedgerError::MalformedState(format!(
                "totalSupply {} does not match sum of balances {}",
                total_supply, sum
            )));
        }

        Ok(Self {
            total_supply,
            balances,
            history: transactions,
        })
    }

    /// Like [`State::from_persisted`], but state saved with no balances at all
    /// gets its whole supply credited to the creator first.
    pub fn from_loaded(mut persisted: PersistedState) -> Result<Self> {
        if persisted.balances.is_empty() {
            persisted
                .balances
                .insert(genesis::creator(), persisted.total_supply);
        }
        Self::from_persisted(persisted)
    }

    /// Prepends a record stamped now and drops anything beyond the cap.
    /// Returns the new record. Persisting is left to the calling mutation.
    pub fn record_transaction(
        &mut self,
        kind: TransactionKind,
        description: String,
        amount: Amount,
        recipient: AccountId,
    ) -> TransactionRecord {
        let record = TransactionRecord {
            kind,
            description,
            amount,
            recipient,
            timestamp: current_time(),
        };
        self.history.insert(0, record.clone());
        self.history.truncate(HISTORY_LIMIT);
        record
    }

    /// Inserts `id` with a zero balance. Returns false if it already existed.
    pub fn open_account(&mut self, id: &AccountId) -> bool {
        if self.balances.contains_key(id) {
            return false;
        }
        self.balances.insert(id.clone(), 0);
        true
    }

    pub fn balance_of(&self, id: &AccountId) -> Amount {
        self.balances.get(id).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, id: &AccountId, amount: Amount) -> Result<()> {
        let balance = self.balances.entry(id.clone()).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::InvalidAmount)?;
        Ok(())
    }

    pub fn debit(&mut self, id: &AccountId, amount: Amount) -> Result<()> {
        let balance = self.balances.entry(id.clone()).or_insert(0);
        if *balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account: id.clone(),
                balance: *balance,
                requested: amount,
            });
        }
        *balance -= amount;
        Ok(())
    }

    pub fn is_conserved(&self) -> bool {
        self.balances
            .values()
            .try_fold(0u64, |acc, v| acc.checked_add(*v))
            == Some(self.total_supply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> AccountId {
        AccountId::new(s).unwrap()
    }

    #[test]
    fn test_genesis_shape() {
        let state = State::genesis();
        assert_eq!(state.total_supply, 1_000_000);
        assert_eq!(state.balance_of(&id("admin")), 1_000_000);
        assert_eq!(state.balances.len(), 1);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].kind, TransactionKind::System);
        assert!(state.is_conserved());
    }

    #[test]
    fn test_history_is_capped_newest_first() {
        let mut state = State::genesis();
        for i in 1..=30u64 {
            state.record_transaction(TransactionKind::Mint, format!("r{}", i), i, id("dave"));
        }
        assert_eq!(state.history.len(), HISTORY_LIMIT);
        assert_eq!(state.history[0].description, "r30");
        assert_eq!(state.history[19].description, "r11");
    }

    #[test]
    fn test_debit_rejects_overdraft() {
        let mut state = State::genesis();
        let err = state.debit(&id("admin"), 2_000_000).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                account: id("admin"),
                balance: 1_000_000,
                requested: 2_000_000,
            }
        );
        assert_eq!(state.balance_of(&id("admin")), 1_000_000);
    }

    #[test]
    fn test_open_account_is_idempotent() {
        let mut state = State::genesis();
        assert!(state.open_account(&id("alice")));
        assert!(!state.open_account(&id("alice")));
        assert_eq!(state.balance_of(&id("alice")), 0);
    }

    #[test]
    fn test_from_persisted_rejects_unbalanced_supply() {
        let mut persisted = PersistedState::from_state(&State::genesis());
        persisted.total_supply = 5;
        assert!(matches!(
            State::from_persisted(persisted),
            Err(LedgerError::MalformedState(_))
        ));
    }

    #[test]
    fn test_from_loaded_credits_creator_when_balances_empty() {
        let mut persisted = PersistedState::from_state(&State::genesis());
        persisted.balances.clear();
        let state = State::from_loaded(persisted).unwrap();
        assert_eq!(state.balance_of(&id("admin")), 1_000_000);
        assert!(state.is_conserved());
    }
}
