use kuku_common::{genesis::TOKEN_SYMBOL, AccountId, Amount, LedgerError, Result};
use tracing::{debug, warn};

use crate::core::ledger::transaction::{Receipt, TransactionKind};
use crate::core::runtime::store::StateStore;
use crate::Ledger;

impl<S: StateStore> Ledger<S> {
    /// Materializes `id` with a zero balance if it is unknown, persisting the creation.
    pub fn ensure_account_exists(&mut self, id: &AccountId) -> Result<()> {
        if self.state.balances.contains_key(id) {
            return Ok(());
        }

        let mut staged = self.state.clone();
        staged.open_account(id);
        self.commit("account creation", staged)?;
        debug!("👤 Created account {}", id);
        Ok(())
    }

    pub fn get_balance(&mut self, id: &AccountId) -> Result<Amount> {
        self.ensure_account_exists(id)?;
        Ok(self.state.balance_of(id))
    }

    /// Moves `amount` from `from` to `to`. Supply is unchanged.
    ///
    /// Both accounts are created (and persisted) before the funds check,
    /// so they exist afterwards even if the transfer is rejected.
    pub fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<Receipt> {
        if amount == 0 {
            warn!("Rejected transfer {} → {}: zero amount", from, to);
            return Err(LedgerError::InvalidAmount);
        }

        self.ensure_account_exists(from)?;
        self.ensure_account_exists(to)?;

        let mut staged = self.state.clone();
        if let Err(e) = staged.debit(from, amount) {
            warn!("Rejected transfer {} → {}: {}", from, to, e);
            return Err(e);
        }
        staged.credit(to, amount)?;
        let record = staged.record_transaction(
            TransactionKind::Transfer,
            format!("{} → {}", from, to),
            amount,
            to.clone(),
        );

        self.commit("transfer", staged)?;
        debug!("🔁 Transfer {} → {}: {}", from, to, amount);

        Ok(Receipt {
            message: format!("Transfer successful! Sent {} {} to {}", amount, TOKEN_SYMBOL, to),
            record,
        })
    }

    /// Credits `to` with newly issued tokens, growing the total supply.
    ///
    /// No authorization is applied here; see `interface::service::MintPolicy`.
    pub fn mint(&mut self, to: &AccountId, amount: Amount) -> Result<Receipt> {
        if amount == 0 {
            warn!("Rejected mint to {}: zero amount", to);
            return Err(LedgerError::InvalidAmount);
        }

        self.ensure_account_exists(to)?;

        let mut staged = self.state.clone();
        staged.total_supply = match staged.total_supply.checked_add(amount) {
            Some(supply) => supply,
            None => {
                warn!("Rejected mint to {}: supply would overflow", to);
                return Err(LedgerError::InvalidAmount);
            }
        };
        staged.credit(to, amount)?;
        let record = staged.record_transaction(
            TransactionKind::Mint,
            format!("Minted to {}", to),
            amount,
            to.clone(),
        );

        self.commit("mint", staged)?;
        debug!("🪙 Minted {} to {} (supply {})", amount, to, self.state.total_supply);

        Ok(Receipt {
            message: format!("Minted {} {} tokens to {}", amount, TOKEN_SYMBOL, to),
            record,
        })
    }
}
