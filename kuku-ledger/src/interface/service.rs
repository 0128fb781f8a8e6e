//! Caller-facing operations.
//!
//! The ledger is passed in explicitly and the logged-in user travels as a
//! [`Session`] value; neither lives in global state.

use kuku_common::{genesis, AccountId, Amount, LedgerError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::ledger::transaction::Receipt;
use crate::core::runtime::snapshot::ExportDocument;
use crate::core::runtime::store::StateStore;
use crate::Ledger;

/// Who may mint. The ledger itself never checks; this is the call-site gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MintPolicy {
    #[default]
    Open,
    CreatorOnly,
}

impl MintPolicy {
    pub fn authorize(&self, session: &Session) -> Result<()> {
        match self {
            MintPolicy::Open => Ok(()),
            MintPolicy::CreatorOnly if session.user() == &genesis::creator() => Ok(()),
            MintPolicy::CreatorOnly => Err(LedgerError::Unauthorized {
                account: session.user().clone(),
            }),
        }
    }
}

/// The "current user" context. No authentication is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: AccountId,
}

impl Session {
    pub fn user(&self) -> &AccountId {
        &self.user
    }

    pub fn require(session: Option<&Session>) -> Result<&Session> {
        session.ok_or(LedgerError::NotLoggedIn)
    }
}

/// Raw user-entered amounts may be zero or negative; only positive ones pass.
pub fn positive_amount(raw: i64) -> Result<Amount> {
    if raw <= 0 {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(raw as Amount)
}

#[derive(Debug, Clone, Default)]
pub struct TokenService {
    mint_policy: MintPolicy,
}

impl TokenService {
    pub fn new(mint_policy: MintPolicy) -> Self {
        Self { mint_policy }
    }

    pub fn login<S: StateStore>(&self, ledger: &mut Ledger<S>, id: &str) -> Result<Session> {
        let user = AccountId::new(id)?;
        ledger.ensure_account_exists(&user)?;
        debug!("🔑 Session opened for {}", user);
        Ok(Session { user })
    }

    pub fn logout(&self, session: Session) {
        debug!("🔒 Session closed for {}", session.user);
    }

    pub fn check_balance<S: StateStore>(&self, ledger: &mut Ledger<S>, id: &str) -> Result<Amount> {
        let id = AccountId::new(id)?;
        ledger.get_balance(&id)
    }

    pub fn transfer<S: StateStore>(
        &self,
        ledger: &mut Ledger<S>,
        session: &Session,
        to: &str,
        amount: i64,
    ) -> Result<Receipt> {
        let to = AccountId::new(to)?;
        let amount = positive_amount(amount)?;
        if &to == session.user() {
            warn!("Rejected self-transfer by {}", to);
            return Err(LedgerError::SelfTransfer);
        }
        ledger.transfer(session.user(), &to, amount)
    }

    pub fn mint<S: StateStore>(
        &self,
        ledger: &mut Ledger<S>,
        session: &Session,
        to: &str,
        amount: i64,
    ) -> Result<Receipt> {
        let to = AccountId::new(to)?;
        let amount = positive_amount(amount)?;
        if let Err(e) = self.mint_policy.authorize(session) {
            warn!("Rejected mint: {}", e);
            return Err(e);
        }
        ledger.mint(&to, amount)
    }

    pub fn export_state<S: StateStore>(&self, ledger: &Ledger<S>) -> ExportDocument {
        ExportDocument::new(ledger.serialize())
    }

    pub fn import_state<S: StateStore>(&self, ledger: &mut Ledger<S>, raw: &str) -> Result<()> {
        ledger.restore_json(raw)
    }

    pub fn reset_all<S: StateStore>(&self, ledger: &mut Ledger<S>) -> Result<()> {
        ledger.reset()?;
        info!("🧹 All ledger data reset to defaults");
        Ok(())
    }
}
