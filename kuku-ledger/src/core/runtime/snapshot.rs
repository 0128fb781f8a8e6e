use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kuku_common::{
    genesis::{EXPORT_VERSION, GENESIS_SUPPLY, TOKEN_NAME, TOKEN_SYMBOL},
    utils::time::current_time,
    AccountId, Amount, LedgerError, Result,
};
use serde::{Deserialize, Serialize};

use crate::core::ledger::state::State;
use crate::core::ledger::transaction::TransactionRecord;

fn default_supply() -> Amount {
    GENESIS_SUPPLY
}

/// The storage format, and the core of the import/export format.
///
/// `balances` and `transactions` are required and must not be null;
/// extra fields such as the export metadata are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default = "default_supply")]
    pub total_supply: Amount,
    pub balances: BTreeMap<AccountId, Amount>,
    /// Newest first.
    pub transactions: Vec<TransactionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl PersistedState {
    pub fn from_state(state: &State) -> Self {
        Self {
            total_supply: state.total_supply,
            balances: state.balances.clone(),
            transactions: state.history.clone(),
            last_updated: Some(current_time()),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parses a candidate import, mapping every shape problem to `MalformedState`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        for field in ["balances", "transactions"] {
            match value.get(field) {
                None | Some(serde_json::Value::Null) => {
                    return Err(LedgerError::MalformedState(format!(
                        "missing required field '{}'",
                        field
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// What `export` writes: the persisted state plus token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub token_name: String,
    pub token_symbol: String,
    #[serde(flatten)]
    pub state: PersistedState,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

impl ExportDocument {
    pub fn new(state: PersistedState) -> Self {
        Self {
            token_name: TOKEN_NAME.to_string(),
            token_symbol: TOKEN_SYMBOL.to_string(),
            state,
            export_date: current_time(),
            version: EXPORT_VERSION.to_string(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_keys_are_camel_case() {
        let persisted = PersistedState::from_state(&State::genesis());
        let value = serde_json::to_value(&persisted).unwrap();
        assert_eq!(value["totalSupply"], 1_000_000);
        assert_eq!(value["balances"]["admin"], 1_000_000);
        assert_eq!(value["transactions"][0]["type"], "system");
        assert!(value["lastUpdated"].is_string());
    }

    #[test]
    fn test_missing_or_null_fields_are_malformed() {
        let raw = r#"{"totalSupply": 10, "transactions": []}"#;
        assert!(matches!(PersistedState::from_json(raw), Err(LedgerError::MalformedState(_))));

        let raw = r#"{"balances": {"a": 1}, "transactions": null}"#;
        assert!(matches!(PersistedState::from_json(raw), Err(LedgerError::MalformedState(_))));

        let raw = r#"{"balances": {"a": -1}, "transactions": []}"#;
        assert!(matches!(PersistedState::from_json(raw), Err(LedgerError::MalformedState(_))));
    }

    #[test]
    fn test_total_supply_defaults_when_absent() {
        let raw = r#"{"balances": {"admin": 1000000}, "transactions": []}"#;
        let persisted = PersistedState::from_json(raw).unwrap();
        assert_eq!(persisted.total_supply, 1_000_000);
        assert_eq!(persisted.last_updated, None);
    }

    #[test]
    fn test_export_document_is_importable() {
        let doc = ExportDocument::new(PersistedState::from_state(&State::genesis()));
        let raw = doc.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["tokenName"], "KuKu Coin");
        assert_eq!(value["tokenSymbol"], "K");
        assert_eq!(value["version"], "1.0");

        let back = PersistedState::from_json(&raw).unwrap();
        assert_eq!(back, doc.state);
    }
}
