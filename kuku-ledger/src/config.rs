use std::path::{Path, PathBuf};
use std::{fs, io};

use kuku_common::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::runtime::redb_store::RedbStore;
use crate::interface::service::{MintPolicy, TokenService};
use crate::{Ledger, DEFAULT_STORAGE_KEY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub mint_policy: MintPolicy,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            mint_policy: MintPolicy::default(),
            log_filter: None,
        }
    }
}

impl Config {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, json)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str::<Config>(&data)
            .map_err(|e| LedgerError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Loads `path` if it exists, otherwise falls back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn open_ledger(&self) -> Result<Ledger<RedbStore>> {
        let store = RedbStore::open(&self.data_dir)
            .map_err(|e| LedgerError::persistence("open storage", e))?;
        Ledger::open(store, self.storage_key.clone())
    }

    pub fn service(&self) -> TokenService {
        TokenService::new(self.mint_policy)
    }
}
