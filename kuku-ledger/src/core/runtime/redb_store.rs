use redb::{Database, ReadableTable, TableDefinition};
use std::fmt;
use std::path::Path;

use crate::core::runtime::store::{StateStore, StoreError};

const STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("state");

pub const DB_FILE_NAME: &str = "kuku.redb";

/// Single-file redb store under `data_dir`. Every write is its own
/// committed transaction.
pub struct RedbStore {
    db: Database,
}

impl fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedbStore")
            .field("db", &"Redb")
            .finish()
    }
}

impl RedbStore {
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(DB_FILE_NAME);

        let db = Database::create(path).map_err(StoreError::backend)?;

        // Create the table up front so read transactions can always open it.
        let write_txn = db.begin_write().map_err(StoreError::backend)?;
        {
            let _table = write_txn.open_table(STATE_TABLE).map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;

        Ok(Self { db })
    }
}

impl StateStore for RedbStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = read_txn.open_table(STATE_TABLE).map_err(StoreError::backend)?;

        let value = table
            .get(key)
            .map_err(StoreError::backend)?
            .map(|guard| guard.value().to_vec());
        Ok(value)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write().map_err(StoreError::backend)?;
        {
            let mut table = write_txn.open_table(STATE_TABLE).map_err(StoreError::backend)?;
            table.insert(key, bytes).map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;
        Ok(())
    }
}
