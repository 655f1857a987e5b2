use crate::core::config::{LedgerConfig, StorageConfig};
use crate::core::error;
use crate::core::schemas;
use crate::core::store::Store;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn db_connect(db_path: &Path, storage: &StorageConfig) -> Result<Connection, error::LedgerError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(Duration::from_millis(storage.busy_timeout_ms))
        .map_err(error::LedgerError::StorageError)?;
    if storage.wal {
        conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
            .map_err(error::LedgerError::StorageError)?;
    }
    Ok(conn)
}

pub fn ledger_db_path(root: &Path, config: &LedgerConfig) -> PathBuf {
    root.join(&config.storage.db_name)
}

/// Create the journal, playlist and conversation tables if absent.
///
/// Every statement is `CREATE TABLE IF NOT EXISTS`, so repeated or racing calls are no-ops.
pub fn ensure_schema(store: &Store) -> Result<(), error::LedgerError> {
    let db_path = store.db_path();
    store
        .broker()
        .with_conn(&db_path, "agentledger", "ledger.init", |conn| {
            for ddl in schemas::LEDGER_DB_SCHEMA {
                conn.execute(ddl, [])?;
            }
            Ok(())
        })
}
