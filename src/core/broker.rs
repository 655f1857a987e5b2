use crate::core::config::{LedgerConfig, StorageConfig};
use crate::core::db;
use crate::core::error;
use crate::core::time;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const AUDIT_LOG_NAME: &str = "broker.events.jsonl";

/// The DB Broker is the single path to the ledger database.
///
/// Each call opens a fresh connection, runs one closure against it, drops the
/// connection on every path, and appends one audit line.
pub struct DbBroker {
    audit_log_path: Option<PathBuf>,
    storage: StorageConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BrokerEvent {
    pub ts: String,
    pub event_id: String,
    pub actor: String,
    pub op: String,
    pub db_id: String,
    pub status: String,
}

pub fn audit_log_path(root: &Path) -> PathBuf {
    root.join(AUDIT_LOG_NAME)
}

impl DbBroker {
    pub fn new(root: &Path, config: &LedgerConfig) -> Self {
        Self {
            audit_log_path: config.audit.enabled.then(|| audit_log_path(root)),
            storage: config.storage.clone(),
        }
    }

    /// Execute a closure with a connection to the specified DB.
    ///
    /// Returns the closure's result unchanged. Audit write failures are
    /// reported on stderr and never replace that result.
    pub fn with_conn<F, R>(
        &self,
        db_path: &Path,
        actor: &str,
        op_name: &str,
        f: F,
    ) -> Result<R, error::LedgerError>
    where
        F: FnOnce(&Connection) -> Result<R, error::LedgerError>,
    {
        // In-process serialization only; other processes go through SQLite locking.
        static DB_LOCK: Mutex<()> = Mutex::new(());
        let _lock = DB_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let db_id = db_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let result = match db::db_connect(db_path, &self.storage) {
            Ok(conn) => f(&conn),
            Err(e) => Err(e),
        };

        // The statement has already run; its outcome is what the caller gets.
        let status = if result.is_ok() { "success" } else { "error" };
        if let Err(e) = self.log_event(actor, op_name, &db_id, status) {
            eprintln!("agentledger: audit log write failed for {op_name}: {e}");
        }

        result
    }

    fn log_event(
        &self,
        actor: &str,
        op: &str,
        db_id: &str,
        status: &str,
    ) -> Result<(), error::LedgerError> {
        let Some(path) = &self.audit_log_path else {
            return Ok(());
        };

        let ev = BrokerEvent {
            ts: time::now_epoch_z(),
            event_id: time::new_event_id(),
            actor: actor.to_string(),
            op: op.to_string(),
            db_id: db_id.to_string(),
            status: status.to_string(),
        };

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(error::LedgerError::IoError)?;

        writeln!(f, "{}", serde_json::to_string(&ev)?).map_err(error::LedgerError::IoError)?;
        Ok(())
    }
}

/// Read every event in the audit log, oldest first. A missing log reads as empty.
pub fn read_audit_log(root: &Path) -> Result<Vec<BrokerEvent>, error::LedgerError> {
    let path = audit_log_path(root);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path).map_err(error::LedgerError::IoError)?;
    let mut events = Vec::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        events.push(serde_json::from_str(line)?);
    }
    Ok(events)
}
