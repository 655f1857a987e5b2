//! Store handle for agentledger's local state.
//!
//! A store is a directory holding the SQLite data file, the broker audit log,
//! and an optional `config.toml`. Every ledger operation takes a `&Store`;
//! there is no global database path.

use crate::core::broker::DbBroker;
use crate::core::config::{self, LedgerConfig};
use crate::core::db;
use crate::core::error::LedgerError;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name that marks a project-scoped store.
pub const STORE_DIR_NAME: &str = ".agentledger";

/// Where a store lives.
///
/// - `User`: agent-local store at `$HOME/.agentledger/`
/// - `Project`: store at `<project>/.agentledger/` (or any explicit directory)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    User,
    Project,
}

#[derive(Debug, Clone)]
pub struct Store {
    pub kind: StoreKind,
    /// Absolute path to the store root directory
    pub root: PathBuf,
    pub config: LedgerConfig,
}

impl Store {
    pub fn db_path(&self) -> PathBuf {
        db::ledger_db_path(&self.root, &self.config)
    }

    pub fn broker(&self) -> DbBroker {
        DbBroker::new(&self.root, &self.config)
    }
}

/// Open (and if needed create) a project store rooted at `root`.
///
/// This is the single initialization step: it creates the directory, loads
/// `config.toml`, and ensures the schema exists. Safe to call from several
/// processes at once.
pub fn open_store(root: &Path) -> Result<Store, LedgerError> {
    open_store_with_kind(root, StoreKind::Project)
}

/// Open the per-user store under `$HOME/.agentledger`.
pub fn open_user_store() -> Result<Store, LedgerError> {
    let home = std::env::var("HOME")?;
    open_store_with_kind(&Path::new(&home).join(STORE_DIR_NAME), StoreKind::User)
}

pub fn open_store_with_kind(root: &Path, kind: StoreKind) -> Result<Store, LedgerError> {
    fs::create_dir_all(root).map_err(LedgerError::IoError)?;
    let config = config::load_config(root)?;
    let store = Store {
        kind,
        root: root.to_path_buf(),
        config,
    };
    db::ensure_schema(&store)?;
    Ok(store)
}

/// Walk up from `start_dir` looking for a directory that contains `.agentledger/`.
pub fn find_project_store(start_dir: &Path) -> Option<PathBuf> {
    let mut current = PathBuf::from(start_dir);
    loop {
        let candidate = current.join(STORE_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
