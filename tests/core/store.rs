use agentledger::core::broker::{self, DbBroker};
use agentledger::core::config::{self, LedgerConfig};
use agentledger::core::error::LedgerError;
use agentledger::core::ledger::{append_journal, list_journals};
use agentledger::core::schemas::LEDGER_TABLES;
use agentledger::core::store::{StoreKind, open_store};
use rusqlite::Connection;
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::tempdir;

#[test]
fn reopening_a_store_sees_earlier_rows() {
    let tmp = tempdir().unwrap();
    {
        let store = open_store(tmp.path()).unwrap();
        append_journal(&store, "A", "persisted", None).unwrap();
    }
    let store = open_store(tmp.path()).unwrap();
    assert_eq!(store.kind, StoreKind::Project);
    let rows = list_journals(&store, 5).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text, "persisted");
}

#[test]
fn open_store_creates_every_ledger_table() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path()).unwrap();
    let conn = Connection::open(store.db_path()).unwrap();
    for table in LEDGER_TABLES {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "missing table {table}");
    }
}

#[test]
fn config_file_renames_data_file_and_disables_audit() {
    let tmp = tempdir().unwrap();
    fs::write(
        config::config_path(tmp.path()),
        "[storage]\ndb_name = \"custom.db\"\n\n[audit]\nenabled = false\n",
    )
    .unwrap();

    let store = open_store(tmp.path()).unwrap();
    append_journal(&store, "A", "x", None).unwrap();

    assert!(tmp.path().join("custom.db").exists());
    assert!(!tmp.path().join("agents_data.db").exists());
    assert!(broker::read_audit_log(tmp.path()).unwrap().is_empty());
}

#[test]
fn malformed_config_is_a_config_error() {
    let tmp = tempdir().unwrap();
    fs::write(config::config_path(tmp.path()), "[storage\n").unwrap();
    let err = open_store(tmp.path()).unwrap_err();
    assert!(matches!(err, LedgerError::ConfigError(_)), "{err}");
}

#[test]
fn write_default_config_does_not_overwrite() {
    let tmp = tempdir().unwrap();
    assert!(config::write_default_config(tmp.path()).unwrap());
    fs::write(config::config_path(tmp.path()), "[audit]\nenabled = false\n").unwrap();
    assert!(!config::write_default_config(tmp.path()).unwrap());
    let loaded = config::load_config(tmp.path()).unwrap();
    assert!(!loaded.audit.enabled);
}

#[test]
fn every_operation_is_audited() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path()).unwrap();
    append_journal(&store, "A", "x", None).unwrap();
    list_journals(&store, 1).unwrap();

    let ops: Vec<String> = broker::read_audit_log(tmp.path())
        .unwrap()
        .into_iter()
        .map(|e| e.op)
        .collect();
    assert_eq!(ops, vec!["ledger.init", "journal.append", "journal.list"]);
}

#[test]
fn storage_errors_surface_instead_of_being_swallowed() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path()).unwrap();
    let conn = Connection::open(store.db_path()).unwrap();
    conn.execute("DROP TABLE journals", []).unwrap();
    drop(conn);

    let err = append_journal(&store, "A", "x", None).unwrap_err();
    assert!(matches!(err, LedgerError::StorageError(_)), "{err}");
}

#[test]
fn unwritable_audit_log_does_not_fail_committed_append() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path()).unwrap();
    let log = broker::audit_log_path(tmp.path());
    fs::remove_file(&log).unwrap();
    fs::create_dir(&log).unwrap();

    let ack = append_journal(&store, "A", "written", None).unwrap();
    assert_eq!(ack.status, "ok");
    let rows = list_journals(&store, 10).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, ack.row_id);
}

#[test]
fn unwritable_audit_log_keeps_storage_error() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path()).unwrap();
    let conn = Connection::open(store.db_path()).unwrap();
    conn.execute("DROP TABLE journals", []).unwrap();
    drop(conn);
    let log = broker::audit_log_path(tmp.path());
    fs::remove_file(&log).unwrap();
    fs::create_dir(&log).unwrap();

    let err = append_journal(&store, "A", "x", None).unwrap_err();
    assert!(matches!(err, LedgerError::StorageError(_)), "{err}");
}

#[test]
fn held_write_lock_reports_contention() {
    let tmp = tempdir().unwrap();
    fs::write(
        config::config_path(tmp.path()),
        "[storage]\nbusy_timeout_ms = 50\n",
    )
    .unwrap();
    let store = open_store(tmp.path()).unwrap();

    let lock_conn = Connection::open(store.db_path()).unwrap();
    lock_conn.execute_batch("BEGIN EXCLUSIVE;").unwrap();

    let blocked = append_journal(&store, "A", "blocked", None);
    let err = blocked.unwrap_err();
    assert!(err.is_contention(), "unexpected error: {err}");

    lock_conn.execute_batch("COMMIT;").unwrap();
    append_journal(&store, "A", "ok", None).unwrap();
    assert_eq!(list_journals(&store, 10).unwrap().len(), 1);
}

#[test]
fn concurrent_schema_initialization_is_safe() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let root = root.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                open_store(&root).map(|_| ())
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap().unwrap();
    }
    let store = open_store(&root).unwrap();
    append_journal(&store, "A", "after race", None).unwrap();
}

#[test]
fn broker_releases_connection_after_error() {
    let tmp = tempdir().unwrap();
    let broker = DbBroker::new(tmp.path(), &LedgerConfig::default());
    let db_path = tmp.path().join("scratch.db");

    let failed: Result<(), LedgerError> = broker.with_conn(&db_path, "test", "bad", |conn| {
        conn.execute_batch("BEGIN; CREATE TABLE t(x); SELECT * FROM missing;")?;
        Ok(())
    });
    assert!(failed.is_err());

    let count: i64 = broker
        .with_conn(&db_path, "test", "after", |conn| {
            conn.execute_batch("CREATE TABLE IF NOT EXISTS t(x); INSERT INTO t VALUES (1);")?;
            Ok(conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))?)
        })
        .unwrap();
    assert_eq!(count, 1);
}
