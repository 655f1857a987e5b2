//! Core modules: the store handle, the broker, and the ledger itself.
//!
//! Everything that touches the SQLite file lives here; agent tool modules
//! only call [`ledger`] operations.

pub mod broker;
pub mod config;
pub mod db;
pub mod entry;
pub mod error;
pub mod ledger;
pub mod limits;
pub mod output;
pub mod schemas;
pub mod store;
pub mod time;
