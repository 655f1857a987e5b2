//! Table definitions for the ledger database.
//!
//! All three tables are append-only. `id` is the only ordering key; `created_at`
//! is stored for display and never sorted on. `tags` and `items` hold JSON text.

pub const JOURNALS_TABLE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS journals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        agent TEXT,
        entry TEXT,
        tags TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
";

pub const PLAYLISTS_TABLE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS playlists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        items TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
";

pub const AGENT_RESPONSES_TABLE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS agent_responses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        agent TEXT,
        user_message TEXT,
        agent_response TEXT,
        session_id TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
";

pub const LEDGER_DB_SCHEMA: &[&str] = &[
    JOURNALS_TABLE_SCHEMA,
    PLAYLISTS_TABLE_SCHEMA,
    AGENT_RESPONSES_TABLE_SCHEMA,
];

pub const LEDGER_TABLES: &[&str] = &["journals", "playlists", "agent_responses"];
