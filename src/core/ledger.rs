//! The local event log: journals, playlists, and conversation turns.
//!
//! Every table is append-only and ordered by `id` alone. Reads are bounded by
//! a caller-supplied limit and return newest first, except
//! [`recent_conversation`], which returns the window in chronological order
//! for prompt context.

use crate::core::entry::JournalKind;
use crate::core::error::LedgerError;
use crate::core::limits;
use crate::core::store::Store;
use rusqlite::types::Type;
use rusqlite::{Row, params};
use serde::{Deserialize, Serialize};

pub const NO_HISTORY_SENTINEL: &str = "No previous conversation history.";
pub const CONTEXT_HEADER: &str = "Recent conversation history:";
pub const TURN_DELIMITER: &str = "---";

const ACTOR: &str = "agentledger";

/// Acknowledgement for a successful append. Serializes as `{"status": "ok"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ack {
    #[serde(skip)]
    pub row_id: i64,
    pub status: &'static str,
}

impl Ack {
    fn ok(row_id: i64) -> Self {
        Self {
            row_id,
            status: "ok",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub owner: String,
    pub text: String,
    pub tags: Option<Vec<String>>,
    pub created_at: String,
}

impl JournalEntry {
    pub fn kind(&self) -> JournalKind {
        JournalKind::of(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    pub items: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: i64,
    pub owner: String,
    pub user_message: String,
    pub agent_response: String,
    pub session_id: Option<String>,
    pub created_at: String,
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn decode_json_column<T: serde::de::DeserializeOwned>(
    row: &Row,
    idx: usize,
) -> Result<T, rusqlite::Error> {
    let raw: Option<String> = row.get(idx)?;
    let raw = raw.unwrap_or_else(|| "null".to_string());
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_journal(row: &Row) -> Result<JournalEntry, rusqlite::Error> {
    Ok(JournalEntry {
        id: row.get(0)?,
        owner: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        text: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        tags: decode_json_column(row, 3)?,
        created_at: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

fn row_to_playlist(row: &Row) -> Result<Playlist, rusqlite::Error> {
    let items: Option<Vec<String>> = decode_json_column(row, 2)?;
    Ok(Playlist {
        id: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        items: items.unwrap_or_default(),
        created_at: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

fn row_to_turn(row: &Row) -> Result<ConversationTurn, rusqlite::Error> {
    Ok(ConversationTurn {
        id: row.get(0)?,
        owner: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        user_message: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        agent_response: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        session_id: row.get(4)?,
        created_at: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}

// --- Journals ---

pub fn append_journal(
    store: &Store,
    owner: &str,
    text: &str,
    tags: Option<&[String]>,
) -> Result<Ack, LedgerError> {
    let tags_json = serde_json::to_string(&tags)?;
    let row_id = store
        .broker()
        .with_conn(&store.db_path(), ACTOR, "journal.append", |conn| {
            conn.execute(
                "INSERT INTO journals (agent, entry, tags) VALUES (?1, ?2, ?3)",
                params![owner, text, tags_json],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
    Ok(Ack::ok(row_id))
}

pub fn list_journals(store: &Store, limit: usize) -> Result<Vec<JournalEntry>, LedgerError> {
    store
        .broker()
        .with_conn(&store.db_path(), ACTOR, "journal.list", |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, agent, entry, tags, created_at FROM journals
                 ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![sql_limit(limit)], row_to_journal)?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
}

pub fn list_journals_by_owner(
    store: &Store,
    owner: &str,
    limit: usize,
) -> Result<Vec<JournalEntry>, LedgerError> {
    store
        .broker()
        .with_conn(&store.db_path(), ACTOR, "journal.list_by_owner", |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, agent, entry, tags, created_at FROM journals
                 WHERE agent = ?1 ORDER BY id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![owner, sql_limit(limit)], row_to_journal)?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
}

/// Case-sensitive substring search over the entry text and the serialized tags.
///
/// Uses `instr` rather than `LIKE`: SQLite's `LIKE` folds ASCII case and treats
/// `%`/`_` in the term as wildcards.
pub fn search_journals(
    store: &Store,
    term: &str,
    limit: usize,
) -> Result<Vec<JournalEntry>, LedgerError> {
    store
        .broker()
        .with_conn(&store.db_path(), ACTOR, "journal.search", |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, agent, entry, tags, created_at FROM journals
                 WHERE instr(entry, ?1) > 0 OR instr(tags, ?1) > 0
                 ORDER BY id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![term, sql_limit(limit)], row_to_journal)?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
}

// --- Playlists ---

pub fn append_playlist(store: &Store, name: &str, items: &[String]) -> Result<Ack, LedgerError> {
    let items_json = serde_json::to_string(items)?;
    let row_id = store
        .broker()
        .with_conn(&store.db_path(), ACTOR, "playlist.append", |conn| {
            conn.execute(
                "INSERT INTO playlists (name, items) VALUES (?1, ?2)",
                params![name, items_json],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
    Ok(Ack::ok(row_id))
}

pub fn list_playlists(store: &Store, limit: usize) -> Result<Vec<Playlist>, LedgerError> {
    store
        .broker()
        .with_conn(&store.db_path(), ACTOR, "playlist.list", |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, items, created_at FROM playlists ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![sql_limit(limit)], row_to_playlist)?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
}

// --- Conversation memory ---

pub fn append_conversation_turn(
    store: &Store,
    owner: &str,
    user_message: &str,
    agent_response: &str,
    session_id: Option<&str>,
) -> Result<Ack, LedgerError> {
    let row_id = store
        .broker()
        .with_conn(&store.db_path(), ACTOR, "memory.append", |conn| {
            conn.execute(
                "INSERT INTO agent_responses (agent, user_message, agent_response, session_id)
                 VALUES (?1, ?2, ?3, ?4)",
                params![owner, user_message, agent_response, session_id],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
    Ok(Ack::ok(row_id))
}

/// The last `limit` turns for `owner`, oldest first. `limit` is clamped to `[1, 10]`.
pub fn recent_conversation(
    store: &Store,
    owner: &str,
    limit: i64,
) -> Result<Vec<ConversationTurn>, LedgerError> {
    let limit = limits::clamp_memory_limit(limit);
    let mut turns = store
        .broker()
        .with_conn(&store.db_path(), ACTOR, "memory.recent", |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, agent, user_message, agent_response, session_id, created_at
                 FROM agent_responses
                 WHERE agent = ?1
                 ORDER BY id DESC
                 LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![owner, limit], row_to_turn)?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })?;
    turns.reverse();
    Ok(turns)
}

/// Render turns as `User:` / `You:` lines, each pair followed by a `---` delimiter.
pub fn render_context(turns: &[ConversationTurn]) -> String {
    if turns.is_empty() {
        return NO_HISTORY_SENTINEL.to_string();
    }
    let mut parts = vec![CONTEXT_HEADER.to_string()];
    for turn in turns {
        parts.push(format!("User: {}", turn.user_message));
        parts.push(format!("You: {}", turn.agent_response));
        parts.push(TURN_DELIMITER.to_string());
    }
    parts.join("\n")
}

pub fn format_conversation_as_context(
    store: &Store,
    owner: &str,
    limit: i64,
) -> Result<String, LedgerError> {
    let turns = recent_conversation(store, owner, limit)?;
    Ok(render_context(&turns))
}
