//! Conversation memory tool shared by every agent.
//!
//! Each agent reads its own window of recent turns, keyed by its agent name.

use crate::core::ledger::{self, ConversationTurn};
use crate::core::limits::clamp_memory_limit;
use crate::core::store::Store;
use crate::core::time::tool_envelope;
use crate::plugins::settle;
use serde_json::{Value, json};

pub const DEFAULT_MEMORY_LIMIT: i64 = 5;

fn turn_json(turn: &ConversationTurn) -> Value {
    json!({
        "id": turn.id,
        "user_message": turn.user_message,
        "agent_response": turn.agent_response,
        "session_id": turn.session_id,
        "created_at": turn.created_at
    })
}

/// `{status, conversations, count, formatted_context}` for `owner`'s last turns,
/// oldest first. `limit` is clamped to `[1, 10]`.
pub fn get_memory(store: &Store, owner: &str, limit: i64) -> Value {
    let limit = clamp_memory_limit(limit);
    settle(ledger::recent_conversation(store, owner, limit).map(|turns| {
        let conversations: Vec<Value> = turns.iter().map(turn_json).collect();
        tool_envelope(
            "success",
            json!({
                "count": conversations.len(),
                "conversations": conversations,
                "formatted_context": ledger::render_context(&turns)
            }),
        )
    }))
}

pub fn save_agent_response(
    store: &Store,
    owner: &str,
    user_message: &str,
    agent_response: &str,
    session_id: Option<&str>,
) -> Value {
    settle(
        ledger::append_conversation_turn(store, owner, user_message, agent_response, session_id)
            .map(|ack| tool_envelope(ack.status, json!({}))),
    )
}
