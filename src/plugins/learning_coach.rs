//! Learning coach: step-by-step lessons, quizzes, and reflection journaling.

use crate::core::ledger;
use crate::core::store::Store;
use crate::core::time::tool_envelope;
use crate::plugins::{settle, split_tags};
use serde_json::{Value, json};

pub const AGENT_NAME: &str = "learning_coach_agent";
pub const JOURNAL_OWNER: &str = "learning_coach";

const MAX_STEPS: i64 = 10;
const DEFAULT_STEPS: i64 = 3;

pub fn create_lesson(topic: &str, level: &str, steps: i64) -> Value {
    let level = if level.is_empty() { "beginner" } else { level };
    let steps = if steps < 1 { DEFAULT_STEPS } else { steps.min(MAX_STEPS) };
    let lesson = (1..=steps)
        .map(|i| format!("Step {i}: A short actionable explanation for {topic} (level={level})"))
        .collect::<Vec<_>>()
        .join("\n");
    tool_envelope("success", json!({ "lesson": lesson }))
}

pub fn generate_quiz(topic: &str, num_questions: i64) -> Value {
    let count = if num_questions < 1 {
        DEFAULT_STEPS
    } else {
        num_questions.min(MAX_STEPS)
    };
    let quiz: Vec<String> = (1..=count)
        .map(|i| format!("Q{i}. Brief question about {topic} (short answer)"))
        .collect();
    tool_envelope("success", json!({ "quiz": quiz }))
}

pub fn journal(store: &Store, entry: &str, tags: &str) -> Value {
    let tag_list = split_tags(tags);
    let tags = (!tag_list.is_empty()).then_some(tag_list.as_slice());
    settle(
        ledger::append_journal(store, JOURNAL_OWNER, entry, tags)
            .map(|_| tool_envelope("saved", json!({ "entry": entry }))),
    )
}

pub fn schema() -> Value {
    json!({
        "name": AGENT_NAME,
        "description": "A tutor that creates short lessons, quizzes, and records reflection journals",
        "tools": [
            { "name": "create_lesson", "parameters": ["topic", "level", "steps"] },
            { "name": "generate_quiz", "parameters": ["topic", "num_questions"] },
            { "name": "journal", "parameters": ["entry", "tags"] },
            { "name": "get_memory", "parameters": ["limit?"] }
        ]
    })
}
