//! Typed view over free-form journal text.
//!
//! Journal rows stay free text on disk. Agents mark sub-kinds with a leading
//! prefix (`TASK:`, `DOC:`, ...) and `KEY: value` lines; this module reads
//! them back as a [`JournalKind`] with a `Note` fallback for anything else.

use crate::core::ledger::JournalEntry;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const TASK_PREFIX: &str = "TASK:";
pub const TASK_UPDATE_PREFIX: &str = "TASK_UPDATE:";
pub const DOC_PREFIX: &str = "DOC:";
pub const REMINDER_PREFIX: &str = "REMINDER:";
pub const SNIPPET_PREFIX: &str = "TITLE:";
pub const GIT_WORKFLOW_PREFIX: &str = "Git workflow for ";

static TASK_UPDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^TASK_UPDATE: Task ID (\d+) status changed to (.+)$")
        .expect("task update pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalKind {
    Task,
    TaskUpdate,
    Document,
    Reminder,
    Snippet,
    GitWorkflow,
    Note,
}

impl JournalKind {
    pub fn of(text: &str) -> Self {
        if text.starts_with(TASK_UPDATE_PREFIX) {
            JournalKind::TaskUpdate
        } else if text.starts_with(TASK_PREFIX) {
            JournalKind::Task
        } else if text.starts_with(DOC_PREFIX) {
            JournalKind::Document
        } else if text.starts_with(REMINDER_PREFIX) {
            JournalKind::Reminder
        } else if text.starts_with(SNIPPET_PREFIX) {
            JournalKind::Snippet
        } else if text.starts_with(GIT_WORKFLOW_PREFIX) {
            JournalKind::GitWorkflow
        } else {
            JournalKind::Note
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JournalKind::Task => "task",
            JournalKind::TaskUpdate => "task_update",
            JournalKind::Document => "document",
            JournalKind::Reminder => "reminder",
            JournalKind::Snippet => "snippet",
            JournalKind::GitWorkflow => "git_workflow",
            JournalKind::Note => "note",
        }
    }
}

/// Value of the first `KEY: value` line in `text`, trimmed. Empty values read as `Some("")`.
pub fn field<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        line.strip_prefix(key)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(str::trim)
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub task_id: i64,
    pub new_status: String,
}

pub fn parse_task_update(text: &str) -> Option<TaskUpdate> {
    let caps = TASK_UPDATE_RE.captures(text.trim_end())?;
    Some(TaskUpdate {
        task_id: caps.get(1)?.as_str().parse().ok()?,
        new_status: caps.get(2)?.as_str().trim().to_string(),
    })
}

pub fn task_update_text(task_id: i64, new_status: &str) -> String {
    format!("TASK_UPDATE: Task ID {task_id} status changed to {new_status}")
}

/// Effective status of a task entry.
///
/// The `TASK_UPDATE` row with the highest id naming this task wins; with no
/// updates the task's own `STATUS:` line applies (`pending` if missing).
pub fn resolve_task_status(task: &JournalEntry, history: &[JournalEntry]) -> String {
    history
        .iter()
        .filter_map(|e| parse_task_update(&e.text).map(|u| (e.id, u)))
        .filter(|(_, u)| u.task_id == task.id)
        .max_by_key(|(id, _)| *id)
        .map(|(_, u)| u.new_status)
        .unwrap_or_else(|| {
            field(&task.text, "STATUS")
                .filter(|s| !s.is_empty())
                .unwrap_or("pending")
                .to_string()
        })
}
