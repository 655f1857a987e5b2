//! Project manager: tasks, project docs, reminders, git workflow text, and
//! activity summaries.
//!
//! # Task status
//!
//! Tasks are never edited. `update_task_status` appends a `TASK_UPDATE` row and
//! readers resolve the effective status with
//! [`resolve_task_status`](crate::core::entry::resolve_task_status): the update
//! with the highest id naming the task wins.

use crate::core::entry::{self, JournalKind};
use crate::core::error::LedgerError;
use crate::core::ledger::{self, JournalEntry};
use crate::core::limits::clamp_to_usize;
use crate::core::store::Store;
use crate::core::time::tool_envelope;
use crate::plugins::{settle, split_tags};
use serde_json::{Value, json};

pub const AGENT_NAME: &str = "project_manager_agent";
pub const JOURNAL_OWNER: &str = "project_manager";

const ENTRIES_PER_DAY: i64 = 10;
const RECENT_ACTIVITY_LIMIT: usize = 10;

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn entry_json(entry: &JournalEntry) -> Value {
    json!({
        "id": entry.id,
        "entry": entry.text,
        "kind": entry.kind().as_str(),
        "tags": entry.tags,
        "created_at": entry.created_at
    })
}

pub fn add_task(
    store: &Store,
    task_description: &str,
    due_date: &str,
    priority: &str,
    tags: &str,
) -> Value {
    let priority_lc = priority.to_lowercase();
    let mut tag_list = split_tags(tags);
    tag_list.extend(["task".to_string(), priority_lc.clone()]);
    let text = format!(
        "TASK: {task_description}\nDUE: {due_date}\nPRIORITY: {priority}\nSTATUS: pending"
    );
    settle(
        ledger::append_journal(store, JOURNAL_OWNER, &text, Some(&tag_list)).map(|ack| {
            tool_envelope(
                "success",
                json!({
                    "message": format!("Task added: {task_description}"),
                    "task_data": {
                        "id": ack.row_id,
                        "description": task_description,
                        "due_date": due_date,
                        "priority": priority_lc,
                        "status": "pending"
                    }
                }),
            )
        }),
    )
}

/// Project-manager tasks among the newest `limit` entries, with resolved status.
///
/// Updates are resolved against the same window, so an update older than the
/// window is not seen.
pub fn tasks_with_status(
    store: &Store,
    limit: usize,
) -> Result<Vec<(JournalEntry, String)>, LedgerError> {
    let history = ledger::list_journals_by_owner(store, JOURNAL_OWNER, limit)?;
    Ok(history
        .iter()
        .filter(|e| e.kind() == JournalKind::Task)
        .map(|task| (task.clone(), entry::resolve_task_status(task, &history)))
        .collect())
}

pub fn list_tasks(store: &Store, status: &str, limit: i64) -> Value {
    let limit = clamp_to_usize(limit, 1, 100);
    let wanted = status.to_lowercase();
    settle(tasks_with_status(store, limit).map(|tasks| {
        let tasks: Vec<Value> = tasks
            .iter()
            .filter(|(_, current)| wanted == "all" || current.to_lowercase().contains(&wanted))
            .map(|(task, current)| {
                json!({
                    "id": task.id,
                    "entry": task.text,
                    "description": entry::field(&task.text, "TASK"),
                    "status": current,
                    "tags": task.tags,
                    "created_at": task.created_at
                })
            })
            .collect();
        tool_envelope(
            "success",
            json!({ "count": tasks.len(), "tasks": tasks, "filter": status }),
        )
    }))
}

pub fn update_task_status(store: &Store, task_id: i64, new_status: &str) -> Value {
    let text = entry::task_update_text(task_id, new_status);
    settle(
        ledger::append_journal(
            store,
            JOURNAL_OWNER,
            &text,
            Some(&owned(&["task", "update", new_status])),
        )
        .map(|_| {
            tool_envelope(
                "success",
                json!({
                    "message": format!("Task {task_id} status updated to {new_status}"),
                    "task_id": task_id,
                    "new_status": new_status
                }),
            )
        }),
    )
}

pub fn add_project_doc(
    store: &Store,
    doc_title: &str,
    doc_url: &str,
    doc_type: &str,
    description: &str,
) -> Value {
    let text = format!("DOC: {doc_title}\nURL: {doc_url}\nTYPE: {doc_type}\nDESC: {description}");
    settle(
        ledger::append_journal(
            store,
            JOURNAL_OWNER,
            &text,
            Some(&owned(&["documentation", doc_type, "reference"])),
        )
        .map(|_| {
            tool_envelope(
                "success",
                json!({
                    "message": format!("Document added: {doc_title}"),
                    "doc_data": {
                        "title": doc_title,
                        "url": doc_url,
                        "type": doc_type,
                        "description": description
                    }
                }),
            )
        }),
    )
}

pub fn git_workflow_text(branch_name: &str, feature_description: &str) -> String {
    [
        format!("# Git Workflow for {branch_name}"),
        format!("## Feature: {feature_description}"),
        String::new(),
        "### 1. Create and switch to feature branch:".to_string(),
        "```bash".to_string(),
        format!("git checkout -b {branch_name}"),
        "```".to_string(),
        String::new(),
        "### 2. Make your changes and commit:".to_string(),
        "```bash".to_string(),
        "git add .".to_string(),
        format!("git commit -m \"Add: {feature_description}\""),
        "```".to_string(),
        String::new(),
        "### 3. Push branch to remote:".to_string(),
        "```bash".to_string(),
        format!("git push origin {branch_name}"),
        "```".to_string(),
        String::new(),
        "### 4. Create Pull Request:".to_string(),
        "- Go to your repository on GitHub/GitLab".to_string(),
        format!("- Create PR from {branch_name} to main/develop"),
        format!("- Title: {feature_description}"),
        "- Add description and request reviewers".to_string(),
        String::new(),
        "### 5. After PR approval:".to_string(),
        "```bash".to_string(),
        "git checkout main".to_string(),
        "git pull origin main".to_string(),
        format!("git branch -d {branch_name}  # Delete local branch"),
        "```".to_string(),
    ]
    .join("\n")
}

pub fn generate_git_workflow_summary(
    store: &Store,
    branch_name: &str,
    feature_description: &str,
) -> Value {
    let workflow = git_workflow_text(branch_name, feature_description);
    settle(
        ledger::append_journal(
            store,
            JOURNAL_OWNER,
            &format!(
                "{}{branch_name}: {feature_description}",
                entry::GIT_WORKFLOW_PREFIX
            ),
            Some(&owned(&["git", "workflow", "branch"])),
        )
        .map(|_| {
            tool_envelope(
                "success",
                json!({
                    "workflow": workflow,
                    "branch_name": branch_name,
                    "feature": feature_description
                }),
            )
        }),
    )
}

pub fn set_reminder(
    store: &Store,
    reminder_text: &str,
    reminder_date: &str,
    reminder_type: &str,
) -> Value {
    let text = format!("REMINDER: {reminder_text}\nDATE: {reminder_date}\nTYPE: {reminder_type}");
    settle(
        ledger::append_journal(
            store,
            JOURNAL_OWNER,
            &text,
            Some(&owned(&["reminder", reminder_type, "scheduled"])),
        )
        .map(|_| {
            tool_envelope(
                "success",
                json!({
                    "message": format!("Reminder set: {reminder_text}"),
                    "reminder_data": {
                        "text": reminder_text,
                        "date": reminder_date,
                        "type": reminder_type
                    }
                }),
            )
        }),
    )
}

/// Counts over the newest `days_back * 10` project-manager entries.
pub fn get_project_summary(store: &Store, days_back: i64) -> Value {
    let days = days_back.max(1);
    let limit = usize::try_from(days.saturating_mul(ENTRIES_PER_DAY)).unwrap_or(usize::MAX);
    settle(
        ledger::list_journals_by_owner(store, JOURNAL_OWNER, limit).map(|entries| {
            let count = |kind: JournalKind| entries.iter().filter(|e| e.kind() == kind).count();
            let recent: Vec<Value> = entries
                .iter()
                .take(RECENT_ACTIVITY_LIMIT)
                .map(entry_json)
                .collect();
            tool_envelope(
                "success",
                json!({
                    "summary": {
                        "total_entries": entries.len(),
                        "tasks": count(JournalKind::Task),
                        "task_updates": count(JournalKind::TaskUpdate),
                        "docs": count(JournalKind::Document),
                        "reminders": count(JournalKind::Reminder),
                        "git_workflows": count(JournalKind::GitWorkflow),
                        "recent_activity": recent
                    },
                    "days_back": days_back
                }),
            )
        }),
    )
}

pub fn schema() -> Value {
    json!({
        "name": AGENT_NAME,
        "description": "Tracks tasks, project docs, reminders, and git workflows",
        "tools": [
            { "name": "add_task", "parameters": ["task_description", "due_date?", "priority?", "tags?"] },
            { "name": "list_tasks", "parameters": ["status?", "limit?"] },
            { "name": "update_task_status", "parameters": ["task_id", "new_status"] },
            { "name": "add_project_doc", "parameters": ["doc_title", "doc_url", "doc_type?", "description?"] },
            { "name": "generate_git_workflow_summary", "parameters": ["branch_name", "feature_description"] },
            { "name": "set_reminder", "parameters": ["reminder_text", "reminder_date", "reminder_type?"] },
            { "name": "get_project_summary", "parameters": ["days_back?"] },
            { "name": "get_memory", "parameters": ["limit?"] }
        ]
    })
}
