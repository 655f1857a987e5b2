//! Agent registration and tool dispatch.
//!
//! Adding a new agent: append one entry to `AGENTS` and one arm to `dispatch`.

use crate::core::limits::lenient_int;
use crate::core::store::Store;
use crate::plugins::{
    coding, content_creator, learning_coach, memory, project_manager, tool_error,
};
use serde_json::{Value, json};

pub struct AgentSpec {
    /// Agent name; also the owner key of its conversation memory.
    pub name: &'static str,
    /// Owner key of the agent's journal rows, if it writes any.
    pub journal_owner: Option<&'static str>,
    pub schema: fn() -> Value,
}

pub const AGENTS: &[AgentSpec] = &[
    AgentSpec {
        name: learning_coach::AGENT_NAME,
        journal_owner: Some(learning_coach::JOURNAL_OWNER),
        schema: learning_coach::schema,
    },
    AgentSpec {
        name: content_creator::AGENT_NAME,
        journal_owner: None,
        schema: content_creator::schema,
    },
    AgentSpec {
        name: coding::AGENT_NAME,
        journal_owner: Some(coding::JOURNAL_OWNER),
        schema: coding::schema,
    },
    AgentSpec {
        name: project_manager::AGENT_NAME,
        journal_owner: Some(project_manager::JOURNAL_OWNER),
        schema: project_manager::schema,
    },
];

pub fn find_agent(name: &str) -> Option<&'static AgentSpec> {
    AGENTS.iter().find(|a| a.name == name)
}

pub fn agent_schema(name: &str) -> Option<Value> {
    find_agent(name).map(|a| (a.schema)())
}

pub fn schema() -> Value {
    let agents: Vec<Value> = AGENTS.iter().map(|a| (a.schema)()).collect();
    json!({ "agents": agents })
}

/// Tool arguments as a JSON object. String arguments accept JSON numbers and
/// booleans by their textual form; numeric arguments go through `lenient_int`.
struct Args<'a>(&'a Value);

impl<'a> Args<'a> {
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    fn opt_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn str_or(&self, key: &str, default: &str) -> String {
        self.opt_str(key).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, key: &str) -> Result<String, Value> {
        self.opt_str(key)
            .ok_or_else(|| tool_error(format!("missing required argument '{key}'")))
    }

    fn int_or(&self, key: &str, default: i64) -> i64 {
        lenient_int(self.get(key), default)
    }
}

/// Call `tool` on `agent` with a JSON object of named arguments.
///
/// Always returns a tool result mapping; unknown agents, unknown tools, and
/// missing required arguments come back as `status: error`.
pub fn call_tool(store: &Store, agent: &str, tool: &str, args: &Value) -> Value {
    if !args.is_object() && !args.is_null() {
        return tool_error("tool arguments must be a JSON object");
    }
    let Some(spec) = find_agent(agent) else {
        return tool_error(format!("unknown agent '{agent}'"));
    };
    let args = Args(args);
    if tool == "get_memory" {
        return memory::get_memory(
            store,
            spec.name,
            args.int_or("limit", memory::DEFAULT_MEMORY_LIMIT),
        );
    }
    dispatch(store, spec.name, tool, &args).unwrap_or_else(|err| err)
}

fn dispatch(store: &Store, agent: &str, tool: &str, args: &Args) -> Result<Value, Value> {
    let out = match (agent, tool) {
        (learning_coach::AGENT_NAME, "create_lesson") => learning_coach::create_lesson(
            &args.required("topic")?,
            &args.str_or("level", "beginner"),
            args.int_or("steps", 3),
        ),
        (learning_coach::AGENT_NAME, "generate_quiz") => learning_coach::generate_quiz(
            &args.required("topic")?,
            args.int_or("num_questions", 3),
        ),
        (learning_coach::AGENT_NAME, "journal") => learning_coach::journal(
            store,
            &args.required("entry")?,
            &args.str_or("tags", ""),
        ),

        (content_creator::AGENT_NAME, "generate_caption") => content_creator::generate_caption(
            &args.required("text")?,
            &args.str_or("tone", "casual"),
        ),
        (content_creator::AGENT_NAME, "make_playlist") => content_creator::make_playlist(
            store,
            &args.required("genres")?,
            args.int_or("length", 10),
        ),
        (content_creator::AGENT_NAME, "script_outline") => content_creator::script_outline(
            &args.required("topic")?,
            args.int_or("duration_seconds", 60),
        ),

        (coding::AGENT_NAME, "generate_django_model") => coding::generate_django_model(
            store,
            &args.required("model_name")?,
            &args.required("fields")?,
            &args.str_or("description", ""),
        ),
        (coding::AGENT_NAME, "debug_python_code") => coding::debug_python_code(
            store,
            &args.required("code_snippet")?,
            &args.required("error_description")?,
        ),
        (coding::AGENT_NAME, "generate_test_cases") => coding::generate_test_cases(
            store,
            &args.required("function_name")?,
            &args.required("function_description")?,
            args.int_or("test_count", 3),
        ),
        (coding::AGENT_NAME, "save_code_snippet") => coding::save_code_snippet(
            store,
            &args.required("title")?,
            &args.required("code")?,
            &args.str_or("language", "python"),
            &args.str_or("tags", ""),
        ),
        (coding::AGENT_NAME, "get_coding_history") => {
            coding::get_coding_history(store, args.int_or("limit", 10))
        }

        (project_manager::AGENT_NAME, "add_task") => project_manager::add_task(
            store,
            &args.required("task_description")?,
            &args.str_or("due_date", ""),
            &args.str_or("priority", "medium"),
            &args.str_or("tags", ""),
        ),
        (project_manager::AGENT_NAME, "list_tasks") => project_manager::list_tasks(
            store,
            &args.str_or("status", "all"),
            args.int_or("limit", 20),
        ),
        (project_manager::AGENT_NAME, "update_task_status") => {
            let task_id = args
                .get("task_id")
                .map(|v| lenient_int(Some(v), -1))
                .filter(|id| *id > 0)
                .ok_or_else(|| tool_error("argument 'task_id' must be a positive integer"))?;
            project_manager::update_task_status(store, task_id, &args.required("new_status")?)
        }
        (project_manager::AGENT_NAME, "add_project_doc") => project_manager::add_project_doc(
            store,
            &args.required("doc_title")?,
            &args.required("doc_url")?,
            &args.str_or("doc_type", "general"),
            &args.str_or("description", ""),
        ),
        (project_manager::AGENT_NAME, "generate_git_workflow_summary") => {
            project_manager::generate_git_workflow_summary(
                store,
                &args.required("branch_name")?,
                &args.required("feature_description")?,
            )
        }
        (project_manager::AGENT_NAME, "set_reminder") => project_manager::set_reminder(
            store,
            &args.required("reminder_text")?,
            &args.required("reminder_date")?,
            &args.str_or("reminder_type", "general"),
        ),
        (project_manager::AGENT_NAME, "get_project_summary") => {
            project_manager::get_project_summary(store, args.int_or("days_back", 7))
        }

        _ => return Err(tool_error(format!("agent '{agent}' has no tool '{tool}'"))),
    };
    Ok(out)
}
