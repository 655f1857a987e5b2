//! agentledger: a local, append-only ledger for tool-calling agents.
//!
//! One SQLite file holds three append-only tables: journal entries,
//! playlists, and conversation turns. Agents write through small,
//! deterministic tool functions and read back bounded, newest-first slices,
//! or a chronological window of recent turns rendered as prompt context.
//!
//! # Architecture
//!
//! - **Store** (`<project>/.agentledger/` or `~/.agentledger/`): the data file,
//!   `config.toml`, and the broker audit log. Opened once with
//!   [`core::store::open_store`]; every operation takes the handle.
//! - **Broker**: every statement runs through `DbBroker::with_conn`, which
//!   opens a fresh connection, releases it on all paths, and appends an audit
//!   line to `broker.events.jsonl`.
//! - **Ledger** ([`core::ledger`]): append and bounded recency reads for the
//!   three record kinds. Rows are never updated or deleted.
//! - **Agents** ([`plugins`], [`agents`]): tool functions returning JSON
//!   mappings with a `status` field, plus a name-based dispatcher.
//!
//! # Examples
//!
//! ```bash
//! agentledger init
//! agentledger journal add --owner coding_agent --text "TITLE: retry loop" --tags rust,snippet
//! agentledger memory recent --owner coding_agent --limit 3
//! agentledger tool call --agent project_manager_agent --tool add_task \
//!     --args '{"task_description": "Write docs", "priority": "high"}'
//! ```

pub mod agents;
mod cli;
pub mod core;
pub mod plugins;

use crate::cli::{
    BrokerCommand, Cli, Command, JournalCommand, MemoryCommand, PlaylistCommand, ToolCommand,
};
use crate::core::{
    broker, config,
    error::LedgerError,
    ledger::{self, JournalEntry, Playlist},
    output,
    store::{self, Store},
};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub const STORE_DIR_ENV: &str = "AGENTLEDGER_DIR";

/// Store root from, in order: `--dir`, `AGENTLEDGER_DIR`, the nearest
/// ancestor `.agentledger/`, then `./.agentledger`.
fn resolve_store_root(dir: Option<PathBuf>, cwd: &Path) -> PathBuf {
    if let Some(d) = dir {
        return d;
    }
    if let Ok(d) = std::env::var(STORE_DIR_ENV)
        && !d.trim().is_empty()
    {
        return PathBuf::from(d);
    }
    store::find_project_store(cwd).unwrap_or_else(|| cwd.join(store::STORE_DIR_NAME))
}

fn print_journal(entries: &[JournalEntry], format: &str) -> Result<(), LedgerError> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No journal entries.");
        return Ok(());
    }
    for e in entries {
        let tags = e.tags.as_deref().map(|t| output::preview_list(t, 5));
        println!(
            "{} {} [{}] {}{}",
            format!("#{}", e.id).bright_cyan(),
            e.owner.bold(),
            e.kind().as_str(),
            output::compact_line(&e.text, 100),
            tags.filter(|t| !t.is_empty())
                .map(|t| format!(" ({})", t).bright_black().to_string())
                .unwrap_or_default()
        );
    }
    Ok(())
}

fn print_playlists(playlists: &[Playlist], format: &str) -> Result<(), LedgerError> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(playlists)?);
        return Ok(());
    }
    if playlists.is_empty() {
        println!("No playlists.");
        return Ok(());
    }
    for p in playlists {
        println!(
            "{} {}: {}",
            format!("#{}", p.id).bright_cyan(),
            p.name.bold(),
            output::preview_list(&p.items, 5)
        );
    }
    Ok(())
}

fn open_cli_store(dir: Option<PathBuf>, user: bool) -> Result<Store, LedgerError> {
    if user {
        return store::open_user_store();
    }
    let cwd = std::env::current_dir()?;
    store::open_store(&resolve_store_root(dir, &cwd))
}

fn default_limit(store: &Store) -> usize {
    usize::try_from(store.config.limits.default_list_limit).unwrap_or(20)
}

pub fn run() -> Result<(), LedgerError> {
    let Cli { dir, user, command } = Cli::parse();
    let open = || open_cli_store(dir.clone(), user);

    match command {
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
        }
        Command::Init => {
            let store = open()?;
            let wrote = config::write_default_config(&store.root)?;
            println!(
                "{} ledger initialized at {}",
                "✓".bright_green(),
                store.db_path().display()
            );
            if wrote {
                println!(
                    "  wrote default config to {}",
                    config::config_path(&store.root).display()
                );
            }
        }
        Command::Journal(j) => run_journal(&open()?, j.command)?,
        Command::Playlist(p) => run_playlist(&open()?, p.command)?,
        Command::Memory(m) => run_memory(&open()?, m.command)?,
        Command::Tool(t) => match t.command {
            ToolCommand::List => {
                for agent in agents::AGENTS {
                    let schema = (agent.schema)();
                    let tools: Vec<String> = schema["tools"]
                        .as_array()
                        .map(|tools| {
                            tools
                                .iter()
                                .filter_map(|t| t["name"].as_str().map(str::to_string))
                                .collect()
                        })
                        .unwrap_or_default();
                    match agent.journal_owner {
                        Some(owner) => println!(
                            "{} {}",
                            agent.name.bold(),
                            format!("(journal owner: {owner})").bright_black()
                        ),
                        None => println!("{}", agent.name.bold()),
                    }
                    println!("  {}", tools.join(", "));
                }
            }
            ToolCommand::Schema { agent } => {
                let schema = agents::agent_schema(&agent)
                    .ok_or_else(|| LedgerError::NotFound(format!("agent '{agent}'")))?;
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            ToolCommand::Call { agent, tool, args } => {
                let args: serde_json::Value = serde_json::from_str(&args).map_err(|e| {
                    LedgerError::ValidationError(format!("--args is not valid JSON: {e}"))
                })?;
                let result = agents::call_tool(&open()?, &agent, &tool, &args);
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        },
        Command::Broker(b) => match b.command {
            BrokerCommand::Audit { tail } => {
                let store = open()?;
                let events = broker::read_audit_log(&store.root)?;
                let skip = tail.map_or(0, |n| events.len().saturating_sub(n));
                for ev in events.iter().skip(skip) {
                    println!("{}", serde_json::to_string(ev)?);
                }
            }
        },
    }

    Ok(())
}

fn run_journal(store: &Store, command: JournalCommand) -> Result<(), LedgerError> {
    match command {
        JournalCommand::Add { owner, text, tags } => {
            let tag_list = tags.as_deref().map(output::split_csv);
            let ack = ledger::append_journal(store, &owner, &text, tag_list.as_deref())?;
            println!("{}", serde_json::to_string(&ack)?);
        }
        JournalCommand::List {
            owner,
            limit,
            format,
        } => {
            let limit = limit.unwrap_or_else(|| default_limit(store));
            let entries = match owner {
                Some(o) => ledger::list_journals_by_owner(store, &o, limit)?,
                None => ledger::list_journals(store, limit)?,
            };
            print_journal(&entries, &format)?;
        }
        JournalCommand::Search {
            term,
            limit,
            format,
        } => {
            let limit = limit.unwrap_or_else(|| default_limit(store));
            print_journal(&ledger::search_journals(store, &term, limit)?, &format)?;
        }
    }
    Ok(())
}

fn run_playlist(store: &Store, command: PlaylistCommand) -> Result<(), LedgerError> {
    match command {
        PlaylistCommand::Add { name, items } => {
            let ack = ledger::append_playlist(store, &name, &output::split_csv(&items))?;
            println!("{}", serde_json::to_string(&ack)?);
        }
        PlaylistCommand::List { limit, format } => {
            let limit = limit.unwrap_or_else(|| default_limit(store));
            print_playlists(&ledger::list_playlists(store, limit)?, &format)?;
        }
    }
    Ok(())
}

fn run_memory(store: &Store, command: MemoryCommand) -> Result<(), LedgerError> {
    match command {
        MemoryCommand::Save {
            owner,
            user_message,
            agent_response,
            session_id,
        } => {
            let ack = ledger::append_conversation_turn(
                store,
                &owner,
                &user_message,
                &agent_response,
                session_id.as_deref(),
            )?;
            println!("{}", serde_json::to_string(&ack)?);
        }
        MemoryCommand::Recent {
            owner,
            limit,
            format,
        } => {
            let turns = ledger::recent_conversation(store, &owner, limit)?;
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&turns)?);
            } else if turns.is_empty() {
                println!("{}", ledger::NO_HISTORY_SENTINEL);
            } else {
                for t in &turns {
                    let id = format!("#{}", t.id);
                    println!(
                        "{} {} {}",
                        id.bright_cyan(),
                        "user:".bold(),
                        output::compact_line(&t.user_message, 100)
                    );
                    println!(
                        "{} {} {}",
                        " ".repeat(id.len()),
                        "agent:".bold(),
                        output::compact_line(&t.agent_response, 100)
                    );
                }
            }
        }
        MemoryCommand::Context { owner, limit } => {
            println!(
                "{}",
                ledger::format_conversation_as_context(store, &owner, limit)?
            );
        }
    }
    Ok(())
}
