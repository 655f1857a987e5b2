//! CLI struct definitions for the agentledger command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "agentledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Local append-only journal and conversation memory for tool-calling agents",
    disable_version_flag = true
)]
pub(crate) struct Cli {
    /// Store directory (overrides AGENTLEDGER_DIR and project discovery).
    #[clap(long, global = true)]
    pub dir: Option<PathBuf>,
    /// Use the per-user store at $HOME/.agentledger.
    #[clap(long, global = true, conflicts_with = "dir")]
    pub user: bool,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create the store, its config file, and the ledger tables
    #[clap(name = "init")]
    Init,

    /// Journal entries (notes, tasks, docs, reminders)
    #[clap(name = "journal", visible_alias = "j")]
    Journal(JournalCli),

    /// Saved playlists
    #[clap(name = "playlist")]
    Playlist(PlaylistCli),

    /// Conversation memory per agent
    #[clap(name = "memory", visible_alias = "m")]
    Memory(MemoryCli),

    /// Agent tools and their schemas
    #[clap(name = "tool")]
    Tool(ToolCli),

    /// Audit log access
    #[clap(name = "broker")]
    Broker(BrokerCli),

    /// Show version information
    #[clap(name = "version")]
    Version,
}

#[derive(clap::Args, Debug)]
pub(crate) struct JournalCli {
    #[clap(subcommand)]
    pub command: JournalCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum JournalCommand {
    /// Append a journal entry
    Add {
        #[clap(long)]
        owner: String,
        #[clap(long)]
        text: String,
        /// Comma-separated tags
        #[clap(long)]
        tags: Option<String>,
    },
    /// List entries, newest first
    List {
        /// Only entries written by this owner
        #[clap(long)]
        owner: Option<String>,
        #[clap(long)]
        limit: Option<usize>,
        /// Output format: 'text' or 'json'.
        #[clap(long, default_value = "text")]
        format: String,
    },
    /// Case-sensitive substring search over text and tags
    Search {
        #[clap(long)]
        term: String,
        #[clap(long)]
        limit: Option<usize>,
        #[clap(long, default_value = "text")]
        format: String,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct PlaylistCli {
    #[clap(subcommand)]
    pub command: PlaylistCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum PlaylistCommand {
    /// Save a playlist
    Add {
        #[clap(long)]
        name: String,
        /// Comma-separated items, in order
        #[clap(long)]
        items: String,
    },
    /// List playlists, newest first
    List {
        #[clap(long)]
        limit: Option<usize>,
        #[clap(long, default_value = "text")]
        format: String,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct MemoryCli {
    #[clap(subcommand)]
    pub command: MemoryCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum MemoryCommand {
    /// Record one user-message/agent-response turn
    Save {
        #[clap(long)]
        owner: String,
        #[clap(long)]
        user_message: String,
        #[clap(long)]
        agent_response: String,
        #[clap(long)]
        session_id: Option<String>,
    },
    /// Show the last turns for an owner, oldest first (limit clamped to 1..=10)
    Recent {
        #[clap(long)]
        owner: String,
        #[clap(long, default_value_t = 5, allow_hyphen_values = true)]
        limit: i64,
        #[clap(long, default_value = "text")]
        format: String,
    },
    /// Print the last turns as a prompt context block
    Context {
        #[clap(long)]
        owner: String,
        #[clap(long, default_value_t = 5, allow_hyphen_values = true)]
        limit: i64,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct ToolCli {
    #[clap(subcommand)]
    pub command: ToolCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ToolCommand {
    /// List registered agents and their tools
    List,
    /// Print one agent's tool schema as JSON
    Schema {
        #[clap(long)]
        agent: String,
    },
    /// Call an agent tool and print its JSON result
    Call {
        #[clap(long)]
        agent: String,
        #[clap(long)]
        tool: String,
        /// JSON object of named arguments
        #[clap(long, default_value = "{}")]
        args: String,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct BrokerCli {
    #[clap(subcommand)]
    pub command: BrokerCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum BrokerCommand {
    /// Show the audit log of brokered operations
    Audit {
        /// Only the last N events
        #[clap(long)]
        tail: Option<usize>,
    },
}
