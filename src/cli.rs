//! Command-line interface definition for the Life Harness client
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication, onboarding, the dashboard,
//! interview threads, life entries, and autobiography generation.

use clap::{Parser, Subcommand};

/// Life Harness - terminal client for the guided journaling service
///
/// Authenticate, answer guided interview questions organized into
/// threads, review recorded life entries, and generate a compiled
/// autobiography document.
#[derive(Parser, Debug, Clone)]
#[command(name = "lifeharness")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the API base URL from config
    #[arg(long)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Life Harness client
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Register a new account and log in
    Register {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Log in to an existing account
    Login {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Log out and discard the stored token
    Logout,

    /// Show whether a session token is stored
    Status,

    /// Run the profile onboarding wizard
    Onboard,

    /// Show the coverage heatmap and your interview threads
    Dashboard,

    /// Manage interview threads
    Thread {
        /// Thread subcommand
        #[command(subcommand)]
        command: ThreadCommand,
    },

    /// Browse and reclassify life entries
    Entries {
        /// Entries subcommand
        #[command(subcommand)]
        command: EntryCommand,
    },

    /// Generate an autobiography from your life entries
    Autobiography {
        /// Intended audience (self, trusted, heirs, public)
        #[arg(short, long, default_value = "self")]
        audience: String,

        /// Narrative tone (light, balanced, deep)
        #[arg(short, long, default_value = "balanced")]
        tone: String,

        /// Start year of a time-range scope (requires --to)
        #[arg(long)]
        from: Option<i32>,

        /// End year of a time-range scope (requires --from)
        #[arg(long)]
        to: Option<i32>,

        /// Include placeholder sections for uncovered areas
        #[arg(long)]
        include_placeholders: bool,

        /// Path for the exported markdown file
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Thread management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ThreadCommand {
    /// List your interview threads
    List,

    /// Create a new thread and start its interview
    New {
        /// Thread title
        #[arg(short, long)]
        title: String,

        /// Root prompt describing what the thread is about
        #[arg(short, long)]
        prompt: String,

        /// Interviewer persona
        #[arg(long)]
        persona: Option<String>,

        /// Restrict questions to these time buckets (repeatable)
        #[arg(long = "time-focus")]
        time_focus: Vec<String>,

        /// Restrict questions to these topic buckets (repeatable)
        #[arg(long = "topic-focus")]
        topic_focus: Vec<String>,
    },

    /// Resume the interview for an existing thread
    Run {
        /// Thread id
        id: String,
    },
}

/// Life entry subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum EntryCommand {
    /// List entries, optionally filtered by time and/or topic bucket
    List {
        /// Filter by time bucket (pre10, 10s, 20s, 30s, 40s, 50plus)
        #[arg(long)]
        time_bucket: Option<String>,

        /// Filter by topic bucket (e.g. work_career, friendships)
        #[arg(long)]
        topic_bucket: Option<String>,
    },

    /// Show one entry in full
    Show {
        /// Entry id
        id: String,
    },

    /// Update an entry's visibility and seal policy
    Seal {
        /// Entry id
        id: String,

        /// New visibility level (self, trusted, heirs, public)
        #[arg(long)]
        visibility: Option<String>,

        /// New seal type (none, until_date, until_event, until_manual)
        #[arg(long)]
        seal_type: Option<String>,

        /// Release timestamp for an until_date seal (RFC 3339)
        #[arg(long)]
        release_at: Option<String>,

        /// Event key for an until_event seal
        #[arg(long)]
        event_key: Option<String>,

        /// Audience to block while sealed (repeatable)
        #[arg(long = "block-audience")]
        block_audiences: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
