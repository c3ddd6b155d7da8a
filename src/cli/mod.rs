//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::models::Role;

pub mod args;
pub mod auth;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod doc;
pub mod status;

pub use args::OutputFormat;
pub use context::CommandContext;

/// DocSign CLI - sign, reject and manage documents on a DocSign server
#[derive(Parser, Debug)]
#[command(name = "docsign")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "DOCSIGN_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "DOCSIGN_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API base URL (e.g. http://localhost:8080/api)
    #[arg(long, global = true, env = "DOCSIGN_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "DOCSIGN_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new account
    Register {
        /// Username for the new account
        username: String,

        /// Email address for the new account
        #[arg(long)]
        email: String,

        /// Account role
        #[arg(long, value_enum, default_value = "user")]
        role: Role,

        /// Password (prompted when omitted)
        #[arg(long, env = "DOCSIGN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Log in with a username or email
    Login {
        /// Username or email
        identifier: String,

        /// Password (prompted when omitted)
        #[arg(long, env = "DOCSIGN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show session and configuration status
    Status,

    /// Display version information
    Version,

    /// Work with documents
    #[command(subcommand, visible_alias = "docs")]
    Doc(DocCommands),

    /// Interactive document dashboard
    Dashboard,

    /// Manage local configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   docsign completion bash > /etc/bash_completion.d/docsign
  zsh:    docsign completion zsh > \"${fpath[1]}/_docsign\"
  fish:   docsign completion fish > ~/.config/fish/completions/docsign.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Document subcommands
#[derive(Subcommand, Debug)]
pub enum DocCommands {
    /// List your documents (admins see all)
    #[command(visible_alias = "ls")]
    List,

    /// Upload a PDF document
    Upload {
        /// Path to a PDF file
        path: PathBuf,
    },

    /// Sign a document
    Sign {
        /// Document ID
        id: i64,

        /// Name to print on the signature (defaults to your username)
        #[arg(long, short = 'n')]
        name: Option<String>,
    },

    /// Reject a document
    Reject {
        /// Document ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Attach a note to a document
    Comment {
        /// Document ID
        id: i64,

        /// Note text
        message: String,
    },

    /// Delete a document
    #[command(visible_alias = "rm")]
    Delete {
        /// Document ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Download a document
    Download {
        /// Document ID
        id: i64,

        /// Where to write the file (defaults to the server's file name)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Set the API base URL
    SetUrl {
        /// Base URL including the /api prefix
        url: String,
    },

    /// Set the default output format
    SetFormat {
        /// Output format
        #[arg(value_enum)]
        format: OutputFormat,
    },
}
