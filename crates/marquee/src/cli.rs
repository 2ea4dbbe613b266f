//! Clap derive structures for the `marquee` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Compiled into `build.rs` as well, so this file depends on clap only.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// marquee -- browse and curate a casting agency's movies and actors
#[derive(Debug, Parser)]
#[command(
    name = "marquee",
    version,
    about = "Browse and edit movies, actors and casts from the command line",
    long_about = "A terminal front end for the casting agency REST service.\n\n\
        Lists page through the backend ten entries at a time. Edits are sent\n\
        as JSON Patch documents containing only the fields that changed.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "MARQUEE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'u', env = "MARQUEE_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Bearer token issued by the identity provider
    #[arg(long, env = "MARQUEE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MARQUEE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "MARQUEE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "MARQUEE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and manage movies
    #[command(alias = "m")]
    Movies(MoviesArgs),

    /// Browse and manage actors
    #[command(alias = "a")]
    Actors(ActorsArgs),

    /// Link actors to movies
    #[command(alias = "casts")]
    Cast(CastArgs),

    /// Show what the current token is allowed to do
    Permissions,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Argument Types ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page to show (10 entries per page)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Only entries whose name or title contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Walk every page from --page to the last
    #[arg(long, short = 'a')]
    pub all: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MOVIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MoviesArgs {
    #[command(subcommand)]
    pub command: MoviesCommand,
}

#[derive(Debug, Subcommand)]
pub enum MoviesCommand {
    /// List movies
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a movie and its cast
    Get {
        /// Movie ID
        id: i64,
    },

    /// Add a movie
    Add {
        #[arg(long)]
        title: String,

        /// Genre, e.g. DRAMA or SCI_FI
        #[arg(long)]
        genre: String,

        #[arg(long)]
        poster_url: Option<String>,

        /// Release date (YYYY-MM-DD)
        #[arg(long)]
        release_date: Option<String>,
    },

    /// Change a movie; only the fields given are touched
    Edit {
        /// Movie ID
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        /// Poster URL; pass "" to remove it
        #[arg(long)]
        poster_url: Option<String>,

        /// Release date (YYYY-MM-DD); pass "" to remove it
        #[arg(long)]
        release_date: Option<String>,

        /// Print the patch and the resulting movie without sending anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a movie
    #[command(alias = "rm")]
    Delete {
        /// Movie ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACTORS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ActorsArgs {
    #[command(subcommand)]
    pub command: ActorsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ActorsCommand {
    /// List actors
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show an actor and their movies
    Get {
        /// Actor ID
        id: i64,
    },

    /// Add an actor
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: String,

        /// MALE or FEMALE
        #[arg(long)]
        gender: Option<String>,

        #[arg(long)]
        photo_url: Option<String>,
    },

    /// Change an actor; only the fields given are touched
    Edit {
        /// Actor ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        age: Option<String>,

        /// MALE or FEMALE; pass "" to remove it
        #[arg(long)]
        gender: Option<String>,

        /// Photo URL; pass "" to remove it
        #[arg(long)]
        photo_url: Option<String>,

        /// Print the patch and the resulting actor without sending anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete an actor
    #[command(alias = "rm")]
    Delete {
        /// Actor ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CAST
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CastArgs {
    #[command(subcommand)]
    pub command: CastCommand,
}

#[derive(Debug, Subcommand)]
pub enum CastCommand {
    /// Add an actor to a movie's cast
    Assign {
        #[arg(long, short = 'm')]
        movie: i64,

        #[arg(long, short = 'a')]
        actor: i64,
    },

    /// Remove an actor from a movie's cast
    #[command(alias = "rm")]
    Remove {
        #[arg(long, short = 'm')]
        movie: i64,

        #[arg(long, short = 'a')]
        actor: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a profile value (base_url, token_env, ca_cert, insecure, timeout)
    Set {
        /// Config key
        key: String,

        /// Value to set
        value: String,
    },

    /// Store a bearer token in the system keyring
    SetToken {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
