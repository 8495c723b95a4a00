//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod auth;
pub mod category;
pub mod completions;
pub mod config;
pub mod context;
pub mod handlers;
pub mod post;
pub mod status;
pub mod tag;

pub use args::{OutputFormat, PostArgs, PostUpdateArgs};
pub use context::CommandContext;

/// Blogop CLI - command-line client for the blog platform
#[derive(Parser, Debug)]
#[command(name = "blogop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, global = true, env = "BLOGOP_FORMAT", hide_env = true)]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "BLOGOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the blog backend host (e.g. http://localhost:8080)
    #[arg(long, global = true, env = "BLOGOP_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "BLOGOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Account password (prompted when omitted)
        #[arg(long, env = "BLOGOP_PASSWORD", hide = true, hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(long, env = "BLOGOP_PASSWORD", hide = true, hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and revoke the stored refresh token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show session and configuration status
    Status,

    /// Read and manage posts
    #[command(subcommand)]
    Post(PostCommands),

    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Manage tags
    #[command(subcommand)]
    Tag(TagCommands),

    /// View and edit the CLI configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Display version information
    Version,
}

/// Post subcommands
#[derive(Subcommand, Debug)]
pub enum PostCommands {
    /// List published posts
    List {
        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,

        /// Only posts carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Maximum number of rows to show
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Show a single post
    Get {
        /// Post ID
        id: String,
    },

    /// List your drafts
    Drafts,

    /// Create a post
    Create(PostArgs),

    /// Update a post; omitted fields keep their current values
    Update {
        /// Post ID
        id: String,

        #[command(flatten)]
        args: PostUpdateArgs,
    },

    /// Delete one or more posts
    Delete {
        /// Post IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories
    List,

    /// Create a category
    Create {
        /// Category name
        name: String,
    },

    /// Delete one or more categories
    Delete {
        /// Category IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

/// Tag subcommands
#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List tags
    List,

    /// Create one or more tags
    Create {
        /// Tag names
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Delete one or more tags
    Delete {
        /// Tag IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Persist the backend host in the config file
    SetHost {
        /// Host URL, e.g. https://blog.example.com
        url: String,
    },
}
