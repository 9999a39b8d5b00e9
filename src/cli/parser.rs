//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for jumpto using clap's derive macros.

use clap::{Parser, Subcommand};

/// jumpto - Type a short alias, land on the page
#[derive(Parser)]
#[command(name = "jumpto")]
#[command(version)]
#[command(about = "Personal alias -> URL shortcuts with search fallback", long_about = None)]
pub struct Cli {
    /// Override the store file path
    #[arg(long, short = 's', global = true)]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Add a shortcut (overwrites an existing alias)
    Add {
        /// Alias, letters, digits and `-`
        alias: String,

        /// Target URL, scheme optional
        url: String,

        /// Category (default: the configured default category)
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Update an existing shortcut
    Update {
        alias: String,

        /// New target URL
        #[arg(long)]
        url: Option<String>,

        /// New category
        #[arg(long, short)]
        category: Option<String>,

        /// Replace tags (comma separated)
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// Remove a shortcut
    Remove { alias: String },

    /// List shortcuts
    List {
        /// Only this category
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Resolve text to a URL (alias hit or web search)
    Go {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show omnibox-style suggestions for a partial alias
    Suggest { partial: String },

    /// Show recently used shortcuts
    Recent,

    /// Clear the recent list
    ClearRecent,

    /// Remove one entry from the recent list (0 = most recent)
    RemoveRecent { index: usize },

    /// Show usage statistics
    Stats,

    /// Show or change settings
    Settings {
        #[arg(long)]
        analytics: Option<bool>,

        #[arg(long)]
        dark_mode: Option<bool>,

        #[arg(long)]
        keyboard_shortcuts: Option<bool>,

        #[arg(long)]
        auto_backup: Option<bool>,

        /// Backup frequency in days
        #[arg(long)]
        backup_days: Option<u64>,

        #[arg(long)]
        default_category: Option<String>,
    },

    /// Export shortcuts to a JSON file
    Export {
        /// Output file path (default: jumpto-shortcuts.json)
        file_path: Option<String>,
    },

    /// Merge shortcuts from a JSON file
    Import { file_path: String },

    /// Dump the whole store to a JSON file
    Backup {
        /// Output file path (default: jumpto-backup-<date>.json)
        file_path: Option<String>,
    },

    /// Replace the whole store with a backup file
    Restore {
        file_path: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Suggest an alias for a URL
    SuggestAlias { url: String },

    /// Run the URL safety check
    Check { url: String },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: jumpto.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "add",
            Commands::Update { .. } => "update",
            Commands::Remove { .. } => "remove",
            Commands::List { .. } => "list",
            Commands::Go { .. } => "go",
            Commands::Suggest { .. } => "suggest",
            Commands::Recent => "recent",
            Commands::ClearRecent => "clear-recent",
            Commands::RemoveRecent { .. } => "remove-recent",
            Commands::Stats => "stats",
            Commands::Settings { .. } => "settings",
            Commands::Export { .. } => "export",
            Commands::Import { .. } => "import",
            Commands::Backup { .. } => "backup",
            Commands::Restore { .. } => "restore",
            Commands::SuggestAlias { .. } => "suggest-alias",
            Commands::Check { .. } => "check",
            Commands::Config { .. } => "config",
        }
    }

    /// Whether the command runs without opening the store
    pub fn is_offline(&self) -> bool {
        matches!(
            self,
            Commands::SuggestAlias { .. } | Commands::Check { .. } | Commands::Config { .. }
        )
    }
}
