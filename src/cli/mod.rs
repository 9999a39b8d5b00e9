//! CLI interface module
//!
//! This module provides the command-line front end for jumpto. Every command
//! goes through the same services the browser intents use.

pub mod commands;
pub mod parser;

pub use parser::{Cli, Commands, ConfigCommands};

use std::fmt;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::JumptoError;
use crate::services::{AnalyticsService, NavigationResolver, ShortcutService};
use crate::storage::{StorageFactory, StoreAdapter};
use commands::{config_management, data_transfer, navigation, shortcut_management};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<JumptoError> for CliError {
    fn from(err: JumptoError) -> Self {
        match err {
            JumptoError::StoreUnavailable(_)
            | JumptoError::FileOperation(_)
            | JumptoError::Serialization(_) => CliError::StorageError(err.to_string()),
            JumptoError::InvalidImportFormat(_) => CliError::ParseError(err.to_string()),
            _ => CliError::CommandError(err.to_string()),
        }
    }
}

/// Services a store-backed command runs against
pub struct CliContext {
    pub store: StoreAdapter,
    pub shortcuts: Arc<ShortcutService>,
    pub resolver: NavigationResolver,
}

impl CliContext {
    pub fn new(store: StoreAdapter, config: &AppConfig) -> Self {
        let analytics = Arc::new(AnalyticsService::with_defaults(store.clone()));
        let shortcuts = Arc::new(
            ShortcutService::new(store.clone(), analytics)
                .with_history_days(config.stats.daily_history_days),
        );
        let resolver = NavigationResolver::new(Arc::clone(&shortcuts), &config.navigation);
        Self {
            store,
            shortcuts,
            resolver,
        }
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self, CliError> {
        let backend = StorageFactory::create(&config.storage)
            .await
            .map_err(|e| CliError::StorageError(e.to_string()))?;
        Ok(Self::new(StoreAdapter::new(backend), config))
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &AppConfig) -> Result<(), CliError> {
    if cmd.is_offline() {
        return run_offline_command(cmd, config).await;
    }

    let ctx = CliContext::from_config(config).await?;
    run_with_context(cmd, &ctx).await
}

async fn run_offline_command(cmd: Commands, config: &AppConfig) -> Result<(), CliError> {
    match cmd {
        Commands::SuggestAlias { url } => navigation::suggest_alias(&url),
        Commands::Check { url } => navigation::check_url(&url),
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_management::config_generate(output_path, force).await,
        Commands::Config {
            action: ConfigCommands::Show,
        } => config_management::config_show(config),
        other => Err(CliError::CommandError(format!(
            "'{}' needs the store",
            other.name()
        ))),
    }
}

/// Run a store-backed command, then wait for its background side effects
pub async fn run_with_context(cmd: Commands, ctx: &CliContext) -> Result<(), CliError> {
    let result = dispatch(cmd, ctx).await;
    // 进程退出前等待使用记录和分析事件落盘
    ctx.shortcuts.settle().await;
    result
}

async fn dispatch(cmd: Commands, ctx: &CliContext) -> Result<(), CliError> {
    match cmd {
        Commands::Add {
            alias,
            url,
            category,
        } => shortcut_management::add_shortcut(ctx, alias, url, category).await,

        Commands::Update {
            alias,
            url,
            category,
            tags,
        } => shortcut_management::update_shortcut(ctx, alias, url, category, tags).await,

        Commands::Remove { alias } => shortcut_management::remove_shortcut(ctx, alias).await,

        Commands::List { category } => shortcut_management::list_shortcuts(ctx, category).await,

        Commands::Go { text } => navigation::go(ctx, &text.join(" ")).await,

        Commands::Suggest { partial } => navigation::suggest(ctx, &partial).await,

        Commands::Recent => shortcut_management::list_recent(ctx).await,

        Commands::ClearRecent => shortcut_management::clear_recent(ctx).await,

        Commands::RemoveRecent { index } => shortcut_management::remove_recent(ctx, index).await,

        Commands::Stats => shortcut_management::show_stats(ctx).await,

        Commands::Settings {
            analytics,
            dark_mode,
            keyboard_shortcuts,
            auto_backup,
            backup_days,
            default_category,
        } => {
            let update = crate::models::SettingsUpdate {
                analytics_enabled: analytics,
                dark_mode,
                keyboard_shortcuts_enabled: keyboard_shortcuts,
                auto_backup_enabled: auto_backup,
                backup_frequency: backup_days.map(|days| days * 24 * 60 * 60 * 1000),
                default_category,
            };
            shortcut_management::settings(ctx, update).await
        }

        Commands::Export { file_path } => data_transfer::export_shortcuts(ctx, file_path).await,

        Commands::Import { file_path } => data_transfer::import_shortcuts(ctx, file_path).await,

        Commands::Backup { file_path } => data_transfer::backup_store(ctx, file_path).await,

        Commands::Restore { file_path, force } => {
            data_transfer::restore_store(ctx, file_path, force).await
        }

        Commands::SuggestAlias { url } => navigation::suggest_alias(&url),

        Commands::Check { url } => navigation::check_url(&url),

        Commands::Config { .. } => Err(CliError::CommandError(
            "config commands run without a store".to_string(),
        )),
    }
}
