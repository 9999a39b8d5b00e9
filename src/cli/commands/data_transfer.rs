//! Import, export, backup and restore commands

use std::path::Path;

use chrono::Utc;
use colored::Colorize;
use tokio::fs;

use super::confirm;
use crate::cli::{CliContext, CliError};
use crate::services::EXPORT_FILE_NAME;

async fn write_output(path: &str, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents)
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to write '{}': {}", path, e)))
}

async fn read_input(path: &str) -> Result<String, CliError> {
    if !Path::new(path).exists() {
        return Err(CliError::CommandError(format!(
            "File not found: {}",
            path
        )));
    }
    fs::read_to_string(path)
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to read '{}': {}", path, e)))
}

fn backup_file_name() -> String {
    format!("jumpto-backup-{}.json", Utc::now().format("%Y%m%d-%H%M%S"))
}

pub async fn export_shortcuts(ctx: &CliContext, file_path: Option<String>) -> Result<(), CliError> {
    let shortcuts = ctx.shortcuts.list().await?;
    if shortcuts.is_empty() {
        println!("{} No shortcuts to export", "ℹ".bold().blue());
        return Ok(());
    }

    let output_path = file_path.unwrap_or_else(|| EXPORT_FILE_NAME.to_string());
    let serialized = ctx.shortcuts.export_snapshot().await?;
    write_output(&output_path, &serialized).await?;

    println!(
        "{} Exported {} shortcuts to: {}",
        "✓".bold().green(),
        shortcuts.len().to_string().green(),
        output_path.cyan()
    );
    Ok(())
}

pub async fn import_shortcuts(ctx: &CliContext, file_path: String) -> Result<(), CliError> {
    let contents = read_input(&file_path).await?;
    let count = ctx.shortcuts.import_merge(&contents).await?;

    println!(
        "{} Imported {} shortcuts from: {}",
        "✓".bold().green(),
        count.to_string().green(),
        file_path.cyan()
    );
    Ok(())
}

pub async fn backup_store(ctx: &CliContext, file_path: Option<String>) -> Result<(), CliError> {
    let output_path = file_path.unwrap_or_else(backup_file_name);
    let serialized = ctx.store.export_all().await?;
    write_output(&output_path, &serialized).await?;

    println!(
        "{} Backed up {} store to: {}",
        "✓".bold().green(),
        ctx.store.backend_name().magenta(),
        output_path.cyan()
    );
    Ok(())
}

pub async fn restore_store(ctx: &CliContext, file_path: String, force: bool) -> Result<(), CliError> {
    let contents = read_input(&file_path).await?;

    if !force && !confirm("This replaces ALL shortcuts, history and settings. Continue?")? {
        println!("{}", "Aborted.".red());
        return Ok(());
    }

    ctx.store.import_all(&contents).await?;
    println!(
        "{} Store restored from: {}",
        "✓".bold().green(),
        file_path.cyan()
    );
    Ok(())
}
