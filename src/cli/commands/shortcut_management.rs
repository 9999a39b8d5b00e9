//! Shortcut management commands

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::cli::{CliContext, CliError};
use crate::models::{DEFAULT_CATEGORY, SettingsUpdate};
use crate::services::ShortcutUpdate;

fn format_timestamp(ms: i64, pattern: &str) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|t| t.format(pattern).to_string())
        .unwrap_or_else(|| ms.to_string())
}

pub async fn add_shortcut(
    ctx: &CliContext,
    alias: String,
    url: String,
    category: Option<String>,
) -> Result<(), CliError> {
    let existed = ctx.shortcuts.get(&alias).await?.is_some();
    let shortcut = ctx.shortcuts.add(&alias, &url, category.as_deref()).await?;

    if existed {
        println!(
            "{} Overwrote existing shortcut: {}",
            "ℹ".bold().blue(),
            alias.to_lowercase().magenta()
        );
    }
    println!(
        "{} Added shortcut: {} -> {} ({})",
        "✓".bold().green(),
        alias.to_lowercase().cyan(),
        shortcut.url.blue().underline(),
        shortcut.category.dimmed()
    );
    Ok(())
}

pub async fn update_shortcut(
    ctx: &CliContext,
    alias: String,
    url: Option<String>,
    category: Option<String>,
    tags: Option<Vec<String>>,
) -> Result<(), CliError> {
    if url.is_none() && category.is_none() && tags.is_none() {
        return Err(CliError::CommandError(
            "Nothing to update: pass --url, --category or --tags".to_string(),
        ));
    }

    let update = ShortcutUpdate {
        url,
        category,
        tags: tags.map(|tags| {
            tags.into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect::<BTreeSet<_>>()
        }),
    };
    let shortcut = ctx.shortcuts.update(&alias, update).await?;

    println!(
        "{} Shortcut updated: {} -> {}",
        "✓".bold().green(),
        alias.to_lowercase().cyan(),
        shortcut.url.blue().underline()
    );
    Ok(())
}

pub async fn remove_shortcut(ctx: &CliContext, alias: String) -> Result<(), CliError> {
    if !ctx.shortcuts.delete(&alias).await? {
        return Err(CliError::CommandError(format!(
            "Shortcut does not exist: {}",
            alias
        )));
    }

    println!(
        "{} Deleted shortcut: {}",
        "✓".bold().green(),
        alias.to_lowercase().cyan()
    );
    Ok(())
}

pub async fn list_shortcuts(ctx: &CliContext, category: Option<String>) -> Result<(), CliError> {
    let shortcuts = match &category {
        Some(category) => ctx.shortcuts.list_by_category(category).await?,
        None => ctx.shortcuts.list().await?,
    };

    if shortcuts.is_empty() {
        println!("{} No shortcuts found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Shortcut list:".bold().green());
    println!();
    for (alias, shortcut) in &shortcuts {
        let mut info_parts = vec![format!(
            "{} -> {}",
            alias.cyan(),
            shortcut.url.blue().underline()
        )];

        if shortcut.category != DEFAULT_CATEGORY {
            info_parts.push(format!("[{}]", shortcut.category).magenta().to_string());
        }

        if let Some(tags) = shortcut.tags.as_ref().filter(|tags| !tags.is_empty()) {
            let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
            info_parts.push(format!("#{}", tags.join(" #")).dimmed().to_string());
        }

        if shortcut.usage_count > 0 {
            info_parts.push(
                format!("(used: {})", shortcut.usage_count)
                    .dimmed()
                    .cyan()
                    .to_string(),
            );
        }

        println!("  {}", info_parts.join(" "));
    }
    println!();

    let categories = ctx.shortcuts.categories().await?;
    println!(
        "{} Total {} shortcuts in {} categories",
        "ℹ".bold().blue(),
        shortcuts.len().to_string().green(),
        categories.len().to_string().green()
    );
    Ok(())
}

pub async fn list_recent(ctx: &CliContext) -> Result<(), CliError> {
    let recent = ctx.shortcuts.recent().await;
    if recent.is_empty() {
        println!("{} No recently used shortcuts", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Recently used:".bold().green());
    for (index, item) in recent.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{:>2}.", index).dimmed(),
            item.shortcut.cyan(),
            format_timestamp(item.timestamp, "%Y-%m-%d %H:%M:%S UTC").dimmed()
        );
    }
    Ok(())
}

pub async fn clear_recent(ctx: &CliContext) -> Result<(), CliError> {
    ctx.shortcuts.clear_recent().await?;
    println!("{} Recent list cleared", "✓".bold().green());
    Ok(())
}

pub async fn remove_recent(ctx: &CliContext, index: usize) -> Result<(), CliError> {
    if ctx.shortcuts.remove_recent_at(index).await? {
        println!("{} Removed recent entry {}", "✓".bold().green(), index);
    } else {
        println!(
            "{} No recent entry at index {}",
            "ℹ".bold().blue(),
            index.to_string().yellow()
        );
    }
    Ok(())
}

pub async fn show_stats(ctx: &CliContext) -> Result<(), CliError> {
    let stats = ctx.shortcuts.stats().await;

    println!("{}", "Usage statistics:".bold().green());
    println!(
        "  Total shortcuts: {}",
        stats.total_shortcuts.to_string().green()
    );
    println!(
        "  Most used:       {}",
        stats.most_used.as_deref().unwrap_or("-").cyan()
    );
    println!(
        "  Last used:       {}",
        stats.last_used.as_deref().unwrap_or("-").cyan()
    );

    if !stats.usage_counts.is_empty() {
        println!();
        let mut counts: Vec<_> = stats.usage_counts.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (alias, count) in counts {
            println!("  {:<20} {}", alias.cyan(), count);
        }
    }

    if let Some(today) = stats.daily_usage.last() {
        let total: u64 = today.shortcuts.values().sum();
        println!();
        println!(
            "{} {} uses on {} ({} days of history)",
            "ℹ".bold().blue(),
            total.to_string().green(),
            format_timestamp(today.date, "%Y-%m-%d"),
            stats.daily_usage.len()
        );
    }
    Ok(())
}

pub async fn settings(ctx: &CliContext, update: SettingsUpdate) -> Result<(), CliError> {
    let changed = update.analytics_enabled.is_some()
        || update.dark_mode.is_some()
        || update.keyboard_shortcuts_enabled.is_some()
        || update.auto_backup_enabled.is_some()
        || update.backup_frequency.is_some()
        || update.default_category.is_some();

    let settings = if changed {
        let settings = ctx.shortcuts.update_settings(update).await?;
        println!("{} Settings updated", "✓".bold().green());
        settings
    } else {
        ctx.shortcuts.settings().await
    };

    let rendered = serde_json::to_string_pretty(&settings)
        .map_err(|e| CliError::CommandError(format!("Failed to render settings: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
