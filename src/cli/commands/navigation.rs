//! Resolution and URL helper commands

use colored::Colorize;

use crate::cli::{CliContext, CliError};
use crate::services::NavigationAction;
use crate::utils::url_normalizer::{check_safety, extract_domain, suggest_alias as alias_for};

pub async fn go(ctx: &CliContext, text: &str) -> Result<(), CliError> {
    match ctx.resolver.resolve(text, None).await? {
        NavigationAction::Shortcut { alias, url, .. } => {
            println!(
                "{} {} -> {}",
                "→".bold().green(),
                alias.cyan(),
                url.blue().underline()
            );
        }
        NavigationAction::Search { url, .. } => {
            println!(
                "{} No shortcut for '{}', searching: {}",
                "ℹ".bold().blue(),
                text.yellow(),
                url.blue().underline()
            );
        }
    }
    Ok(())
}

pub async fn suggest(ctx: &CliContext, partial: &str) -> Result<(), CliError> {
    let suggestions = ctx.resolver.suggestions_for(partial).await?;
    if suggestions.is_empty() {
        println!("{} No matching shortcuts", "ℹ".bold().blue());
        return Ok(());
    }

    for suggestion in suggestions {
        println!("  {}", suggestion.description);
    }
    Ok(())
}

pub fn suggest_alias(url: &str) -> Result<(), CliError> {
    let alias = alias_for(url);
    if alias.is_empty() {
        return Err(CliError::CommandError(format!(
            "Cannot derive an alias from '{}'",
            url
        )));
    }

    println!(
        "{} Suggested alias for {}: {}",
        "ℹ".bold().blue(),
        extract_domain(url).blue(),
        alias.magenta()
    );
    Ok(())
}

pub fn check_url(url: &str) -> Result<(), CliError> {
    let verdict = check_safety(url);
    if verdict.safe {
        println!("{} {} looks safe", "✓".bold().green(), url.blue());
        Ok(())
    } else {
        let reason = verdict.reason.unwrap_or_default();
        println!("{} {}: {}", "✗".bold().red(), url.blue(), reason.red());
        Err(CliError::CommandError(reason))
    }
}
