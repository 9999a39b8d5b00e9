//! Configuration commands

use std::path::Path;

use colored::Colorize;

use super::confirm;
use crate::cli::CliError;
use crate::config::AppConfig;

/// Generate example configuration file
pub async fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| "jumpto.example.toml".to_string());

    // 非 --force 模式下交互确认覆盖
    if !force
        && Path::new(&path).exists()
        && !confirm(&format!("File already exists: {}. Overwrite?", path))?
    {
        println!("{}", "Aborted.".red());
        return Ok(());
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    tokio::fs::write(&path, AppConfig::generate_sample_config())
        .await
        .map_err(|e| {
            CliError::CommandError(format!("Unable to write configuration file: {}", e))
        })?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {}",
        "Rename it to jumpto.toml (or set JUMPTO_* variables) to use it".dimmed()
    );
    Ok(())
}

/// Print the configuration in effect after files and environment overrides
pub fn config_show(config: &AppConfig) -> Result<(), CliError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| CliError::CommandError(format!("Failed to render configuration: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
