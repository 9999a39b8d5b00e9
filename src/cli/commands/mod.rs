//! CLI command implementations

pub mod config_management;
pub mod data_transfer;
pub mod navigation;
pub mod shortcut_management;

use std::io::{self, BufRead, Write};

use colored::Colorize;

use super::CliError;

/// Ask a yes/no question on stdin; anything but `y` is a no
pub(crate) fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{} {} ", prompt.yellow(), "[y/N]".yellow());
    io::stdout()
        .flush()
        .map_err(|e| CliError::CommandError(format!("Failed to write prompt: {}", e)))?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| CliError::CommandError(format!("Failed to read answer: {}", e)))?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
