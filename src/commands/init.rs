//! Handler for the `init` command.

use colored::*;
use std::path::Path;

use asciidocext_lib::config::{ConfigError, create_default_config};
use asciidocext_lib::exit_codes::exit;

/// Handle the init command: write a default configuration file.
pub fn handle_init(path: &Path) {
    match create_default_config(path) {
        Ok(()) => {
            println!(
                "{} {}",
                "Created default configuration file:".green().bold(),
                path.display()
            );
        }
        Err(ConfigError::FileExists { path }) => {
            eprintln!("{}: {} already exists", "Error".red().bold(), path);
            exit::tool_error();
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
