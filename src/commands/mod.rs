//! Command handlers for the asciidocext CLI.
//!
//! Each subcommand has its own module with a public handler function
//! that `main()` dispatches to.

pub mod args;
pub mod check;
pub mod config;
pub mod convert;
pub mod init;

use colored::*;

use asciidocext_lib::config::Config;
use asciidocext_lib::exit_codes::exit;

use crate::Cli;

/// Load the configuration selected by the global flags, exiting on failure.
pub fn load_config_with_cli_error_handling(cli: &Cli, destination: Option<&str>) -> Config {
    let mut config = match Config::load(cli.config.as_deref(), cli.no_config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    };

    if let Some(destination) = destination {
        config.destination = Some(destination.to_string());
    }
    config
}
