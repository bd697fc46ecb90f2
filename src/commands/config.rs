//! Handler for the `config` command.

use colored::*;

use super::load_config_with_cli_error_handling;
use crate::Cli;

/// Handle the config command: show the effective configuration.
pub fn handle_config(cli: &Cli) {
    let config = load_config_with_cli_error_handling(cli, None);

    print!("{}", config.to_toml());

    for invalid in config.asciidoc.invalid_values() {
        eprintln!("{}: {} will be ignored", "Warning".yellow().bold(), invalid);
    }
}
