//! Handler for the `check` command.

use colored::*;

use asciidocext_lib::AsciidocConverter;
use asciidocext_lib::exit_codes::exit;

use crate::Cli;
use super::load_config_with_cli_error_handling;

/// Handle the check command: report which renderer would be used.
pub fn handle_check(cli: &Cli) {
    let config = load_config_with_cli_error_handling(cli, None);
    let converter = AsciidocConverter::new(config.asciidoc);

    match converter.resolve_renderer() {
        Some(resolved) => {
            println!(
                "{} {} ({})",
                "Found".green().bold(),
                resolved.renderer,
                resolved.path.display()
            );
            exit::success();
        }
        None => {
            eprintln!(
                "{}: neither asciidoctor nor asciidoc found in $PATH",
                "Not installed".yellow().bold()
            );
            exit::conversion_failed();
        }
    }
}
