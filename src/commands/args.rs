//! Handler for the `args` command.

use std::path::PathBuf;

use asciidocext_lib::{AsciidocConverter, DocumentContext};

use super::load_config_with_cli_error_handling;
use crate::{ArgsOptions, Cli};

/// Handle the args command: print the renderer argument vector, one per line.
pub fn handle_args(cli: &Cli, args: &ArgsOptions) {
    let config = load_config_with_cli_error_handling(cli, args.destination.as_deref());
    let converter = AsciidocConverter::new(config.asciidoc.clone()).with_settings(config);

    let filename = args
        .filename
        .clone()
        .unwrap_or_else(|| PathBuf::from(&args.document));
    let ctx = DocumentContext::new(args.document.clone(), filename);

    for arg in converter.build_args(&ctx) {
        println!("{arg}");
    }
}
