//! Handler for the `convert` command.

use colored::*;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use asciidocext_lib::exit_codes::exit;
use asciidocext_lib::file_processor::plan_jobs;
use asciidocext_lib::parallel::{FileParallelProcessor, ParallelConfig};
use asciidocext_lib::{AsciidocConverter, DocumentContext};

use super::load_config_with_cli_error_handling;
use crate::{Cli, ConvertArgs};

/// Handle the convert command: render files, or stdin to stdout.
pub fn handle_convert(cli: &Cli, args: &ConvertArgs) {
    let config = load_config_with_cli_error_handling(cli, args.destination.as_deref());
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.destination.as_ref().map(PathBuf::from));
    let converter = AsciidocConverter::new(config.asciidoc.clone()).with_settings(config);

    if args.paths.is_empty() {
        convert_stdin(&converter, args.stdin_filename.as_deref());
        return;
    }

    let jobs = plan_jobs(&args.paths, &args.content_dir, output_dir.as_deref());
    let results = FileParallelProcessor::new(ParallelConfig::with_jobs(args.jobs)).process_files(&converter, &jobs);

    let mut failed = 0;
    for result in results {
        if let Err(e) = result {
            eprintln!("{}: {}", "Error".red().bold(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        eprintln!(
            "{} of {} documents failed to convert",
            failed.to_string().red().bold(),
            jobs.len()
        );
        exit::conversion_failed();
    }

    log::info!("Converted {} documents", jobs.len());
}

fn convert_stdin(converter: &AsciidocConverter, stdin_filename: Option<&str>) {
    let mut src = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut src) {
        eprintln!("{}: Failed to read from stdin: {}", "Error".red().bold(), e);
        exit::tool_error();
    }

    let ctx = DocumentContext::new(
        stdin_filename.unwrap_or("<stdin>"),
        PathBuf::from(stdin_filename.unwrap_or_default()),
    );

    let html = match converter.convert(&src, &ctx) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::conversion_failed();
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(&html).and_then(|()| stdout.flush()) {
        eprintln!("{}: Failed to write to stdout: {}", "Error".red().bold(), e);
        exit::tool_error();
    }
}
