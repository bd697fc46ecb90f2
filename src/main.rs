use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Ignore configuration files and use the defaults
    #[arg(long, global = true, conflicts_with = "config")]
    no_config: bool,

    /// Show detailed output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Command to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert AsciiDoc files (or stdin) to HTML
    Convert(ConvertArgs),
    /// Report whether asciidoctor or asciidoc is installed
    Check,
    /// Print the renderer arguments that would be used for a document
    Args(ArgsOptions),
    /// Show the effective configuration
    Config,
    /// Create a default configuration file
    Init {
        /// Where to write the file
        #[arg(default_value = ".asciidocext.toml")]
        path: PathBuf,
    },
}

#[derive(Args)]
pub struct ConvertArgs {
    /// AsciiDoc files to convert. Reads stdin and writes stdout when omitted.
    paths: Vec<PathBuf>,

    /// Site destination directory (overrides the config file)
    #[arg(short, long)]
    destination: Option<String>,

    /// Directory document names are relative to
    #[arg(long, default_value = ".")]
    content_dir: PathBuf,

    /// Directory HTML files are written to (defaults to the destination, then next to each source)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Document name to use when reading from stdin
    #[arg(long)]
    stdin_filename: Option<String>,

    /// Number of documents converted at once (1 converts sequentially)
    #[arg(short, long)]
    jobs: Option<usize>,
}

#[derive(Args)]
pub struct ArgsOptions {
    /// Logical document name, e.g. posts/hello.adoc
    #[arg(default_value = "<stdin>")]
    document: String,

    /// Source file of the document (defaults to the document name)
    #[arg(long)]
    filename: Option<PathBuf>,

    /// Site destination directory (overrides the config file)
    #[arg(short, long)]
    destination: Option<String>,
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Commands::Convert(args) => commands::convert::handle_convert(&cli, args),
        Commands::Check => commands::check::handle_check(&cli),
        Commands::Args(args) => commands::args::handle_args(&cli, args),
        Commands::Config => commands::config::handle_config(&cli),
        Commands::Init { path } => commands::init::handle_init(path),
    }
}
