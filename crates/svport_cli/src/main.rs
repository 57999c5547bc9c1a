//! svport CLI: command-line front end for the SystemVerilog interface extractor.
//!
//! Provides `svport fetchif` for printing module parameters and ports, and
//! `svport types` for listing the struct and union types found in sources.

#![warn(missing_docs)]

mod fetchif;
mod pipeline;
mod types;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// svport: structural SystemVerilog interface extractor.
#[derive(Parser, Debug)]
#[command(name = "svport", version, about = "SystemVerilog interface extractor")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `svport.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the parameters and ports of every module.
    Fetchif(FetchifArgs),
    /// List the struct and union types found in the sources.
    Types(TypesArgs),
}

/// Arguments for the `svport fetchif` subcommand.
#[derive(Parser, Debug)]
pub struct FetchifArgs {
    /// Source files or directories. Defaults to `sources.paths` from `svport.toml`.
    pub paths: Vec<String>,

    /// Output format. Defaults to `output.format` from `svport.toml`.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Only report the named module (repeatable).
    #[arg(short, long = "module")]
    pub modules: Vec<String>,

    /// Emit single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the `svport types` subcommand.
#[derive(Parser, Debug)]
pub struct TypesArgs {
    /// Source files or directories. Defaults to `sources.paths` from `svport.toml`.
    pub paths: Vec<String>,

    /// Output format. Defaults to `output.format` from `svport.toml`.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

impl From<svport_config::OutputFormat> for ReportFormat {
    fn from(format: svport_config::OutputFormat) -> Self {
        match format {
            svport_config::OutputFormat::Text => ReportFormat::Text,
            svport_config::OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Fetchif(ref args) => fetchif::run(args, &global),
        Command::Types(ref args) => types::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Initializes `env_logger`. `RUST_LOG` takes precedence over the flags.
fn init_logging(quiet: bool, verbose: bool) {
    let env = env_logger::Env::default().default_filter_or(log_level(quiet, verbose));
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn log_level(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}
