//! nodewalk CLI
//!
//! Runs traversal passes built on `nodewalk_core` over JSON documents.

mod cli;
mod commands;
mod output;
mod passes;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::walk::{load_options, run_walk};
use crate::passes::PassKind;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Options are read first so that the `verbose` option can raise the
    // log level too. Errors are reported once logging is up.
    let options = match &cli.command {
        Commands::Stats(args) | Commands::Paths(args) => load_options(&cli, &args.options),
    };
    let verbose = cli.verbose || options.as_ref().is_ok_and(|o| o.verbose);

    // Initialize logging
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match options.and_then(|options| run(&cli, options)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli, options: nodewalk_core::WalkOptions) -> Result<()> {
    match &cli.command {
        Commands::Stats(args) => run_walk(cli, PassKind::Stats, &args.files, &options),
        Commands::Paths(args) => run_walk(cli, PassKind::Paths, &args.files, &options),
    }
}
