//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// nodewalk - Type-dispatched traversal passes over JSON node graphs
#[derive(Parser)]
#[command(name = "nodewalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Options file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count records, containers and leaves
    Stats(WalkArgs),

    /// List the path and value of every leaf
    Paths(WalkArgs),
}

#[derive(Args)]
pub struct WalkArgs {
    /// Documents to walk (JSON or JSONC)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Traversal options, e.g. `-- --default-stop --skip-types=Glyph`
    #[arg(last = true)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
