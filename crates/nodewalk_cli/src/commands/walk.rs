//! Walk command implementation

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use jsonc_parser::ParseOptions;
use miette::{IntoDiagnostic, Result, miette};
use nodewalk_core::{IgnoreUnknown, Node, WalkOptions};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::output::{DocumentReport, output_reports};
use crate::passes::PassKind;

/// Loads the options file and applies the trailing `--` options over it.
pub fn load_options(cli: &Cli, args: &[String]) -> Result<WalkOptions> {
    let mut options = if let Some(ref path) = cli.config {
        WalkOptions::from_file(path).into_diagnostic()?
    } else if let Some(path) = WalkOptions::discover(".") {
        WalkOptions::from_file(&path).into_diagnostic()?
    } else {
        WalkOptions::new()
    };

    let rest = options
        .parse_opts(args, IgnoreUnknown::None)
        .into_diagnostic()?;
    if let Some(arg) = rest.first() {
        return Err(miette!("Unexpected argument after '--': {}", arg));
    }

    Ok(options)
}

pub fn run_walk(cli: &Cli, kind: PassKind, files: &[PathBuf], options: &WalkOptions) -> Result<()> {
    debug!(?kind, ?options, "Resolved walk options");

    // One engine per document; engines of the same kind share a registry.
    let reports = files
        .par_iter()
        .map(|path| walk_file(kind, path, options))
        .collect::<Result<Vec<_>>>()?;

    output_reports(&reports, cli.format)
}

fn walk_file(kind: PassKind, path: &Path, options: &WalkOptions) -> Result<DocumentReport> {
    let start = Instant::now();
    let document = load_document(path)?;
    let report = kind.run(&document, options);

    if options.timing {
        info!("Walked {} in {:?}", path.display(), start.elapsed());
    }

    Ok(DocumentReport {
        path: path.to_path_buf(),
        report,
    })
}

/// Reads a JSON or JSONC document into a node graph. An empty document is
/// a single null leaf.
pub fn load_document(path: &Path) -> Result<Node> {
    let content = fs::read_to_string(path)
        .map_err(|e| miette!("Failed to read {}: {}", path.display(), e))?;

    let value = jsonc_parser::parse_to_serde_value(&content, &ParseOptions::default())
        .map_err(|e| miette!("Failed to parse {}: {}", path.display(), e))?
        .unwrap_or(serde_json::Value::Null);

    Node::from_json(value).map_err(|e| miette!("Invalid document {}: {}", path.display(), e))
}
