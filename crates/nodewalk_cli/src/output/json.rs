//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use serde_json::{Value, json};

use super::DocumentReport;
use crate::passes::Report;

pub fn output_json(reports: &[DocumentReport]) -> Result<()> {
    let output: Vec<_> = reports.iter().map(report_json).collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}

fn report_json(document: &DocumentReport) -> Value {
    let path = document.path.display().to_string();
    match &document.report {
        Report::Stats(stats) => json!({
            "path": path,
            "records": stats.records,
            "sequences": stats.sequences,
            "mappings": stats.mappings,
            "leaves": stats.leaves,
            "skipped": stats.skipped,
        }),
        Report::Paths(leaves) => json!({
            "path": path,
            "leaves": leaves
                .iter()
                .map(|leaf| json!({ "path": leaf.path, "value": leaf.value }))
                .collect::<Vec<_>>(),
        }),
    }
}
