//! Output formatting module

mod json;
mod text;

use std::path::PathBuf;

use miette::Result;

use crate::cli::OutputFormat;
use crate::passes::Report;

/// The report of one pass over one document.
pub struct DocumentReport {
    pub path: PathBuf,
    pub report: Report,
}

pub fn output_reports(reports: &[DocumentReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_json(reports)?,
        OutputFormat::Text => text::output_text(reports),
    }

    Ok(())
}
